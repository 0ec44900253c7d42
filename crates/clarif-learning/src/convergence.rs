//! Rolling success-rate tracking.

use std::collections::VecDeque;

use clarif_core::constants::CONVERGENCE_HISTORY;

/// Tracks recent pass/fail outcomes over a bounded window.
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    recent: VecDeque<bool>,
    total: usize,
}

impl ConvergenceTracker {
    pub fn new() -> Self {
        Self {
            recent: VecDeque::with_capacity(CONVERGENCE_HISTORY),
            total: 0,
        }
    }

    pub fn update(&mut self, is_correct: bool) {
        if self.recent.len() == CONVERGENCE_HISTORY {
            self.recent.pop_front();
        }
        self.recent.push_back(is_correct);
        self.total += 1;
    }

    /// Outcomes recorded since creation, including those evicted from the window.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Fraction of correct outcomes in the retained window; 0.0 when empty.
    pub fn convergence_rate(&self) -> f64 {
        if self.recent.is_empty() {
            return 0.0;
        }
        let correct = self.recent.iter().filter(|&&ok| ok).count();
        correct as f64 / self.recent.len() as f64
    }

    /// True once the last `window` outcomes reach `threshold` success rate.
    /// Never true before `window` outcomes have been seen.
    pub fn is_converged(&self, threshold: f64, window: usize) -> bool {
        if window == 0 || self.recent.len() < window {
            return false;
        }
        let correct = self.recent.iter().rev().take(window).filter(|&&ok| ok).count();
        correct as f64 / window as f64 >= threshold
    }
}

impl Default for ConvergenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

//! The learner: walks the state space under its current hypothesis.

use std::collections::{HashSet, VecDeque};

use clarif_core::errors::ClarifResult;
use clarif_core::models::SearchOutcome;
use clarif_core::rules::{Rule, State, Trace};
use tracing::debug;

use crate::hypothesis::Hypothesis;

/// Holds a hypothesis and searches for a path to the goal with it.
#[derive(Debug, Clone, Default)]
pub struct Learner {
    hypothesis: Hypothesis,
    /// States visited by the most recent search, in visit order.
    visited: Vec<State>,
}

impl Learner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a seeded hypothesis.
    pub fn with_rules(rules: &[Rule]) -> Self {
        Self {
            hypothesis: Hypothesis::from_rules(rules),
            visited: Vec::new(),
        }
    }

    pub fn hypothesis(&self) -> &Hypothesis {
        &self.hypothesis
    }

    /// Diagnostic snapshot of the states the last search visited.
    pub fn visited(&self) -> &[State] {
        &self.visited
    }

    /// Search from `start` toward a state satisfying `is_goal`.
    ///
    /// Worklist traversal: each dequeued state is expanded once with the top
    /// applicable rule of the hypothesis. The start state is recorded as the
    /// first trace and every transition into a new state appends one more,
    /// so the last trace ends where the walk went wrong. A state with no
    /// applicable rule ends its branch. A transition back into a visited
    /// state ends it too and records no trace.
    pub fn search_path<G>(&mut self, start: &State, is_goal: G) -> ClarifResult<SearchOutcome>
    where
        G: Fn(&State) -> bool,
    {
        self.visited.clear();

        if is_goal(start) {
            self.visited.push(start.clone());
            return Ok(SearchOutcome {
                success: true,
                traces: vec![Trace::new(start.clone())],
            });
        }

        let mut seen: HashSet<State> = HashSet::new();
        let mut queue: VecDeque<Trace> = VecDeque::from([Trace::new(start.clone())]);
        let mut traces = vec![Trace::new(start.clone())];
        let mut success = false;

        while let Some(trace) = queue.pop_front() {
            let state = trace.end().clone();
            if !seen.insert(state.clone()) {
                continue;
            }
            self.visited.push(state.clone());

            if is_goal(&state) {
                success = true;
                continue;
            }

            let Some(rule) = self.hypothesis.find_top_rule(&state) else {
                debug!(state = %state, "no applicable rule, branch ends");
                continue;
            };
            let next = rule.apply(&state)?;
            if seen.contains(&next) {
                debug!(state = %state, rule = %rule.name, "transition revisits a state, branch ends");
                continue;
            }
            let extended = trace.extended(next, rule.clone());
            traces.push(extended.clone());
            queue.push_back(extended);
        }

        debug!(
            success,
            traces = traces.len(),
            visited = self.visited.len(),
            "search finished"
        );
        Ok(SearchOutcome { success, traces })
    }

    /// Merge coach feedback into the hypothesis. Returns whether it changed.
    pub fn update_hypothesis(&mut self, feedback: &[Rule]) -> bool {
        let changed = self.hypothesis.merge(feedback);
        debug!(
            feedback = feedback.len(),
            changed,
            hypothesis_size = self.hypothesis.len(),
            "hypothesis updated"
        );
        changed
    }
}

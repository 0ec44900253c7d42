//! Bubble-sort target policies over states of the form `{k0=v0, k1=v1, ...}`.

use serde::Deserialize;

use clarif_core::errors::ClarifResult;
use clarif_core::rules::{Action, Rule, State, Value};
use clarif_core::traits::ITargetPolicy;

/// Swap the first adjacent inversion, in key order.
///
/// In full mode each rule's condition is the whole state it was asked about
/// and every rule has priority 1. In partial mode the condition is just the
/// two offending bindings and earlier positions get higher priority, so the
/// rules generalize across states.
#[derive(Debug, Clone)]
pub struct BubbleSortPolicy {
    keys: Vec<String>,
    partial: bool,
}

impl BubbleSortPolicy {
    pub fn full(keys: Vec<String>) -> Self {
        Self {
            keys,
            partial: false,
        }
    }

    pub fn partial(keys: Vec<String>) -> Self {
        Self {
            keys,
            partial: true,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Position of the first adjacent inversion.
    fn first_inversion(&self, state: &State) -> ClarifResult<Option<usize>> {
        for (i, pair) in self.keys.windows(2).enumerate() {
            if state.get(&pair[0])? > state.get(&pair[1])? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }
}

impl ITargetPolicy for BubbleSortPolicy {
    fn rule_for(&self, state: &State) -> ClarifResult<Rule> {
        let Some(i) = self.first_inversion(state)? else {
            let condition = if self.partial {
                State::new()
            } else {
                state.clone()
            };
            return Ok(Rule::new("R(No action)", condition, Action::identity(), 0));
        };

        let (left, right) = (&self.keys[i], &self.keys[i + 1]);
        let action = Action::swap(left.as_str(), right.as_str());
        let (condition, priority) = if self.partial {
            let pair = state.project([left.as_str(), right.as_str()])?;
            (pair, (self.keys.len() - i) as i64)
        } else {
            (state.clone(), 1)
        };
        let explanation = action.name().to_string();
        Ok(Rule::new(format!("R({action})"), condition, action, priority)
            .with_explanation(explanation))
    }

    fn is_goal(&self, state: &State) -> bool {
        matches!(self.first_inversion(state), Ok(None))
    }
}

/// `k00`, `k01`, ... for `n` variables.
pub fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("k{i:02}")).collect()
}

/// Bind `keys[i]` to `values[i]`.
pub fn permutation_state(keys: &[String], values: &[i64]) -> State {
    keys.iter()
        .zip(values)
        .map(|(k, v)| (k.clone(), Value::Int(*v)))
        .collect()
}

/// Number of out-of-order pairs; equals the number of bubble-sort swaps.
pub fn inversions(values: &[i64]) -> usize {
    let mut count = 0;
    for i in 0..values.len() {
        for j in i + 1..values.len() {
            if values[i] > values[j] {
                count += 1;
            }
        }
    }
    count
}

/// Every permutation of `0..n`, in lexicographic order.
pub fn permutations(n: usize) -> Vec<Vec<i64>> {
    let mut current: Vec<i64> = (0..n as i64).collect();
    let mut out = vec![current.clone()];
    loop {
        // Next lexicographic permutation.
        let Some(i) = (1..current.len()).rev().find(|&i| current[i - 1] < current[i]) else {
            return out;
        };
        let pivot = i - 1;
        let Some(j) = (pivot + 1..current.len())
            .rev()
            .find(|&j| current[j] > current[pivot])
        else {
            return out;
        };
        current.swap(pivot, j);
        current[i..].reverse();
        out.push(current.clone());
    }
}

/// Golden bubble-sort episodes.
#[derive(Debug, Clone, Deserialize)]
pub struct SortingGolden {
    pub description: String,
    pub cases: Vec<SortingCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SortingCase {
    pub keys: Vec<String>,
    pub start: Vec<i64>,
    pub expected_steps: usize,
}

impl SortingCase {
    pub fn start_state(&self) -> State {
        permutation_state(&self.keys, &self.start)
    }
}

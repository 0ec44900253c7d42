//! Reflexive coach: corrects where the learner leaves the oracle's trajectory.
//!
//! At construction the oracle is unrolled from the start state to the goal.
//! On evaluation, the learner's last trace is walked against that cached
//! trajectory and one state where the learner acted differently is picked at
//! random as the deviation state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use clarif_core::config::{CoachConfig, CoachKind};
use clarif_core::errors::{ClarifResult, CoachingError};
use clarif_core::models::Evaluation;
use clarif_core::rules::{Rule, State, Trace};
use clarif_core::traits::{ICoach, ITargetPolicy};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::direct::DirectCoach;

pub struct ReflexiveCoach {
    base: DirectCoach,
    /// Oracle states and rules from start to (excluding) the goal.
    trajectory: Vec<(State, Rule)>,
    cache: HashMap<State, Rule>,
    seed: u64,
}

impl ReflexiveCoach {
    /// Unroll the oracle from `start`. Fails if the oracle loops, stalls, or
    /// runs past `config.max_trajectory_len` steps.
    pub fn new(
        policy: Arc<dyn ITargetPolicy>,
        start: State,
        config: &CoachConfig,
    ) -> ClarifResult<Self> {
        let trajectory = unroll(policy.as_ref(), &start, config.max_trajectory_len)?;
        info!(
            start = %start,
            trajectory_len = trajectory.len(),
            "cached optimal trajectory"
        );
        let cache = trajectory.iter().cloned().collect();
        Ok(Self {
            base: DirectCoach::new(policy, start, config),
            trajectory,
            cache,
            seed: config.seed,
        })
    }

    /// The cached oracle trajectory.
    pub fn trajectory(&self) -> &[(State, Rule)] {
        &self.trajectory
    }

    /// Every state of `trace` that lies on the cached trajectory and where
    /// the learner applied a different action than the oracle, or none.
    /// A state is judged on its first decision only; a terminal state the
    /// trace already passed through is not a deviation.
    pub fn deviations<'t>(&self, trace: &'t Trace) -> Vec<&'t State> {
        let mut decided: HashSet<&State> = HashSet::new();
        trace
            .decisions()
            .into_iter()
            .filter_map(|(state, applied)| {
                if !decided.insert(state) {
                    return None;
                }
                let expected = self.cache.get(state)?;
                let diverges = applied.map_or(true, |rule| rule.action != expected.action);
                diverges.then_some(state)
            })
            .collect()
    }

    fn select_deviation(&self, trace: &Trace) -> State {
        let deviations = self.deviations(trace);
        if deviations.is_empty() {
            return trace.end().clone();
        }
        let mut rng = SmallRng::seed_from_u64(self.seed ^ trace_digest(trace));
        let pick = rng.random_range(0..deviations.len());
        debug!(candidates = deviations.len(), pick, "deviation sampled");
        deviations[pick].clone()
    }
}

impl ICoach for ReflexiveCoach {
    fn evaluate_inference(&self, traces: &[Trace]) -> ClarifResult<Evaluation> {
        self.base
            .evaluate_with(CoachKind::Reflexive, traces, |last| self.select_deviation(last))
    }
}

fn unroll(
    policy: &dyn ITargetPolicy,
    start: &State,
    limit: usize,
) -> ClarifResult<Vec<(State, Rule)>> {
    let mut trajectory = Vec::new();
    let mut seen = HashSet::new();
    let mut state = start.clone();

    while !policy.is_goal(&state) {
        if trajectory.len() >= limit {
            return Err(CoachingError::OracleDiverged {
                start: start.to_string(),
                limit,
            }
            .into());
        }
        if !seen.insert(state.clone()) {
            return Err(CoachingError::OracleCycle {
                state: state.to_string(),
            }
            .into());
        }
        let rule = policy.rule_for(&state)?;
        let next = rule.apply(&state)?;
        if next == state {
            return Err(CoachingError::OracleStuck {
                state: state.to_string(),
            }
            .into());
        }
        trajectory.push((state, rule));
        state = next;
    }
    Ok(trajectory)
}

/// Stable 64-bit digest of a trace, used to seed deviation sampling so that
/// equal traces always yield the same choice.
fn trace_digest(trace: &Trace) -> u64 {
    let digest = blake3::hash(trace.to_string().as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

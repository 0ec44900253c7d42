//! Property tests for hypothesis merging, learner search, and coaching.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use clarif_core::config::{CoachConfig, FeedbackCondition};
use clarif_core::rules::{Action, Condition, Rule, State};
use clarif_core::traits::{ICoach, ITargetPolicy};
use clarif_learning::{DirectCoach, Hypothesis, Learner, ReflexiveCoach};
use test_fixtures::sorting::{self, BubbleSortPolicy};

fn action(index: usize) -> Action {
    match index {
        0 => Action::identity(),
        1 => Action::swap("a", "b"),
        _ => Action::assign(State::new().with("a", 0)),
    }
}

/// Rules over `a` and `b` with possibly partial conditions.
fn rule_strategy() -> impl Strategy<Value = Rule> {
    (
        prop::option::of(0_i64..3),
        prop::option::of(0_i64..3),
        0_usize..3,
        0_i64..4,
    )
        .prop_map(|(a, b, act, priority)| {
            let mut condition = State::new();
            if let Some(a) = a {
                condition.set("a", a);
            }
            if let Some(b) = b {
                condition.set("b", b);
            }
            Rule::new(format!("R{act}"), condition, action(act), priority)
        })
}

fn full_state_strategy() -> impl Strategy<Value = State> {
    (0_i64..3, 0_i64..3).prop_map(|(a, b)| State::new().with("a", a).with("b", b))
}

proptest! {
    #[test]
    fn merged_hypothesis_has_unique_conditions(
        batches in prop::collection::vec(prop::collection::vec(rule_strategy(), 0..4), 0..8)
    ) {
        let mut hypothesis = Hypothesis::new();
        let mut seen_conditions: HashSet<Condition> = HashSet::new();
        for batch in &batches {
            hypothesis.merge(batch);
            seen_conditions.extend(batch.iter().map(|r| r.condition.clone()));
        }

        let held: Vec<&Condition> = hypothesis.rules().map(|r| &r.condition).collect();
        let unique: HashSet<&Condition> = held.iter().copied().collect();
        prop_assert_eq!(held.len(), unique.len());
        // A condition, once learned, always keeps some rule.
        prop_assert_eq!(unique.len(), seen_conditions.len());
    }

    #[test]
    fn top_rule_has_highest_applicable_priority(
        rules in prop::collection::vec(rule_strategy(), 0..12),
        state in full_state_strategy(),
    ) {
        let hypothesis = Hypothesis::from_rules(&rules);
        let best = hypothesis
            .rules()
            .filter(|r| r.applies(&state))
            .map(|r| r.priority)
            .max();
        prop_assert_eq!(hypothesis.find_top_rule(&state).map(|r| r.priority), best);
    }

    #[test]
    fn merging_held_rules_changes_nothing(rules in prop::collection::vec(rule_strategy(), 0..8)) {
        let mut hypothesis = Hypothesis::from_rules(&rules);
        let before = hypothesis.to_string();
        let held: Vec<Rule> = hypothesis.rules().cloned().collect();
        prop_assert!(!hypothesis.merge(&held));
        prop_assert_eq!(hypothesis.to_string(), before);
    }

    #[test]
    fn search_traces_extend_earlier_traces(
        perm in 0_usize..24,
        learned in prop::collection::vec(0_usize..24, 0..6),
    ) {
        let keys = sorting::keys(4);
        let perms = sorting::permutations(4);
        let policy = BubbleSortPolicy::partial(keys.clone());
        let seed: Vec<Rule> = learned
            .iter()
            .map(|&i| policy.rule_for(&sorting::permutation_state(&keys, &perms[i])).unwrap())
            .filter(|r| !r.action.is_noop())
            .collect();
        let mut learner = Learner::with_rules(&seed);
        let start = sorting::permutation_state(&keys, &perms[perm]);

        let outcome = learner.search_path(&start, |s| policy.is_goal(s)).unwrap();
        prop_assert_eq!(outcome.traces[0].end(), &start);
        for trace in &outcome.traces[1..] {
            prop_assert_eq!(&trace.origin, &start);
        }
        let visited: HashSet<&State> = learner.visited().iter().collect();
        prop_assert_eq!(visited.len(), learner.visited().len());
        prop_assert_eq!(outcome.success, policy.is_goal(outcome.last_trace().unwrap().end()));
    }

    #[test]
    fn coaching_is_idempotent(
        perm in 0_usize..24,
        learned in prop::collection::vec(0_usize..24, 0..6),
        seed in any::<u64>(),
    ) {
        let keys = sorting::keys(4);
        let perms = sorting::permutations(4);
        let policy: Arc<dyn ITargetPolicy> = Arc::new(BubbleSortPolicy::partial(keys.clone()));
        let rules: Vec<Rule> = learned
            .iter()
            .map(|&i| policy.rule_for(&sorting::permutation_state(&keys, &perms[i])).unwrap())
            .filter(|r| !r.action.is_noop())
            .collect();
        let start = sorting::permutation_state(&keys, &perms[perm]);
        let outcome = Learner::with_rules(&rules)
            .search_path(&start, |s| policy.is_goal(s))
            .unwrap();

        let config = CoachConfig {
            seed,
            feedback_condition: FeedbackCondition::OracleRule,
            ..Default::default()
        };
        let direct = DirectCoach::new(Arc::clone(&policy), start.clone(), &config);
        let reflexive = ReflexiveCoach::new(Arc::clone(&policy), start, &config).unwrap();
        let coaches: [&dyn ICoach; 2] = [&direct, &reflexive];
        for coach in coaches {
            let first = coach.evaluate_inference(&outcome.traces).unwrap();
            let second = coach.evaluate_inference(&outcome.traces).unwrap();
            prop_assert!(first.feedback.len() <= 1);
            prop_assert_eq!(first.is_correct, outcome.success);
            prop_assert_eq!(first, second);
        }
    }
}

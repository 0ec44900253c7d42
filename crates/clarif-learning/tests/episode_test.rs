//! End-to-end coaching episodes over small sorting problems.

use std::sync::Arc;

use clarif_core::config::{ClarifConfig, CoachKind, FeedbackCondition};
use clarif_core::errors::{ClarifError, CoachingError};
use clarif_core::models::EpisodeStatus;
use clarif_core::rules::{Action, Condition, Rule, State, Value};
use clarif_core::traits::{ITargetPolicy, PolicyFn};
use clarif_learning::{Episode, Learner};
use test_fixtures::sorting::{self, BubbleSortPolicy};

fn abc(a: i64, b: i64, c: i64) -> State {
    State::new().with("a", a).with("b", b).with("c", c)
}

fn abc_keys() -> Vec<String> {
    vec!["a".into(), "b".into(), "c".into()]
}

fn bubble() -> Arc<dyn ITargetPolicy> {
    Arc::new(BubbleSortPolicy::full(abc_keys()))
}

fn config(kind: CoachKind, shape: FeedbackCondition) -> ClarifConfig {
    let mut config = ClarifConfig::default();
    config.coach.kind = kind;
    config.coach.feedback_condition = shape;
    config
}

// ---------------------------------------------------------------------------
// Convergence
// ---------------------------------------------------------------------------

#[test]
fn unsorted_start_converges_after_two_corrections() {
    let mut episode = Episode::new(abc(2, 3, 1), bubble(), &ClarifConfig::default()).unwrap();
    let report = episode.run().unwrap();

    assert_eq!(report.status, EpisodeStatus::Converged);
    assert_eq!(report.steps, 2);

    let hypothesis = episode.learner().hypothesis();
    assert_eq!(hypothesis.len(), 2);
    let first = hypothesis
        .rule_for_condition(&Condition::Exact(abc(2, 3, 1)))
        .unwrap();
    assert_eq!(first.action, Action::swap("b", "c"));
    let second = hypothesis
        .rule_for_condition(&Condition::Exact(abc(2, 1, 3)))
        .unwrap();
    assert_eq!(second.action, Action::swap("a", "b"));
}

#[test]
fn start_at_goal_converges_without_feedback() {
    let seeded = Learner::with_rules(&[Rule::new(
        "R(seed)",
        abc(3, 1, 2),
        Action::swap("a", "b"),
        1,
    )]);
    let mut episode =
        Episode::with_learner(abc(1, 2, 3), bubble(), seeded, &ClarifConfig::default()).unwrap();
    let report = episode.run().unwrap();

    assert_eq!(report.steps, 0);
    assert_eq!(report.status, EpisodeStatus::Converged);
    assert_eq!(episode.attempts(), 1);
    assert_eq!(episode.learner().hypothesis().len(), 1);
}

#[test]
fn report_reflects_hypothesis_and_coach() {
    let mut episode = Episode::new(abc(2, 1, 3), bubble(), &ClarifConfig::default()).unwrap();
    let report = episode.run().unwrap();

    assert_eq!(report.coach, CoachKind::Direct);
    assert_eq!(report.start_state, "a=2,b=1,c=3");
    assert_eq!(
        report.learned_hypothesis,
        episode.learner().hypothesis().to_string()
    );
    assert_eq!(report.episode_id, episode.id().to_string());
    assert!(report.traces.is_none());
}

#[test]
fn report_serializes_to_json() {
    let mut config = ClarifConfig::default();
    config.episode.report_traces = true;
    let mut episode = Episode::new(abc(2, 1, 3), bubble(), &config).unwrap();
    let report = episode.run().unwrap();

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["status"], "converged");
    assert_eq!(value["coach"], "direct");
    assert_eq!(value["steps"], 1);
    assert_eq!(value["traces"], episode.traces_str());
    assert!(value["finished_at"].is_string());
}

// ---------------------------------------------------------------------------
// Duplicate-feedback guard
// ---------------------------------------------------------------------------

#[test]
fn unsatisfiable_feedback_raises_stagnation() {
    // The oracle always conditions on a variable no reachable state binds.
    let oracle = Arc::new(PolicyFn::reaching(State::new().with("a", 1).with("b", 2), |_: &State| {
        Ok(Rule::new(
            "R(ghost)",
            State::new().with("z", 1),
            Action::swap("a", "b"),
            1,
        ))
    }));
    let config = config(CoachKind::Direct, FeedbackCondition::OracleRule);
    let mut episode =
        Episode::new(State::new().with("a", 2).with("b", 1), oracle, &config).unwrap();

    let err = episode.run().unwrap_err();
    assert!(err.is_stagnation());
    assert_eq!(episode.status(), EpisodeStatus::Error);
    assert_eq!(episode.attempts(), 2);
    match err {
        ClarifError::Coaching(CoachingError::Stagnation { steps, feedback }) => {
            assert_eq!(steps, 1);
            assert!(feedback.contains("R(ghost)"));
        }
        other => panic!("expected stagnation, got {other}"),
    }
}

#[test]
fn toggling_oracle_stagnates_instead_of_looping() {
    // Swapping a and b forever never reaches a state with a=0.
    let toggle = Arc::new(PolicyFn::new(
        |s: &State| Ok(Rule::new("R(flip)", s.clone(), Action::swap("a", "b"), 1)),
        |s: &State| matches!(s.get("a"), Ok(Value::Int(0))),
    ));
    let mut episode = Episode::new(
        State::new().with("a", 1).with("b", 2),
        toggle,
        &ClarifConfig::default(),
    )
    .unwrap();

    let err = episode.run().unwrap_err();
    assert!(err.is_stagnation());
    // The flip back into the start records no trace, so the third attempt
    // repeats the correction at {a=2,b=1}.
    assert_eq!(episode.steps(), 2);
    assert_eq!(episode.attempts(), 3);
    assert!(matches!(
        episode.step().unwrap_err(),
        ClarifError::EpisodeFinished { .. }
    ));
}

/// Seeds that send the learner from {a=3,b=1,c=2} to {a=1,b=3,c=2} and
/// straight back again.
fn cycling_learner() -> Learner {
    Learner::with_rules(&[
        Rule::new("R(ok)", abc(3, 1, 2), Action::swap("a", "b"), 1),
        Rule::new("R(general)", State::new(), Action::swap("a", "b"), 0),
    ])
}

#[test]
fn learner_cycle_is_corrected_where_the_walk_went_wrong() {
    let config = config(CoachKind::Direct, FeedbackCondition::DeviationState);
    let mut episode =
        Episode::with_learner(abc(3, 1, 2), bubble(), cycling_learner(), &config).unwrap();
    let report = episode.run().unwrap();

    assert_eq!(report.status, EpisodeStatus::Converged);
    assert_eq!(report.steps, 1);
    let learned = episode
        .learner()
        .hypothesis()
        .rule_for_condition(&Condition::Exact(abc(1, 3, 2)))
        .unwrap();
    assert_eq!(learned.action, Action::swap("b", "c"));
}

#[test]
fn reflexive_coach_corrects_learner_cycle_for_every_seed() {
    for seed in 0..20 {
        let mut config = config(CoachKind::Reflexive, FeedbackCondition::DeviationState);
        config.coach.seed = seed;
        let mut episode =
            Episode::with_learner(abc(3, 1, 2), bubble(), cycling_learner(), &config).unwrap();
        let report = episode.run().unwrap();
        assert_eq!(report.status, EpisodeStatus::Converged, "seed {seed}");
        assert_eq!(report.steps, 1, "seed {seed}");
    }
}

// ---------------------------------------------------------------------------
// Coach variants
// ---------------------------------------------------------------------------

#[test]
fn reflexive_never_needs_more_steps_than_direct() {
    let direct = config(CoachKind::Direct, FeedbackCondition::DeviationState);
    let reflexive = config(CoachKind::Reflexive, FeedbackCondition::DeviationState);

    for n in [3, 4] {
        let keys = sorting::keys(n);
        let policy: Arc<dyn ITargetPolicy> = Arc::new(BubbleSortPolicy::full(keys.clone()));
        for values in sorting::permutations(n) {
            let start = sorting::permutation_state(&keys, &values);
            let direct_report = Episode::new(start.clone(), Arc::clone(&policy), &direct)
                .unwrap()
                .run()
                .unwrap();
            let reflexive_report = Episode::new(start, Arc::clone(&policy), &reflexive)
                .unwrap()
                .run()
                .unwrap();
            assert_eq!(reflexive_report.status, EpisodeStatus::Converged);
            assert_eq!(reflexive_report.coach, CoachKind::Reflexive);
            assert!(
                reflexive_report.steps <= direct_report.steps,
                "{values:?}: reflexive {} > direct {}",
                reflexive_report.steps,
                direct_report.steps
            );
        }
    }
}

#[test]
fn reflexive_corrects_a_misleading_seed_rule() {
    // The seeded rule sends the learner off the oracle's path at the start.
    let wrong = Rule::new("R(wrong)", abc(3, 2, 1), Action::swap("b", "c"), 1);
    let config = config(CoachKind::Reflexive, FeedbackCondition::DeviationState);
    let mut episode = Episode::with_learner(
        abc(3, 2, 1),
        bubble(),
        Learner::with_rules(&[wrong.clone()]),
        &config,
    )
    .unwrap();

    let report = episode.run().unwrap();
    assert_eq!(report.status, EpisodeStatus::Converged);
    let hypothesis = episode.learner().hypothesis();
    assert!(!hypothesis.contains(&wrong));
    assert_eq!(
        hypothesis
            .rule_for_condition(&Condition::Exact(abc(3, 2, 1)))
            .unwrap()
            .action,
        Action::swap("a", "b")
    );
}

#[test]
fn partial_oracle_rules_converge_on_every_permutation() {
    let keys = sorting::keys(4);
    let policy: Arc<dyn ITargetPolicy> = Arc::new(BubbleSortPolicy::partial(keys.clone()));

    for kind in [CoachKind::Direct, CoachKind::Reflexive] {
        let config = config(kind, FeedbackCondition::OracleRule);
        for values in sorting::permutations(4) {
            let start = sorting::permutation_state(&keys, &values);
            let mut episode = Episode::new(start, Arc::clone(&policy), &config).unwrap();
            let report = episode.run().unwrap();
            assert_eq!(report.status, EpisodeStatus::Converged, "{kind} {values:?}");
            assert_eq!(report.steps == 0, sorting::inversions(&values) == 0);
            // Partial rules only ever bind the two swapped variables.
            for rule in episode.learner().hypothesis().rules() {
                assert_eq!(rule.condition.as_state().unwrap().len(), 2);
            }
        }
    }
}

#[test]
fn diverging_oracle_rejected_when_building_reflexive_episode() {
    let endless = Arc::new(PolicyFn::new(
        |s: &State| {
            let next = match s.get("n")? {
                Value::Int(n) => n + 1,
                Value::Sym(_) => 0,
            };
            Ok(Rule::new(
                "R(inc)",
                State::new(),
                Action::assign(State::new().with("n", next)),
                1,
            ))
        },
        |_: &State| false,
    ));
    let mut config = config(CoachKind::Reflexive, FeedbackCondition::DeviationState);
    config.coach.max_trajectory_len = 50;

    let err = Episode::new(State::new().with("n", 0), endless, &config)
        .err()
        .unwrap();
    assert!(matches!(
        err.as_coaching(),
        Some(CoachingError::OracleDiverged { limit: 50, .. })
    ));
}

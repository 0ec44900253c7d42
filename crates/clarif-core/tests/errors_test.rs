use clarif_core::errors::*;

#[test]
fn variable_not_found_carries_key_and_state() {
    let err = ClarifError::VariableNotFound {
        key: "z".into(),
        state: "a=1,b=2".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("'z'"));
    assert!(msg.contains("a=1,b=2"));
}

#[test]
fn stagnation_carries_steps_and_feedback() {
    let err = CoachingError::Stagnation {
        steps: 3,
        feedback: "R: IF {z=1} THEN swap(a, b) (priority: 1)".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("3 steps"));
    assert!(msg.contains("z=1"));
}

#[test]
fn oracle_diverged_carries_limit() {
    let err = CoachingError::OracleDiverged {
        start: "a=1".into(),
        limit: 50,
    };
    assert!(err.to_string().contains("50"));
}

// --- From impls ---

#[test]
fn coaching_error_converts_to_clarif_error() {
    let err: ClarifError = CoachingError::Stagnation {
        steps: 1,
        feedback: String::new(),
    }
    .into();
    assert!(err.is_stagnation());
    assert!(err.to_string().contains("coaching error"));
    assert!(matches!(
        err.as_coaching(),
        Some(CoachingError::Stagnation { steps: 1, .. })
    ));
}

#[test]
fn serde_error_converts_to_clarif_error() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
    let err: ClarifError = serde_err.into();
    assert!(matches!(err, ClarifError::SerializationError(_)));
    assert!(err.as_coaching().is_none());
}

#[test]
fn non_coaching_errors_are_not_stagnation() {
    let err = ClarifError::EpisodeFinished {
        status: "converged".into(),
    };
    assert!(!err.is_stagnation());
    assert!(err.to_string().contains("converged"));
}

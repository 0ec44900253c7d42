//! Actions: named, pure State → State transformations.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::errors::ClarifResult;

use super::state::State;

/// Signature of a user-supplied transformation.
pub type TransformFn = dyn Fn(&State) -> ClarifResult<State> + Send + Sync;

/// The transformation an action performs.
#[derive(Clone)]
pub enum Transform {
    /// Leaves the state unchanged. The falsy action.
    Identity,
    /// Exchanges the values of two variables.
    Swap(String, String),
    /// Writes the given bindings over the state.
    Assign(State),
    /// Arbitrary transformation identified by `id`.
    Custom { id: String, f: Arc<TransformFn> },
}

impl Transform {
    fn identity_key(&self) -> TransformKey<'_> {
        match self {
            Self::Identity => TransformKey::Identity,
            Self::Swap(left, right) => TransformKey::Swap(left, right),
            Self::Assign(bindings) => TransformKey::Assign(bindings),
            Self::Custom { id, .. } => TransformKey::Custom(id),
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
enum TransformKey<'a> {
    Identity,
    Swap(&'a str, &'a str),
    Assign(&'a State),
    Custom(&'a str),
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Swap(left, right) => write!(f, "Swap({left}, {right})"),
            Self::Assign(bindings) => write!(f, "Assign({bindings})"),
            Self::Custom { id, .. } => write!(f, "Custom({id})"),
        }
    }
}

/// A named transformation of a state into a new state.
///
/// Applying an action never mutates its argument. Two actions are equal iff
/// their transformations are the same (same variant and parameters, or the
/// same custom id); the display name plays no part.
#[derive(Debug, Clone)]
pub struct Action {
    name: String,
    transform: Transform,
}

impl Action {
    /// The no-op action.
    pub fn identity() -> Self {
        Self {
            name: "No action".to_string(),
            transform: Transform::Identity,
        }
    }

    pub fn swap(left: impl Into<String>, right: impl Into<String>) -> Self {
        let (left, right) = (left.into(), right.into());
        Self {
            name: format!("swap({left}, {right})"),
            transform: Transform::Swap(left, right),
        }
    }

    pub fn assign(bindings: State) -> Self {
        Self {
            name: format!("set({bindings})"),
            transform: Transform::Assign(bindings),
        }
    }

    /// Wrap a closure. Actions sharing an `id` compare equal, so the id must
    /// uniquely name the transformation.
    pub fn custom<F>(id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&State) -> ClarifResult<State> + Send + Sync + 'static,
    {
        let id = id.into();
        Self {
            name: id.clone(),
            transform: Transform::Custom { id, f: Arc::new(f) },
        }
    }

    /// Override the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn is_noop(&self) -> bool {
        matches!(self.transform, Transform::Identity)
    }

    /// Compute the successor state.
    pub fn apply(&self, state: &State) -> ClarifResult<State> {
        match &self.transform {
            Transform::Identity => Ok(state.clone()),
            Transform::Swap(left, right) => {
                let mut next = state.clone();
                next.swap(left, right)?;
                Ok(next)
            }
            Transform::Assign(bindings) => Ok(state.overlay(bindings)),
            Transform::Custom { f, .. } => f(state),
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.transform.identity_key() == other.transform.identity_key()
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.transform.identity_key().hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

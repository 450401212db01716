use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A stable, interned-cheap identifier for a [`crate::Question`].
///
/// Cloning a `QuestionId` is an `Arc` bump, not an allocation, since the same
/// id is copied into many places: dependency edges, visibility expressions,
/// scenario assignments.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Arc<str>);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId(Arc::from(s))
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        QuestionId(Arc::from(s.as_str()))
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({:?})", self.0)
    }
}

/// A stable identifier for a [`crate::Choice`], unique within its owning
/// question's domain (but not necessarily across the whole form).
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(Arc<str>);

impl ChoiceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChoiceId {
    fn from(s: &str) -> Self {
        ChoiceId(Arc::from(s))
    }
}

impl From<String> for ChoiceId {
    fn from(s: String) -> Self {
        ChoiceId(Arc::from(s.as_str()))
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChoiceId({:?})", self.0)
    }
}

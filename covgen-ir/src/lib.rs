//! Core data model shared by every stage of the coverage synthesis engine:
//! [`Question`]/[`Choice`]/[`Predicate`] as loaded from a form, the dense
//! [`QuestionIndex`] that gives every question a stable bit position, the
//! [`QuestionMask`] bitset built on top of it, and the error vocabulary for
//! malformed input.
//!
//! Nothing in this crate depends on any other `covgen-*` crate; everything
//! else depends on this one.

mod error;
mod ids;
mod index;
mod mask;
mod model;
mod predicate;
mod scenario;

pub use error::FormError;
pub use ids::{ChoiceId, QuestionId};
pub use index::QuestionIndex;
pub use mask::QuestionMask;
pub use model::{AnswerDomain, Choice, FormModel, Question};
pub use predicate::Predicate;
pub use scenario::Scenario;

use failure::Fail;

use covgen_ir::{ChoiceId, QuestionId};

/// Errors raised while translating predicates into the constraint model.
///
/// With predicates re-architected as a closed sum type (see
/// `covgen-ir::Predicate`), the "unsupported predicate shape" error kind
/// from the design has exactly one concrete manifestation: a leaf that
/// names a choice its question's domain doesn't actually declare.
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[fail(
        display = "predicate referencing `{}` names unknown choice `{}`",
        question, choice
    )]
    UnknownChoice {
        question: QuestionId,
        choice: ChoiceId,
    },
}

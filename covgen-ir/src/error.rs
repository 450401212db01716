use failure::Fail;

use crate::ids::QuestionId;

/// Errors raised while constructing or classifying a [`crate::FormModel`].
///
/// Every variant carries the offending identifier so the caller can report
/// it without re-deriving which question was at fault.
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[fail(display = "duplicate question id `{}`", _0)]
    DuplicateQuestionId(QuestionId),

    #[fail(display = "question `{}` has a duplicate choice encoding", _0)]
    DuplicateChoiceEncoding(QuestionId),

    #[fail(
        display = "question `{}`'s choice encodings are not contiguous starting at 1",
        _0
    )]
    NonContiguousEncoding(QuestionId),

    #[fail(
        display = "visibility predicate on `{}` references unknown question `{}`",
        gated, referenced
    )]
    UnknownReference {
        gated: QuestionId,
        referenced: QuestionId,
    },

    #[fail(
        display = "visibility predicate on `{}` references `{}`, which is not strictly earlier in ordinal order",
        gated, referenced
    )]
    ForwardReference {
        gated: QuestionId,
        referenced: QuestionId,
    },

    #[fail(display = "cyclic visibility dependency detected at `{}`", _0)]
    CyclicDependency(QuestionId),
}

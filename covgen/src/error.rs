use failure::Fail;

use covgen_encode::EncodeError;
use covgen_ir::FormError;

/// The two fatal, input-shaped error classes the engine can raise (§7).
/// Solver trouble during Phase 2/3 is not fatal — it is absorbed into
/// `TestPlan::partial` instead, per the spec's "partial coverage is a
/// reported outcome, not an error" rule.
#[derive(Fail, Debug)]
pub enum EngineError {
    #[fail(display = "malformed form: {}", _0)]
    Form(#[cause] FormError),

    #[fail(display = "encoding error: {}", _0)]
    Encode(#[cause] EncodeError),
}

impl From<FormError> for EngineError {
    fn from(err: FormError) -> Self {
        EngineError::Form(err)
    }
}

impl From<EncodeError> for EngineError {
    fn from(err: EncodeError) -> Self {
        EngineError::Encode(err)
    }
}

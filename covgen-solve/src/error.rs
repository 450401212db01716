use failure::Fail;

/// Errors the solver context can raise. The spec treats the solver as an
/// external service whose only recoverable failure mode is running out of
/// its time budget; anything else is a programming error in how the
/// Synthesizer drives the context (`push`/`pop` misuse, an undeclared
/// variable) and is handled with `panic!`/`expect` instead of a `Result`,
/// the same split the teacher's own solver layer draws between a genuine
/// `NoSolution` outcome and an internal invariant violation.
#[derive(Fail, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[fail(display = "solver exceeded its per-form time budget")]
    DeadlineExceeded,
}

//! The facade: wires Classifier → Encoder → Synthesizer → Minimizer into one
//! `run` call and assembles the reporting interface consumed by callers
//! (human-readable rendering, CSV dumps, directory-of-forms drivers — all of
//! that lives outside this crate).

mod error;
mod report;

pub use error::EngineError;
pub use report::{AnswerLabel, CoverageSummary, ScenarioReport, TestPlan};

use std::time::Duration;

use tracing::instrument;

use covgen_ir::FormModel;
use covgen_solve::BoundedIntSolver;

/// Per-form knobs. A form with no deadline runs the solver to exhaustion;
/// one with a deadline may come back marked "partial coverage" (§5, §7).
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub deadline: Option<Duration>,
}

impl EngineConfig {
    pub fn with_deadline(deadline: Duration) -> Self {
        EngineConfig {
            deadline: Some(deadline),
        }
    }
}

#[instrument(skip(form, config))]
pub fn run(form: &FormModel, config: &EngineConfig) -> Result<TestPlan, EngineError> {
    let classification = covgen_classify::classify(form)?;
    let model = covgen_encode::encode(form, &classification)?;

    let mut solver = match config.deadline {
        Some(budget) => BoundedIntSolver::with_deadline(budget),
        None => BoundedIntSolver::new(),
    };

    let outcome = covgen_synth::synthesize(form, &classification, &model, &mut solver);
    let selected = covgen_minimize::minimize(&outcome.pool, &outcome.universe);

    Ok(report::assemble(
        form,
        &classification,
        &outcome,
        &selected,
    ))
}

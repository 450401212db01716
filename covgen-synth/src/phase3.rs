use rustc_hash::FxHashSet;
use tracing::{instrument, warn};

use covgen_encode::{BoolExpr, ConstraintModel};
use covgen_ir::{FormModel, QuestionId, QuestionIndex, Scenario};
use covgen_solve::{SolveError, SolverContext};

use crate::build_scenario;

/// Phase 3: for the still-uncovered reachable questions `U`, repeatedly ask
/// the solver for a model satisfying `validity ∧ (∨ visible(q) for q in U)`,
/// turn the model into a scenario, and shrink `U` by whatever it newly
/// covers. Each iteration is guaranteed to remove at least one member of
/// `U` by construction of the query, so the loop is bounded by `|U|`.
#[instrument(skip(uncovered, form, index, model, solver))]
pub fn gap_fill<S: SolverContext>(
    mut uncovered: FxHashSet<QuestionId>,
    form: &FormModel,
    index: &QuestionIndex,
    model: &ConstraintModel,
    solver: &mut S,
) -> Result<Vec<Scenario>, SolveError> {
    let mut fresh = Vec::new();

    while !uncovered.is_empty() {
        let goal = BoolExpr::Or(
            uncovered
                .iter()
                .map(|q| model.visibility_of(q).clone())
                .collect(),
        );

        solver.push();
        solver.assert(goal);
        let sat = solver.check_sat();
        let model_assignment = solver.model();
        solver.pop();

        if !sat? {
            // Should not occur: Phase 2 already proved every member of `U`
            // reachable. Logged as an internal inconsistency; the
            // remaining members are reported unreachable by the caller.
            warn!(
                remaining = uncovered.len(),
                "gap-fill query unsatisfiable after Phase 2 reachability filter"
            );
            break;
        }

        let assignment = model_assignment.expect("sat result carries a model");
        let scenario = build_scenario(&assignment, form, model, index);

        uncovered.retain(|question| {
            let covers = index
                .index_of(question)
                .map_or(false, |i| scenario.visible.contains(i));
            !covers
        });

        fresh.push(scenario);
    }

    Ok(fresh)
}

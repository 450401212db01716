use rustc_hash::FxHashSet;
use tracing::instrument;

use covgen_encode::ConstraintModel;
use covgen_ir::{QuestionId, QuestionIndex, QuestionMask, Scenario};
use covgen_solve::{SolveError, SolverContext};

/// The outcome of Phase 2: the universe of questions this form can ever make
/// visible (i.e. required coverage), and the subset proven unreachable.
pub struct Inventory {
    pub universe: QuestionMask,
    pub dead: FxHashSet<QuestionId>,
}

/// Phase 2: compute the Phase-1 pool's coverage set, then ask the solver,
/// for each still-uncovered question, whether its visibility is
/// satisfiable under the validity model. A question the solver proves
/// unsatisfiable is "dead": design feedback, not an error, and is excluded
/// from the coverage target the Minimizer must hit.
#[instrument(skip(pool, index, model, solver))]
pub fn inventory<S: SolverContext>(
    pool: &[Scenario],
    index: &QuestionIndex,
    model: &ConstraintModel,
    solver: &mut S,
) -> Result<Inventory, SolveError> {
    let mut covered = QuestionMask::with_capacity(index.len());
    for scenario in pool {
        covered.union_with(&scenario.visible);
    }

    let mut universe = QuestionMask::with_capacity(index.len());
    let mut dead = FxHashSet::default();

    for (i, question) in index.ids().iter().enumerate() {
        if covered.contains(i) {
            // Already witnessed visible by a concrete Phase-1 scenario, so
            // it is trivially satisfiable; no need to ask the solver.
            universe.insert(i);
            continue;
        }

        solver.push();
        solver.assert(model.visibility_of(question).clone());
        let reachable = solver.check_sat();
        solver.pop();

        match reachable? {
            true => {
                universe.insert(i);
            }
            false => {
                dead.insert(question.clone());
            }
        }
    }

    Ok(Inventory { universe, dead })
}

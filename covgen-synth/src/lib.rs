//! The Synthesizer: produces a pool of valid scenarios in three phases —
//! branch-aware enumeration, coverage inventory, and solver-driven gap fill
//! — and reports the reachable-question universe and any proven-dead
//! questions along the way.

mod phase1;
mod phase2;
mod phase3;

pub use phase2::Inventory;

use rustc_hash::FxHashMap;
use tracing::{instrument, warn};

use covgen_classify::Classification;
use covgen_encode::ConstraintModel;
use covgen_ir::{FormModel, QuestionId, QuestionIndex, QuestionMask, Scenario};
use covgen_solve::{SolveError, SolverContext};

/// Everything the Minimizer and the facade need out of synthesis: the
/// scenario pool, the coverage target it should hit, which questions are
/// unreachable, and whether a solver deadline forced an early, partial
/// result.
pub struct SynthesisOutcome {
    pub pool: Vec<Scenario>,
    pub universe: QuestionMask,
    pub dead: rustc_hash::FxHashSet<QuestionId>,
    pub partial: bool,
}

#[instrument(skip(form, classification, model, solver))]
pub fn synthesize<S: SolverContext>(
    form: &FormModel,
    classification: &Classification,
    model: &ConstraintModel,
    solver: &mut S,
) -> SynthesisOutcome {
    for variable in &model.variables {
        solver.declare_variable(&variable.question, variable.domain_size);
    }
    solver.assert(model.validity());

    let pool = phase1::enumerate(form, classification, model);

    let mut partial = false;
    let mut covered = QuestionMask::with_capacity(classification.index.len());
    for scenario in &pool {
        covered.union_with(&scenario.visible);
    }

    let inventory = match phase2::inventory(&pool, &classification.index, model, solver) {
        Ok(inventory) => inventory,
        Err(SolveError::DeadlineExceeded) => {
            warn!("solver deadline exceeded during Phase 2 coverage inventory");
            partial = true;
            phase2::Inventory {
                universe: covered.clone(),
                dead: rustc_hash::FxHashSet::default(),
            }
        }
    };

    let mut pool = pool;
    if !partial {
        let uncovered: rustc_hash::FxHashSet<QuestionId> = inventory
            .universe
            .iter()
            .filter(|&i| !covered.contains(i))
            .map(|i| {
                classification
                    .index
                    .id_at(i)
                    .expect("index within universe capacity")
                    .clone()
            })
            .collect();

        if !uncovered.is_empty() {
            match phase3::gap_fill(uncovered, form, &classification.index, model, solver) {
                Ok(fresh) => pool.extend(fresh),
                Err(SolveError::DeadlineExceeded) => {
                    warn!("solver deadline exceeded during Phase 3 gap fill");
                    partial = true;
                }
            }
        }
    }

    SynthesisOutcome {
        pool,
        universe: inventory.universe,
        dead: inventory.dead,
        partial,
    }
}

/// Shared by Phase 1 (building a scenario from a fully-branched assignment)
/// and Phase 3 (building one from a solver model): evaluate every
/// question's encoded visibility expression against the assignment to
/// derive the scenario's visible-set.
fn build_scenario(
    assignment: &FxHashMap<QuestionId, u32>,
    form: &FormModel,
    model: &ConstraintModel,
    index: &QuestionIndex,
) -> Scenario {
    let mut visible = QuestionMask::with_capacity(index.len());
    for question in form.questions() {
        if model.visibility_of(&question.id).eval(assignment) {
            let i = index
                .index_of(&question.id)
                .expect("every form question is indexed");
            visible.insert(i);
        }
    }

    Scenario {
        assignment: assignment.clone(),
        visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covgen_ir::{AnswerDomain, Choice, FormModel, Predicate, Question};
    use covgen_solve::BoundedIntSolver;

    fn enumerated(choices: &[&str]) -> AnswerDomain {
        AnswerDomain::Enumerated(
            choices
                .iter()
                .enumerate()
                .map(|(i, c)| Choice::new(*c, *c, (i as u32) + 1))
                .collect(),
        )
    }

    /// S4 from the spec's concrete-scenario suite: two independent gates
    /// whose conjunctions pick out two disjoint, otherwise-uncovered
    /// questions. Phase 1 alone should already cover everything (no
    /// gap-fill needed) because both gatekeepers are fully enumerated.
    #[test]
    fn disjunctive_gap_is_covered_by_enumeration_alone() {
        let form = FormModel::new(vec![
            Question { id: "q1".into(), ordinal: 0, label: "q1".into(), domain: enumerated(&["1", "2"]), visibility: None },
            Question { id: "q2".into(), ordinal: 1, label: "q2".into(), domain: enumerated(&["1", "2"]), visibility: None },
            Question {
                id: "q3".into(), ordinal: 2, label: "q3".into(), domain: enumerated(&["only"]),
                visibility: Some(Predicate::And(vec![
                    Predicate::Equals { question: "q1".into(), choice: "2".into() },
                    Predicate::Equals { question: "q2".into(), choice: "2".into() },
                ])),
            },
            Question {
                id: "q4".into(), ordinal: 3, label: "q4".into(), domain: enumerated(&["only"]),
                visibility: Some(Predicate::And(vec![
                    Predicate::Equals { question: "q1".into(), choice: "2".into() },
                    Predicate::Equals { question: "q2".into(), choice: "1".into() },
                ])),
            },
        ]).unwrap();

        let classification = covgen_classify::classify(&form).unwrap();
        let model = covgen_encode::encode(&form, &classification).unwrap();
        let mut solver = BoundedIntSolver::new();
        let outcome = synthesize(&form, &classification, &model, &mut solver);

        assert!(!outcome.partial);
        assert!(outcome.dead.is_empty());

        let mut covered = QuestionMask::with_capacity(classification.index.len());
        for scenario in &outcome.pool {
            covered.union_with(&scenario.visible);
        }
        assert_eq!(covered.count_ones(), outcome.universe.count_ones());
    }

    /// S5 from the spec: Q3 is only visible when Q1=a and Q2=x, but Q2 is
    /// itself only ever visible (hence only ever answerable) when Q1=b —
    /// so the conjunction can never hold and Q3 is unreachable dead weight.
    #[test]
    fn unreachable_question_is_reported_dead() {
        let form = FormModel::new(vec![
            Question {
                id: "q1".into(), ordinal: 0, label: "q1".into(),
                domain: enumerated(&["a", "b"]), visibility: None,
            },
            Question {
                id: "q2".into(), ordinal: 1, label: "q2".into(),
                domain: enumerated(&["x", "y"]),
                visibility: Some(Predicate::Equals { question: "q1".into(), choice: "b".into() }),
            },
            Question {
                id: "q3".into(), ordinal: 2, label: "q3".into(),
                domain: enumerated(&["only"]),
                visibility: Some(Predicate::And(vec![
                    Predicate::Equals { question: "q1".into(), choice: "a".into() },
                    Predicate::Equals { question: "q2".into(), choice: "x".into() },
                ])),
            },
        ]).unwrap();

        let classification = covgen_classify::classify(&form).unwrap();
        let model = covgen_encode::encode(&form, &classification).unwrap();
        let mut solver = BoundedIntSolver::new();
        let outcome = synthesize(&form, &classification, &model, &mut solver);

        assert!(!outcome.partial);
        assert!(outcome.dead.contains(&"q3".into()));
        let q3 = classification.index.index_of(&"q3".into()).unwrap();
        assert!(!outcome.universe.contains(q3));
    }
}

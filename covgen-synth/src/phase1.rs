use rustc_hash::FxHashMap;
use tracing::{instrument, warn};

use covgen_classify::Classification;
use covgen_encode::ConstraintModel;
use covgen_ir::{FormModel, QuestionId, QuestionIndex, Scenario};

use crate::build_scenario;

/// Phase 1: branch-aware enumeration over the dependency DAG in topological
/// order. Invisible variables collapse to the single value `0` instead of
/// branching, which is what keeps this far smaller than the unconstrained
/// cartesian product of every test variable's domain.
#[instrument(skip(form, classification, model))]
pub fn enumerate(
    form: &FormModel,
    classification: &Classification,
    model: &ConstraintModel,
) -> Vec<Scenario> {
    let domain_sizes: FxHashMap<QuestionId, u32> = model
        .variables
        .iter()
        .map(|v| (v.question.clone(), v.domain_size))
        .collect();

    let mut pool = Vec::new();
    let mut assignment = FxHashMap::default();
    branch(
        0,
        &classification.topo_order,
        &domain_sizes,
        form,
        model,
        &classification.index,
        &mut assignment,
        &mut pool,
    );
    pool
}

#[allow(clippy::too_many_arguments)]
fn branch(
    position: usize,
    topo_order: &[QuestionId],
    domain_sizes: &FxHashMap<QuestionId, u32>,
    form: &FormModel,
    model: &ConstraintModel,
    index: &QuestionIndex,
    assignment: &mut FxHashMap<QuestionId, u32>,
    pool: &mut Vec<Scenario>,
) {
    if position == topo_order.len() {
        let scenario = build_scenario(assignment, form, model, index);
        if is_valid(&scenario, assignment, index) {
            pool.push(scenario);
        } else {
            // Safety net only: the ordinal invariant and the transitively
            // conjoined encoding should make this unreachable.
            warn!("discarding scenario that violates the validity invariant");
        }
        return;
    }

    let question = &topo_order[position];
    let visible = model.visibility_of(question).eval(assignment);

    // Tie-break / ordering: nonzero choices are tried in encoding order
    // (1, 2, ...) so Phase 1's output is deterministic.
    let candidates: Vec<u32> = if visible {
        let domain_size = domain_sizes[question];
        (1..=domain_size).collect()
    } else {
        vec![0]
    };

    for value in candidates {
        assignment.insert(question.clone(), value);
        branch(
            position + 1,
            topo_order,
            domain_sizes,
            form,
            model,
            index,
            assignment,
            pool,
        );
    }
    assignment.remove(question);
}

fn is_valid(
    scenario: &Scenario,
    assignment: &FxHashMap<QuestionId, u32>,
    index: &QuestionIndex,
) -> bool {
    assignment.iter().all(|(question, &value)| {
        if value == 0 {
            return true;
        }
        index
            .index_of(question)
            .map_or(false, |i| scenario.visible.contains(i))
    })
}

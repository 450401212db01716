use rustc_hash::FxHashMap;
use serde::Serialize;

use covgen_classify::Classification;
use covgen_ir::{FormModel, QuestionId};
use covgen_minimize::SelectedScenario;
use covgen_synth::SynthesisOutcome;

/// A test variable's chosen answer under one scenario: either the label of
/// the choice it was assigned, or "not answered" when the variable carries
/// the reserved value `0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerLabel {
    Answered(String),
    NotAnswered,
}

/// One emitted test case: the test-variable answers that produce it, every
/// question it makes visible, and which of those questions were not yet
/// covered by any earlier scenario in the plan.
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub answers: FxHashMap<QuestionId, AnswerLabel>,
    pub visible: Vec<QuestionId>,
    pub newly_covered: Vec<QuestionId>,
}

/// The summary header: how much of the form this plan accounts for.
#[derive(Clone, Debug, Serialize)]
pub struct CoverageSummary {
    pub total_questions: u32,
    pub reachable_questions: u32,
    pub covered_questions: u32,
    pub coverage_percent: f64,
    pub dead_questions: u32,
}

/// The full reporting interface the engine exposes per form (§6): the
/// minimized scenario list, the classification maps, the reverse-dependency
/// map, and the coverage summary. Rendering this as human-readable text or
/// a CSV index is left to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct TestPlan {
    pub scenarios: Vec<ScenarioReport>,
    pub test_variables: Vec<QuestionId>,
    pub gatekeepers: Vec<QuestionId>,
    pub data_collection: Vec<QuestionId>,
    /// Who each question gates, i.e. the Classifier's forward graph (§1, §2).
    pub forward_dependencies: FxHashMap<QuestionId, Vec<QuestionId>>,
    /// Who gates each question, i.e. the Classifier's reverse graph.
    pub reverse_dependencies: FxHashMap<QuestionId, Vec<QuestionId>>,
    pub dead: Vec<QuestionId>,
    pub summary: CoverageSummary,
    /// Set when a solver deadline cut synthesis short; the plan still
    /// satisfies every invariant over what it *did* cover, it just may not
    /// be complete (§5, §7).
    pub partial: bool,
}

pub(crate) fn assemble(
    form: &FormModel,
    classification: &Classification,
    outcome: &SynthesisOutcome,
    selected: &[SelectedScenario],
) -> TestPlan {
    let index = &classification.index;

    let scenarios = selected
        .iter()
        .map(|s| {
            let scenario = &outcome.pool[s.pool_index];

            let answers = classification
                .topo_order
                .iter()
                .map(|question_id| {
                    let value = scenario.assignment.get(question_id).copied().unwrap_or(0);
                    let label = if value == 0 {
                        AnswerLabel::NotAnswered
                    } else {
                        let question = form
                            .question(question_id)
                            .expect("classified test variable exists in form");
                        let label = question
                            .domain
                            .choices()
                            .iter()
                            .find(|c| c.encoding == value)
                            .map(|c| c.label.clone())
                            .unwrap_or_else(|| value.to_string());
                        AnswerLabel::Answered(label)
                    };
                    (question_id.clone(), label)
                })
                .collect();

            let visible = index
                .ids()
                .iter()
                .enumerate()
                .filter(|(i, _)| scenario.visible.contains(*i))
                .map(|(_, id)| id.clone())
                .collect();

            let newly_covered = index
                .ids()
                .iter()
                .enumerate()
                .filter(|(i, _)| s.newly_covered.contains(*i))
                .map(|(_, id)| id.clone())
                .collect();

            ScenarioReport {
                answers,
                visible,
                newly_covered,
            }
        })
        .collect();

    let forward_dependencies = index
        .ids()
        .iter()
        .map(|id| {
            let mut gates: Vec<QuestionId> =
                classification.graph.gates(id).iter().cloned().collect();
            gates.sort_by_key(|g| index.index_of(g).unwrap_or(usize::MAX));
            (id.clone(), gates)
        })
        .collect();

    let reverse_dependencies = index
        .ids()
        .iter()
        .map(|id| {
            let mut gated_by: Vec<QuestionId> =
                classification.graph.gated_by(id).iter().cloned().collect();
            gated_by.sort_by_key(|g| index.index_of(g).unwrap_or(usize::MAX));
            (id.clone(), gated_by)
        })
        .collect();

    let mut dead: Vec<QuestionId> = outcome.dead.iter().cloned().collect();
    dead.sort_by_key(|id| index.index_of(id).unwrap_or(usize::MAX));

    let mut covered = covgen_ir::QuestionMask::with_capacity(index.len());
    for s in selected {
        covered.union_with(&outcome.pool[s.pool_index].visible);
    }

    let total_questions = index.len() as u32;
    let reachable_questions = outcome.universe.count_ones();
    let covered_questions = covered.count_ones();
    let coverage_percent = if total_questions == 0 {
        100.0
    } else {
        (covered_questions as f64 / total_questions as f64) * 100.0
    };

    let mut test_variables: Vec<QuestionId> = classification.test_variables.iter().cloned().collect();
    test_variables.sort_by_key(|id| index.index_of(id).unwrap_or(usize::MAX));

    let mut data_collection: Vec<QuestionId> =
        classification.data_collection.iter().cloned().collect();
    data_collection.sort_by_key(|id| index.index_of(id).unwrap_or(usize::MAX));

    TestPlan {
        scenarios,
        test_variables,
        gatekeepers: classification.gatekeepers.clone(),
        data_collection,
        forward_dependencies,
        reverse_dependencies,
        dead,
        summary: CoverageSummary {
            total_questions,
            reachable_questions,
            covered_questions,
            coverage_percent,
            dead_questions: outcome.dead.len() as u32,
        },
        partial: outcome.partial,
    }
}

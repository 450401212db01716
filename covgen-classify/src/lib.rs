//! The Classifier: partitions a form's questions into test variables,
//! gatekeepers, and data-collection questions, and materializes the forward
//! and reverse dependency graphs between them.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::instrument;

use covgen_ir::{FormError, FormModel, QuestionId, QuestionIndex};

/// The forward graph (who gates whom) and its reverse (who is gated by
/// whom), both keyed by every question in the form (test variables and
/// data-collection questions alike, so lookups never need an `Option`).
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    forward: FxHashMap<QuestionId, FxHashSet<QuestionId>>,
    reverse: FxHashMap<QuestionId, FxHashSet<QuestionId>>,
}

impl DependencyGraph {
    /// Questions whose visibility predicate mentions `id` — i.e. the
    /// questions `id` gates.
    pub fn gates(&self, id: &QuestionId) -> &FxHashSet<QuestionId> {
        self.forward.get(id).unwrap_or_else(|| empty_set())
    }

    /// Questions `id`'s own visibility predicate mentions — i.e. the
    /// questions that gate `id`.
    pub fn gated_by(&self, id: &QuestionId) -> &FxHashSet<QuestionId> {
        self.reverse.get(id).unwrap_or_else(|| empty_set())
    }
}

/// A shared, never-mutated empty set so `gates`/`gated_by` can return a
/// borrowed `&FxHashSet` even for questions with no edges.
fn empty_set() -> &'static FxHashSet<QuestionId> {
    static CELL: std::sync::OnceLock<FxHashSet<QuestionId>> = std::sync::OnceLock::new();
    CELL.get_or_init(FxHashSet::default)
}

/// The output of classification: the dependency graph plus the three
/// partitions of questions it implies, and a topological order over test
/// variables the Synthesizer enumerates in.
#[derive(Clone, Debug)]
pub struct Classification {
    pub graph: DependencyGraph,
    pub index: QuestionIndex,
    pub test_variables: FxHashSet<QuestionId>,
    /// Test variables with no incoming dependency edge, in ordinal order.
    pub gatekeepers: Vec<QuestionId>,
    pub data_collection: FxHashSet<QuestionId>,
    /// Test variables in ordinal order, which is also a valid topological
    /// order: a predicate may only reference strictly earlier questions, so
    /// sorting by ordinal can never place a dependency after its dependent.
    pub topo_order: Vec<QuestionId>,
}

impl Classification {
    pub fn is_test_variable(&self, id: &QuestionId) -> bool {
        self.test_variables.contains(id)
    }
}

#[instrument(skip(form))]
pub fn classify(form: &FormModel) -> Result<Classification, FormError> {
    let index = QuestionIndex::build(form);

    let mut forward: FxHashMap<QuestionId, FxHashSet<QuestionId>> = FxHashMap::default();
    let mut reverse: FxHashMap<QuestionId, FxHashSet<QuestionId>> = FxHashMap::default();
    for question in form.questions() {
        forward.entry(question.id.clone()).or_default();
        reverse.entry(question.id.clone()).or_default();
    }

    for gated in form.questions() {
        let predicate = match &gated.visibility {
            Some(p) => p,
            None => continue,
        };

        for referenced in predicate.referenced_questions() {
            if referenced == gated.id {
                return Err(FormError::CyclicDependency(gated.id.clone()));
            }

            let referenced_question = form.question(&referenced).ok_or_else(|| {
                FormError::UnknownReference {
                    gated: gated.id.clone(),
                    referenced: referenced.clone(),
                }
            })?;

            if referenced_question.ordinal >= gated.ordinal {
                return Err(FormError::ForwardReference {
                    gated: gated.id.clone(),
                    referenced: referenced.clone(),
                });
            }

            forward.get_mut(&referenced).unwrap().insert(gated.id.clone());
            reverse.get_mut(&gated.id).unwrap().insert(referenced.clone());
        }
    }

    let test_variables: FxHashSet<QuestionId> = forward
        .iter()
        .filter(|(_, gated_set)| !gated_set.is_empty())
        .map(|(id, _)| id.clone())
        .collect();

    let topo_order: Vec<QuestionId> = form
        .questions()
        .iter()
        .map(|q| q.id.clone())
        .filter(|id| test_variables.contains(id))
        .collect();

    let gatekeepers: Vec<QuestionId> = topo_order
        .iter()
        .filter(|id| reverse.get(*id).map_or(true, |incoming| incoming.is_empty()))
        .cloned()
        .collect();

    let data_collection: FxHashSet<QuestionId> = form
        .questions()
        .iter()
        .map(|q| q.id.clone())
        .filter(|id| !test_variables.contains(id))
        .collect();

    Ok(Classification {
        graph: DependencyGraph { forward, reverse },
        index,
        test_variables,
        gatekeepers,
        data_collection,
        topo_order,
    })
}

use rustc_hash::FxHashMap;

use crate::ids::QuestionId;
use crate::model::FormModel;

/// A dense `QuestionId <-> usize` mapping, assigned once from the form's
/// ordinal order and shared read-only by every downstream stage so that a
/// [`crate::QuestionMask`] bit position means the same question everywhere
/// in the pipeline.
#[derive(Clone, Debug)]
pub struct QuestionIndex {
    order: Vec<QuestionId>,
    position: FxHashMap<QuestionId, usize>,
}

impl QuestionIndex {
    pub fn build(form: &FormModel) -> Self {
        let order: Vec<QuestionId> = form.questions().iter().map(|q| q.id.clone()).collect();
        let position = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        QuestionIndex { order, position }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn index_of(&self, id: &QuestionId) -> Option<usize> {
        self.position.get(id).copied()
    }

    pub fn id_at(&self, index: usize) -> Option<&QuestionId> {
        self.order.get(index)
    }

    pub fn ids(&self) -> &[QuestionId] {
        &self.order
    }
}

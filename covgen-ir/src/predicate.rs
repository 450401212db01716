use serde::{Deserialize, Serialize};

use crate::ids::{ChoiceId, QuestionId};

/// A boolean visibility predicate, as it appears on a [`crate::Question`].
///
/// Leaves always reference a `(question, choice)` pair; `And`/`Or`/`Not`
/// compose leaves (and other compositions) into arbitrary boolean trees.
/// Predicate nesting in practice is shallow, so evaluation and reference
/// collection are both plain recursion with no explicit stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Equals { question: QuestionId, choice: ChoiceId },
    NotEquals { question: QuestionId, choice: ChoiceId },
    InSet { question: QuestionId, choices: Vec<ChoiceId> },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Every question this predicate (or any of its sub-predicates)
    /// references, in first-encountered order with duplicates removed.
    pub fn referenced_questions(&self) -> Vec<QuestionId> {
        let mut out = Vec::new();
        self.collect_referenced_questions(&mut out);
        out
    }

    fn collect_referenced_questions(&self, out: &mut Vec<QuestionId>) {
        match self {
            Predicate::Equals { question, .. } | Predicate::NotEquals { question, .. } => {
                push_unique(out, question.clone());
            }
            Predicate::InSet { question, .. } => push_unique(out, question.clone()),
            Predicate::And(terms) | Predicate::Or(terms) => {
                for term in terms {
                    term.collect_referenced_questions(out);
                }
            }
            Predicate::Not(inner) => inner.collect_referenced_questions(out),
        }
    }
}

fn push_unique(out: &mut Vec<QuestionId>, id: QuestionId) {
    if !out.contains(&id) {
        out.push(id);
    }
}

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::ids::{ChoiceId, QuestionId};
use crate::predicate::Predicate;

/// A single named option within an enumerated [`AnswerDomain`].
///
/// `encoding` is the positive integer the Encoder will use to represent this
/// choice inside the constraint model; encoding `0` is reserved globally for
/// "unanswered / not visible" and is never assigned to a `Choice`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub label: String,
    pub encoding: u32,
}

impl Choice {
    pub fn new(id: impl Into<ChoiceId>, label: impl Into<String>, encoding: u32) -> Self {
        Choice {
            id: id.into(),
            label: label.into(),
            encoding,
        }
    }
}

/// The shape of a question's answer space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerDomain {
    /// An ordered set of named choices, each with a distinct positive
    /// encoding covering the contiguous range `[1..=choices.len()]`.
    Enumerated(Vec<Choice>),
    /// A free-form / non-enumerated domain. Such a question can still be a
    /// data-collection question; see `covgen-encode` for how (and whether)
    /// it can be referenced by a predicate.
    FreeForm,
}

impl AnswerDomain {
    pub fn choices(&self) -> &[Choice] {
        match self {
            AnswerDomain::Enumerated(choices) => choices,
            AnswerDomain::FreeForm => &[],
        }
    }

    pub fn choice_by_id(&self, id: &ChoiceId) -> Option<&Choice> {
        self.choices().iter().find(|c| &c.id == id)
    }
}

/// One question in a form.
///
/// `ordinal` fixes the question's position in the form; the
/// earlier-than-ordinal invariant on [`Predicate`] references is what lets
/// the Classifier guarantee the dependency graph is acyclic without doing a
/// separate cycle search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub ordinal: u32,
    pub label: String,
    pub domain: AnswerDomain,
    pub visibility: Option<Predicate>,
}

/// A fully loaded, structurally valid form.
///
/// Construction validates the invariants that belong to the data model
/// itself (unique ids, well-formed choice encodings). It does *not* validate
/// predicate references or acyclicity — those cross-question invariants are
/// the Classifier's job, since checking them requires the dependency graph
/// the Classifier builds anyway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormModel {
    questions: Vec<Question>,
}

impl FormModel {
    pub fn new(mut questions: Vec<Question>) -> Result<Self, FormError> {
        questions.sort_by_key(|q| q.ordinal);

        let mut seen = FxHashSet::default();
        for question in &questions {
            if !seen.insert(question.id.clone()) {
                return Err(FormError::DuplicateQuestionId(question.id.clone()));
            }
            validate_choice_encodings(question)?;
        }

        Ok(FormModel { questions })
    }

    /// All questions, in ascending ordinal order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.question(id).is_some()
    }
}

fn validate_choice_encodings(question: &Question) -> Result<(), FormError> {
    let choices = match &question.domain {
        AnswerDomain::Enumerated(choices) => choices,
        AnswerDomain::FreeForm => return Ok(()),
    };

    let mut encodings: Vec<u32> = choices.iter().map(|c| c.encoding).collect();
    encodings.sort_unstable();

    let mut dedup = encodings.clone();
    dedup.dedup();
    if dedup.len() != encodings.len() {
        return Err(FormError::DuplicateChoiceEncoding(question.id.clone()));
    }

    let contiguous = encodings
        .iter()
        .enumerate()
        .all(|(i, &enc)| enc == (i as u32) + 1);
    if !contiguous {
        return Err(FormError::NonContiguousEncoding(question.id.clone()));
    }

    Ok(())
}

//! The Encoder: assigns each test variable a bounded integer domain and
//! translates every question's visibility predicate into a [`BoolExpr`]
//! over those domains, including the transitive conjunction with every
//! ancestor's own visibility.

mod error;
mod expr;

pub use error::EncodeError;
pub use expr::BoolExpr;

use rustc_hash::FxHashMap;
use tracing::instrument;

use covgen_classify::Classification;
use covgen_ir::{AnswerDomain, FormModel, Predicate, Question, QuestionId};

/// A test variable's declared integer domain: it ranges over
/// `0..=domain_size`, where `0` means "not answered / not visible" and
/// `1..=domain_size` are the question's choice encodings in declaration
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedVariable {
    pub question: QuestionId,
    pub domain_size: u32,
}

/// The reusable output of the Encoder: one declared variable per test
/// variable, and one visibility expression per question in the form (test
/// variable or not — data-collection questions still need a visibility
/// expression so the Synthesizer can tell whether they're covered).
#[derive(Clone, Debug)]
pub struct ConstraintModel {
    pub variables: Vec<EncodedVariable>,
    visibility: FxHashMap<QuestionId, BoolExpr>,
}

impl ConstraintModel {
    pub fn visibility_of(&self, question: &QuestionId) -> &BoolExpr {
        self.visibility
            .get(question)
            .expect("every form question has an encoded visibility expression")
    }

    /// `∧_V (V ≠ 0 ⇒ visible(V))` over every declared test variable — the
    /// validity constraint shipped to the solver as the base, monotonic
    /// assumption of the solver context (see `covgen-solve`).
    pub fn validity(&self) -> BoolExpr {
        BoolExpr::And(
            self.variables
                .iter()
                .map(|v| {
                    BoolExpr::Or(vec![
                        BoolExpr::Eq(v.question.clone(), 0),
                        self.visibility_of(&v.question).clone(),
                    ])
                })
                .collect(),
        )
    }
}

#[instrument(skip(form, classification))]
pub fn encode(
    form: &FormModel,
    classification: &Classification,
) -> Result<ConstraintModel, EncodeError> {
    let variables: Vec<EncodedVariable> = classification
        .topo_order
        .iter()
        .map(|id| {
            let question = form
                .question(id)
                .expect("classified test variable exists in form");
            EncodedVariable {
                question: id.clone(),
                domain_size: domain_size(question),
            }
        })
        .collect();

    // Questions are visited in ordinal order (guaranteed by `FormModel`),
    // which is exactly the order needed to look up an already-encoded
    // visibility expression for every referenced (necessarily earlier)
    // question.
    let mut visibility: FxHashMap<QuestionId, BoolExpr> = FxHashMap::default();
    for question in form.questions() {
        let expr = encode_visibility(form, question, &visibility)?;
        visibility.insert(question.id.clone(), expr);
    }

    Ok(ConstraintModel {
        variables,
        visibility,
    })
}

fn domain_size(question: &Question) -> u32 {
    match &question.domain {
        AnswerDomain::Enumerated(choices) => choices.len() as u32,
        // The predicate grammar's leaves are (question, choice) pairs, so a
        // free-form question can never actually be referenced by a
        // downstream predicate and therefore never becomes a test variable
        // in practice. We still give it a one-value ("other") domain rather
        // than refusing to encode it, so an encoder run never panics on a
        // form that declares one. See DESIGN.md, Open Question (b).
        AnswerDomain::FreeForm => 1,
    }
}

fn encode_visibility(
    form: &FormModel,
    question: &Question,
    computed: &FxHashMap<QuestionId, BoolExpr>,
) -> Result<BoolExpr, EncodeError> {
    let predicate = match &question.visibility {
        None => return Ok(BoolExpr::Const(true)),
        Some(predicate) => predicate,
    };

    let mut conjuncts = vec![encode_predicate(form, predicate)?];
    for referenced in predicate.referenced_questions() {
        let ancestor_visibility = computed
            .get(&referenced)
            .expect("classifier guarantees referenced questions are encoded first")
            .clone();
        conjuncts.push(ancestor_visibility);
    }

    Ok(BoolExpr::And(conjuncts))
}

fn encode_predicate(form: &FormModel, predicate: &Predicate) -> Result<BoolExpr, EncodeError> {
    match predicate {
        Predicate::Equals { question, choice } => {
            Ok(BoolExpr::Eq(question.clone(), encoding_of(form, question, choice)?))
        }
        Predicate::NotEquals { question, choice } => Ok(BoolExpr::NotEq(
            question.clone(),
            encoding_of(form, question, choice)?,
        )),
        Predicate::InSet { question, choices } => {
            let encodings = choices
                .iter()
                .map(|choice| encoding_of(form, question, choice))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(BoolExpr::In(question.clone(), encodings))
        }
        Predicate::And(terms) => Ok(BoolExpr::And(
            terms
                .iter()
                .map(|term| encode_predicate(form, term))
                .collect::<Result<_, _>>()?,
        )),
        Predicate::Or(terms) => Ok(BoolExpr::Or(
            terms
                .iter()
                .map(|term| encode_predicate(form, term))
                .collect::<Result<_, _>>()?,
        )),
        Predicate::Not(inner) => Ok(BoolExpr::Not(Box::new(encode_predicate(form, inner)?))),
    }
}

fn encoding_of(
    form: &FormModel,
    question: &QuestionId,
    choice: &covgen_ir::ChoiceId,
) -> Result<u32, EncodeError> {
    let question = form
        .question(question)
        .expect("classifier already validated this reference");
    question
        .domain
        .choice_by_id(choice)
        .map(|c| c.encoding)
        .ok_or_else(|| EncodeError::UnknownChoice {
            question: question.id.clone(),
            choice: choice.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use covgen_ir::{AnswerDomain, Choice, FormModel, Predicate, Question};

    fn enumerated(choices: &[&str]) -> AnswerDomain {
        AnswerDomain::Enumerated(
            choices
                .iter()
                .enumerate()
                .map(|(i, c)| Choice::new(*c, *c, (i as u32) + 1))
                .collect(),
        )
    }

    #[test]
    fn chained_visibility_conjoins_ancestors() {
        let form = FormModel::new(vec![
            Question {
                id: "q1".into(),
                ordinal: 0,
                label: "q1".into(),
                domain: enumerated(&["a", "b"]),
                visibility: None,
            },
            Question {
                id: "q2".into(),
                ordinal: 1,
                label: "q2".into(),
                domain: enumerated(&["x", "y"]),
                visibility: Some(Predicate::Equals {
                    question: "q1".into(),
                    choice: "a".into(),
                }),
            },
            Question {
                id: "q3".into(),
                ordinal: 2,
                label: "q3".into(),
                domain: enumerated(&["m"]),
                visibility: Some(Predicate::Equals {
                    question: "q2".into(),
                    choice: "x".into(),
                }),
            },
        ])
        .unwrap();

        let classification = covgen_classify::classify(&form).unwrap();
        let model = encode(&form, &classification).unwrap();

        let mut visible = FxHashMap::default();
        visible.insert(QuestionId::from("q1"), 1u32); // a
        visible.insert(QuestionId::from("q2"), 1u32); // x
        assert!(model.visibility_of(&"q3".into()).eval(&visible));

        // q1=b makes q2 (and therefore q3) invisible, even if q2's own
        // integer slot were (invalidly) set to 1.
        let mut invisible = FxHashMap::default();
        invisible.insert(QuestionId::from("q1"), 2u32); // b
        invisible.insert(QuestionId::from("q2"), 1u32);
        assert!(!model.visibility_of(&"q3".into()).eval(&invisible));
    }
}

//! Shared fixture helpers for the scenario tests in this crate, in the
//! spirit of chalk's own `test_util` module: small declarative builders so
//! each scenario test reads as close to the spec's literal description as
//! possible.

use covgen::{run, EngineConfig, TestPlan};
use covgen_ir::{AnswerDomain, Choice, FormModel, Predicate, Question};

/// An enumerated domain from a bare list of choice ids; choice id and label
/// are the same string, and encodings are assigned 1-based in order.
pub fn enumerated(choices: &[&str]) -> AnswerDomain {
    AnswerDomain::Enumerated(
        choices
            .iter()
            .enumerate()
            .map(|(i, c)| Choice::new(*c, *c, (i as u32) + 1))
            .collect(),
    )
}

/// One question, terse enough to write a whole form as a `vec![q(...), ...]`.
pub fn q(id: &str, ordinal: u32, choices: &[&str], visibility: Option<Predicate>) -> Question {
    Question {
        id: id.into(),
        ordinal,
        label: id.to_string(),
        domain: enumerated(choices),
        visibility,
    }
}

pub fn equals(question: &str, choice: &str) -> Predicate {
    Predicate::Equals {
        question: question.into(),
        choice: choice.into(),
    }
}

pub fn and(terms: Vec<Predicate>) -> Predicate {
    Predicate::And(terms)
}

pub fn form(questions: Vec<Question>) -> FormModel {
    FormModel::new(questions).expect("fixture forms are well-formed by construction")
}

pub fn plan(form: &FormModel) -> TestPlan {
    run(form, &EngineConfig::default()).expect("fixture forms synthesize without error")
}

/// Asserts that a plan's scenarios jointly cover exactly the given question
/// ids, no more and no less, regardless of which scenario covers what.
pub fn assert_plan_covers(plan: &TestPlan, expected: &[&str]) {
    let mut covered: Vec<String> = plan
        .scenarios
        .iter()
        .flat_map(|s| s.visible.iter().map(|id| id.as_str().to_string()))
        .collect();
    covered.sort();
    covered.dedup();

    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();

    assert_eq!(
        covered, expected,
        "plan's covered questions did not match the expected set"
    );
}

mod support;

use covgen::AnswerLabel;
use covgen_ir::FormModel;

use support::{and, equals, form, plan, q};

fn sample_form() -> FormModel {
    form(vec![
        q("q1", 0, &["a", "b"], None),
        q("q2", 1, &["x", "y"], Some(equals("q1", "a"))),
        q(
            "q3",
            2,
            &["only"],
            Some(and(vec![equals("q1", "a"), equals("q2", "x")])),
        ),
    ])
}

/// Invariant 1: for every emitted scenario, a test variable answered with
/// a real choice must have its own question visible (the converse — a
/// variable carrying "not answered" — is unconstrained, since a question
/// can be invisible without ever having been a candidate for an answer).
#[test]
fn answered_variables_are_always_visible() {
    let f = sample_form();
    let result = plan(&f);

    for scenario in &result.scenarios {
        for (question_id, answer) in &scenario.answers {
            if matches!(answer, AnswerLabel::Answered(_)) {
                assert!(
                    scenario.visible.iter().any(|id| id == question_id),
                    "{question_id} was answered but not marked visible"
                );
            }
        }
    }
}

/// Invariant 3: the minimized plan's coverage equals the full reachable
/// universe the Synthesizer reported — i.e. the Minimizer never drops
/// required coverage on the way to a smaller subset.
#[test]
fn minimized_plan_covers_the_full_reachable_universe() {
    let f = sample_form();
    let result = plan(&f);

    let mut covered: std::collections::HashSet<String> = Default::default();
    for scenario in &result.scenarios {
        for id in &scenario.visible {
            covered.insert(id.as_str().to_string());
        }
    }

    assert_eq!(covered.len() as u32, result.summary.covered_questions);
    assert_eq!(
        result.summary.covered_questions,
        result.summary.reachable_questions
    );
}

/// Invariant 5: determinism. Running the engine twice on the same input
/// yields identical scenario lists.
#[test]
fn repeated_runs_are_deterministic() {
    let f = sample_form();
    let first = plan(&f);
    let second = plan(&f);

    assert_eq!(first.scenarios.len(), second.scenarios.len());
    for (a, b) in first.scenarios.iter().zip(second.scenarios.iter()) {
        assert_eq!(a.visible, b.visible);
        assert_eq!(a.answers, b.answers);
    }
}

/// Boundary 7: a form with no conditional questions yields exactly one
/// scenario covering everything.
#[test]
fn unconditional_form_yields_one_scenario() {
    let f = form(vec![
        q("q1", 0, &["a"], None),
        q("q2", 1, &["b"], None),
        q("q3", 2, &["c"], None),
    ]);
    let result = plan(&f);

    assert_eq!(result.scenarios.len(), 1);
    assert_eq!(result.summary.covered_questions, 3);
}

/// Boundary 8: a self-referencing predicate is rejected before synthesis.
#[test]
fn self_referencing_predicate_is_rejected() {
    let f = FormModel::new(vec![q("q1", 0, &["a"], Some(equals("q1", "a")))]).unwrap();

    let result = covgen::run(&f, &covgen::EngineConfig::default());
    assert!(result.is_err());
}

/// Boundary 9: an unreachable question is reported but contributes 0 to
/// required coverage.
#[test]
fn dead_question_does_not_count_toward_reachable_coverage() {
    let dead_form = form(vec![
        q("q1", 0, &["a", "b"], None),
        q("q2", 1, &["x", "y"], Some(equals("q1", "b"))),
        q(
            "q3",
            2,
            &["only"],
            Some(and(vec![equals("q1", "a"), equals("q2", "x")])),
        ),
    ]);
    let result = plan(&dead_form);

    assert_eq!(result.summary.dead_questions, 1);
    assert!(!result
        .scenarios
        .iter()
        .any(|s| s.visible.iter().any(|id| id.as_str() == "q3")));
    assert_eq!(result.summary.reachable_questions, 2);
    assert_eq!(result.summary.total_questions, 3);
}

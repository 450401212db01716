mod support;

use std::collections::HashSet;

use support::{equals, form, plan, q};

#[test]
fn single_gate_produces_two_scenarios_covering_both_questions() {
    let f = form(vec![
        q("q1", 0, &["a", "b"], None),
        q("q2", 1, &["only"], Some(equals("q1", "a"))),
    ]);

    let result = plan(&f);

    assert_eq!(result.scenarios.len(), 2);
    assert_eq!(result.summary.covered_questions, 2);
    assert_eq!(result.summary.total_questions, 2);

    let visible_sets: Vec<HashSet<String>> = result
        .scenarios
        .iter()
        .map(|s| s.visible.iter().map(|id| id.as_str().to_string()).collect())
        .collect();

    let both: HashSet<String> = ["q1", "q2"].iter().map(|s| s.to_string()).collect();
    let only_q1: HashSet<String> = ["q1"].iter().map(|s| s.to_string()).collect();

    assert!(visible_sets.contains(&both));
    assert!(visible_sets.contains(&only_q1));
}

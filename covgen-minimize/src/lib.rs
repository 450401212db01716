//! The Minimizer: greedy set cover over a scenario pool, reducing it to an
//! ordered subset whose union still covers the full reachable universe.
//!
//! Exact minimization is NP-hard and explicitly out of scope; this is the
//! classical H_n-approximation greedy, selected for simplicity and a result
//! within `ln|Q| + 1` of optimal.

use tracing::instrument;

use covgen_ir::{QuestionMask, Scenario};

/// One scenario's place in the emitted plan: its pool index plus the
/// questions it newly covers at the moment it was selected.
pub struct SelectedScenario {
    pub pool_index: usize,
    pub newly_covered: QuestionMask,
}

/// Greedy set cover over `pool` against `universe`. Returns the selected
/// scenarios in insertion (selection) order, which is also what the spec
/// calls "the Minimizer's output order".
#[instrument(skip(pool, universe))]
pub fn minimize(pool: &[Scenario], universe: &QuestionMask) -> Vec<SelectedScenario> {
    let mut uncovered = universe.clone();
    let mut selected_indices = vec![false; pool.len()];
    let mut selected = Vec::new();

    while !uncovered.is_empty() {
        let best = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| !selected_indices[*i])
            .map(|(i, scenario)| {
                let gain = scenario.visible.intersection_count(&uncovered);
                (i, gain, scenario.nonzero_assignment_count())
            })
            .filter(|(_, gain, _)| *gain > 0)
            .fold(None, |best: Option<(usize, u32, u32)>, candidate| {
                match best {
                    None => Some(candidate),
                    Some(current) => {
                        if is_better(candidate, current) {
                            Some(candidate)
                        } else {
                            Some(current)
                        }
                    }
                }
            });

        let (index, _, _) = match best {
            Some(candidate) => candidate,
            // No remaining scenario covers anything still uncovered: the
            // caller handed us a universe wider than the pool's coverage.
            // The minimizer reports what it could reach and stops, leaving
            // the gap for the caller to surface (it should not happen when
            // `universe` is the Synthesizer's own coverage report).
            None => break,
        };

        let newly_covered = pool[index].visible.intersection(&uncovered);

        selected_indices[index] = true;
        uncovered.difference_with(&pool[index].visible);
        selected.push(SelectedScenario {
            pool_index: index,
            newly_covered,
        });
    }

    selected
}

fn is_better(candidate: (usize, u32, u32), current: (usize, u32, u32)) -> bool {
    let (_, candidate_gain, candidate_nonzero) = candidate;
    let (_, current_gain, current_nonzero) = current;

    candidate_gain > current_gain
        || (candidate_gain == current_gain && candidate_nonzero < current_nonzero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn scenario(visible_bits: &[usize], nonzero: usize) -> Scenario {
        let mut visible = QuestionMask::with_capacity(8);
        for &bit in visible_bits {
            visible.insert(bit);
        }
        let mut assignment = FxHashMap::default();
        for i in 0..nonzero {
            assignment.insert(format!("v{i}").into(), 1u32);
        }
        Scenario {
            assignment,
            visible,
        }
    }

    #[test]
    fn selects_minimal_cover_in_insertion_order() {
        let pool = vec![
            scenario(&[0, 1], 1),
            scenario(&[2, 3], 1),
            scenario(&[0, 1, 2, 3], 2),
        ];
        let mut universe = QuestionMask::with_capacity(8);
        for i in 0..4 {
            universe.insert(i);
        }

        let selected = minimize(&pool, &universe);

        // The third scenario alone covers everything with maximal gain (4),
        // so it alone should be selected.
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].pool_index, 2);
    }

    #[test]
    fn ties_on_gain_prefer_fewer_nonzero_assignments_then_insertion_order() {
        let pool = vec![
            scenario(&[0, 1], 2),
            scenario(&[0, 1], 1),
            scenario(&[2, 3], 1),
        ];
        let mut universe = QuestionMask::with_capacity(8);
        for i in 0..4 {
            universe.insert(i);
        }

        let selected = minimize(&pool, &universe);

        // Index 0 and 1 tie on gain (2); index 1 has fewer nonzero
        // assignments and wins despite appearing later in the pool.
        assert_eq!(selected[0].pool_index, 1);
        assert_eq!(selected[1].pool_index, 2);
    }

    #[test]
    fn coverage_of_selection_equals_universe_coverage() {
        let pool = vec![scenario(&[0], 1), scenario(&[1], 1), scenario(&[0, 1], 2)];
        let mut universe = QuestionMask::with_capacity(4);
        universe.insert(0);
        universe.insert(1);

        let selected = minimize(&pool, &universe);
        let mut covered = QuestionMask::with_capacity(4);
        for s in &selected {
            covered.union_with(&pool[s.pool_index].visible);
        }
        assert_eq!(covered.count_ones(), universe.count_ones());
    }
}

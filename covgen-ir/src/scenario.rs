use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::ids::QuestionId;
use crate::mask::QuestionMask;

/// A total assignment of every test variable to a value in its encoded
/// domain, together with the derived visible-set it induces.
///
/// Scenarios are produced by the Synthesizer and never mutated afterwards;
/// the Minimizer only ever selects a subset of an existing pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// Test-variable assignments. A variable absent from this map (or
    /// present with value `0`) means "not answered / question not visible".
    pub assignment: FxHashMap<QuestionId, u32>,
    /// The dense-indexed set of questions visible under this assignment,
    /// unconditional questions included.
    pub visible: QuestionMask,
}

impl Scenario {
    /// Number of test variables this scenario assigns a nonzero value —
    /// the Minimizer's tie-break prefers scenarios that are simpler for a
    /// human tester to execute.
    pub fn nonzero_assignment_count(&self) -> u32 {
        self.assignment.values().filter(|&&v| v != 0).count() as u32
    }
}

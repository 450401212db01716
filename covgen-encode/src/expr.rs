use rustc_hash::FxHashMap;

use covgen_ir::QuestionId;

/// A boolean expression over bounded integer test-variable assignments.
///
/// This is the encoded form of a [`covgen_ir::Predicate`] (or of a
/// question's full transitively-conjoined visibility, see
/// [`crate::ConstraintModel`]): every `QuestionId` it mentions is a declared
/// integer variable, compared against a constant encoding. It is also the
/// query language the Synthesizer issues to the solver (`covgen-solve`
/// translates it 1:1 into solver assertions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoolExpr {
    Const(bool),
    Eq(QuestionId, u32),
    NotEq(QuestionId, u32),
    In(QuestionId, Vec<u32>),
    And(Vec<BoolExpr>),
    Or(Vec<BoolExpr>),
    Not(Box<BoolExpr>),
}

impl BoolExpr {
    /// Direct (solver-free) evaluation under a total or partial assignment.
    /// A variable missing from `assignment` is treated as `0`
    /// ("not answered / not visible"), which is what Phase 1's
    /// incrementally-built partial assignments rely on.
    pub fn eval(&self, assignment: &FxHashMap<QuestionId, u32>) -> bool {
        match self {
            BoolExpr::Const(b) => *b,
            BoolExpr::Eq(q, v) => value_of(assignment, q) == *v,
            BoolExpr::NotEq(q, v) => value_of(assignment, q) != *v,
            BoolExpr::In(q, values) => values.contains(&value_of(assignment, q)),
            BoolExpr::And(terms) => terms.iter().all(|t| t.eval(assignment)),
            BoolExpr::Or(terms) => terms.iter().any(|t| t.eval(assignment)),
            BoolExpr::Not(inner) => !inner.eval(assignment),
        }
    }
}

fn value_of(assignment: &FxHashMap<QuestionId, u32>, question: &QuestionId) -> u32 {
    assignment.get(question).copied().unwrap_or(0)
}

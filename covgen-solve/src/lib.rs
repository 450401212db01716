//! The narrow solver capability interface assumed by the spec, plus one
//! concrete backend implementing it.
//!
//! The spec treats a bounded-integer constraint solver as an external
//! service and only defines the queries issued to it (§6): declare an
//! integer variable with a bounded domain, assert a boolean expression,
//! push/pop a scope, check satisfiability, retrieve a model. [`SolverContext`]
//! is exactly that interface, kept narrow enough that the Synthesizer's
//! phase logic can be unit-tested against a mock implementation without a
//! real solver running (see `covgen-synth`'s tests). [`BoundedIntSolver`] is
//! the one in-tree backend: a memoization-free backtracking search over the
//! declared domains, standing in for whatever real CP/SMT engine a
//! production deployment would plug in instead — the same way the teacher
//! keeps its search algorithm behind a trait with interchangeable concrete
//! backends.

mod error;

pub use error::SolveError;

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::instrument;

use covgen_encode::BoolExpr;
use covgen_ir::QuestionId;

/// The capability interface the Synthesizer drives. Implementations own
/// their own assertion stack; `push`/`pop` let a caller add speculative
/// assumptions (e.g. "force question Q visible") without polluting the
/// monotonic base validity model asserted once per form.
pub trait SolverContext {
    fn declare_variable(&mut self, question: &QuestionId, domain_size: u32);
    fn assert(&mut self, expr: BoolExpr);
    fn push(&mut self);
    fn pop(&mut self);
    fn check_sat(&mut self) -> Result<bool, SolveError>;
    /// Only meaningful immediately after `check_sat` returned `Ok(true)`.
    fn model(&self) -> Option<FxHashMap<QuestionId, u32>>;
}

/// A plain backtracking search over the declared integer domains.
///
/// Soundness and completeness (it is exhaustive) matter more than speed
/// here: the spec requires a *sound* solver to prove a question
/// unreachable (§4.3 Phase 2), and the forms this engine targets have a
/// handful of test variables with small enumerated domains, not thousands.
pub struct BoundedIntSolver {
    domains: FxHashMap<QuestionId, u32>,
    declaration_order: Vec<QuestionId>,
    assertions: Vec<BoolExpr>,
    checkpoints: Vec<usize>,
    deadline: Option<Instant>,
    last_model: Option<FxHashMap<QuestionId, u32>>,
}

impl BoundedIntSolver {
    pub fn new() -> Self {
        BoundedIntSolver {
            domains: FxHashMap::default(),
            declaration_order: Vec::new(),
            assertions: Vec::new(),
            checkpoints: Vec::new(),
            deadline: None,
            last_model: None,
        }
    }

    /// A solver context with a per-form time budget, per §5's "Cancellation"
    /// rule: a deadline is computed once, here, and checked on every search
    /// step rather than threaded through each query individually.
    pub fn with_deadline(budget: Duration) -> Self {
        let mut solver = Self::new();
        solver.deadline = Some(Instant::now() + budget);
        solver
    }

    fn search(
        &self,
        position: usize,
        assignment: &mut FxHashMap<QuestionId, u32>,
        goal: &BoolExpr,
    ) -> Result<bool, SolveError> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(SolveError::DeadlineExceeded);
            }
        }

        if position == self.declaration_order.len() {
            return Ok(goal.eval(assignment));
        }

        let question = &self.declaration_order[position];
        let domain_size = self.domains[question];
        for value in 0..=domain_size {
            assignment.insert(question.clone(), value);
            if self.search(position + 1, assignment, goal)? {
                return Ok(true);
            }
        }
        assignment.remove(question);
        Ok(false)
    }
}

impl Default for BoundedIntSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverContext for BoundedIntSolver {
    #[instrument(skip(self))]
    fn declare_variable(&mut self, question: &QuestionId, domain_size: u32) {
        if !self.domains.contains_key(question) {
            self.declaration_order.push(question.clone());
        }
        self.domains.insert(question.clone(), domain_size);
    }

    fn assert(&mut self, expr: BoolExpr) {
        self.assertions.push(expr);
    }

    fn push(&mut self) {
        self.checkpoints.push(self.assertions.len());
    }

    fn pop(&mut self) {
        if let Some(mark) = self.checkpoints.pop() {
            self.assertions.truncate(mark);
        }
    }

    #[instrument(skip(self))]
    fn check_sat(&mut self) -> Result<bool, SolveError> {
        self.last_model = None;
        let goal = BoolExpr::And(self.assertions.clone());
        let mut assignment = FxHashMap::default();
        let sat = self.search(0, &mut assignment, &goal)?;
        if sat {
            self.last_model = Some(assignment);
        }
        Ok(sat)
    }

    fn model(&self) -> Option<FxHashMap<QuestionId, u32>> {
        self.last_model.clone()
    }
}

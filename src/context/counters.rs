use std::sync::atomic::{AtomicBool, Ordering};

/// Counters and resource limits for a context.
#[derive(Default)]
pub struct Counters {
    /// A count of calls to solve.
    pub solves: u64,

    /// A count of restarts, including the initial start of each solve.
    pub starts: u64,

    /// A count of decisions made.
    pub decisions: u64,

    /// A count of decisions whose atom was chosen at random.
    pub random_decisions: u64,

    /// A count of literals propagated.
    pub propagations: u64,

    /// A count of conflicts found.
    pub conflicts: u64,

    /// A count of literals in learnt clauses, before minimization.
    pub max_literals: u64,

    /// A count of literals in learnt clauses, after minimization.
    pub tot_literals: u64,

    /// An estimate of progress through the search space, refreshed when a search is interrupted.
    pub progress: f64,

    /// The limit on conflicts for the current solve, negative for no limit.
    pub conflict_budget: i64,

    /// The limit on propagations for the current solve, negative for no limit.
    pub propagation_budget: i64,

    /// A request to return from the solve, settable from a signal handler.
    ///
    /// The sole field of a context which may be written concurrently.
    pub interrupt: AtomicBool,
}

impl Counters {
    pub fn new() -> Self {
        Counters {
            conflict_budget: -1,
            propagation_budget: -1,
            ..Counters::default()
        }
    }

    /// True while no budget is exhausted and no interrupt is pending.
    ///
    /// Checked between restarts --- a long propagation or analysis is never suspended.
    pub fn within_budget(&self) -> bool {
        !self.interrupt.load(Ordering::Relaxed)
            && (self.conflict_budget < 0 || self.conflicts < self.conflict_budget as u64)
            && (self.propagation_budget < 0 || self.propagations < self.propagation_budget as u64)
    }
}

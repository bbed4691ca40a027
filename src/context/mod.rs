/*!
The context --- to which clauses are added and within which solves take place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over its source of randomness, which helps distinguish generic context methods from those fixed to a particular application.
The canonical [Context] fixes the source to [MinimalPCG32](crate::generic::minimal_pcg::MinimalPCG32), seeded from the configuration, so solves with the same configuration are deterministic.

# Example

```rust
# use vouch_sat::config::Config;
# use vouch_sat::context::Context;
# use vouch_sat::reports::Report;
# use vouch_sat::structures::range::Range;
let mut ctx = Context::from_config(Config::default());

let p = ctx.fresh_literal().unwrap();
let q = ctx.fresh_literal().unwrap();

assert!(ctx.add_clause(vec![p, q], Range::singleton(0)).is_ok());
assert!(ctx.add_clause(vec![-p, q], Range::singleton(1)).is_ok());

assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
assert_eq!(ctx.value_of(q), Some(true));
```
*/

mod counters;
pub use counters::Counters;

use std::sync::atomic::Ordering;

use rand::SeedableRng;

use crate::{
    config::Config,
    db::{ClauseRef, LevelIndex, atom::AtomDB, clause::ClauseDB, proof::ProofLog, trail::Trail},
    generic::minimal_pcg::MinimalPCG32,
    proof::ResolutionChain,
    structures::literal::{CLiteral, Literal},
};

/// A generic context, parameterised to a source of randomness.
pub struct GenericContext<R: rand::Rng> {
    /// The configuration of the context.
    pub config: Config,

    /// Counters and resource limits.
    pub counters: Counters,

    /// The atom database.
    pub atom_db: AtomDB,

    /// The clause database.
    pub clause_db: ClauseDB,

    /// The trail.
    pub trail: Trail,

    /// The proof log.
    pub proof: ProofLog,

    /// Assumptions, asserted as the first decisions of each solve.
    pub assumptions: Vec<CLiteral>,

    /// The model of the most recent solve --- valid only if that solve reported satisfiable.
    pub model: Vec<Option<bool>>,

    /// The subset of assumptions responsible for an unsatisfiable solve under assumptions.
    pub conflict: Vec<CLiteral>,

    /// False if the formula has been identified as unsatisfiable.
    pub ok: bool,

    /// The source of randomness.
    pub rng: R,

    /// The limit on kept learnt clauses.
    pub(crate) max_learnts: f64,

    /// Conflicts until the next learnt limit adjustment.
    pub(crate) learntsize_adjust_cnt: i64,

    /// The (growing) adjustment interval.
    pub(crate) learntsize_adjust_confl: f64,

    /// The assignment count at the last root simplification.
    pub(crate) simp_db_assigns: i64,

    /// Propagations to make before the next root simplification is worthwhile.
    pub(crate) simp_db_props: i64,

    /// Scratch stack for deep minimization.
    pub(crate) analyze_stack: Vec<CLiteral>,

    /// Literals whose seen mark is pending a clear.
    pub(crate) analyze_toclear: Vec<CLiteral>,

    /// The resolution chain buffers handed to a proof visitor.
    pub(crate) chain: ResolutionChain,

    /// The first trail index not yet labelled for a visitor.
    pub(crate) label_start: usize,
}

/// A context which uses [MinimalPCG32] as its source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        Self {
            counters: Counters::new(),

            atom_db: AtomDB::new(&config),
            clause_db: ClauseDB::new(&config),
            trail: Trail::default(),
            proof: ProofLog::default(),

            assumptions: Vec::default(),
            model: Vec::default(),
            conflict: Vec::default(),
            ok: true,

            rng: MinimalPCG32::from_seed(config.random_seed.to_le_bytes()),

            max_learnts: 0.0,
            learntsize_adjust_cnt: 0,
            learntsize_adjust_confl: 0.0,
            simp_db_assigns: -1,
            simp_db_props: 0,

            analyze_stack: Vec::default(),
            analyze_toclear: Vec::default(),

            chain: ResolutionChain::default(),
            label_start: 0,

            config,
        }
    }
}

impl<R: rand::Rng> GenericContext<R> {
    /// The value of `literal` on the current valuation, relative to its polarity.
    pub fn value_of(&self, literal: CLiteral) -> Option<bool> {
        self.atom_db.value_of_literal(literal)
    }

    /// The current decision level.
    pub fn decision_level(&self) -> LevelIndex {
        self.trail.level()
    }

    /// A count of current assignments.
    pub fn assignment_count(&self) -> usize {
        self.trail.len()
    }

    /// A count of original clauses.
    pub fn original_count(&self) -> usize {
        self.clause_db.originals.len()
    }

    /// A count of kept learnt clauses.
    pub fn learnt_count(&self) -> usize {
        self.clause_db.learnts.len()
    }

    /// Opens a fresh decision level.
    pub fn new_decision_level(&mut self) {
        self.trail.new_level();
    }

    /// True if the clause behind `reference` is the reason for the assignment of its first literal.
    ///
    /// A locked clause must not be removed, as the trail depends on it.
    pub fn locked(&self, reference: ClauseRef) -> bool {
        let first = self.clause_db.arena[reference].literal(0);
        self.value_of(first) == Some(true) && self.atom_db.reason_of(first.atom()) == Some(reference)
    }

    /// Values the atom of `literal` to the polarity of `literal` and stores the assignment on the trail.
    ///
    /// With proof logging, an assignment at the root level records the partition range of its derivation: the partition of the reason joined with the partitions of the reasons of the reason's tail.
    ///
    /// # Soundness
    /// The atom must not already have a value, and with proof logging every root level assignment must come with a reason.
    pub fn assign(&mut self, literal: CLiteral, reason: Option<ClauseRef>) {
        debug_assert!(self.atom_db.value_of(literal.atom()).is_none());

        let level = self.trail.level();
        self.atom_db.set_value(literal, level, reason);
        self.trail.push(literal);

        debug_assert!(!self.config.log_proof || level != 0 || reason.is_some());

        if self.config.log_proof
            && level == 0
            && let Some(from) = reason
        {
            let clause = &self.clause_db.arena[from];
            let mut part = clause.partition();
            debug_assert!(!part.undef());

            for index in 1..clause.size() {
                let tail_atom = clause.literal(index).atom();
                if let Some(tail_reason) = self.atom_db.reason_of(tail_atom) {
                    part.join(self.clause_db.arena[tail_reason].partition());
                }
            }

            self.atom_db.trail_part[literal.atom() as usize] = part;
        }
    }

    /// As [assign](GenericContext::assign), unless the atom of `literal` already has a value.
    ///
    /// Returns false if the existing value conflicts with the polarity of `literal`, true otherwise.
    pub fn enqueue(&mut self, literal: CLiteral, reason: Option<ClauseRef>) -> bool {
        match self.value_of(literal) {
            Some(value) => value,
            None => {
                self.assign(literal, reason);
                true
            }
        }
    }

    /// Requests a return from the solve in progress, from this or any other thread.
    pub fn interrupt(&self) {
        self.counters.interrupt.store(true, Ordering::Relaxed);
    }

    /// Clears a pending interrupt.
    pub fn clear_interrupt(&self) {
        self.counters.interrupt.store(false, Ordering::Relaxed);
    }

    /// Limits the conflicts of the next solve, negative for no limit.
    pub fn set_conflict_budget(&mut self, budget: i64) {
        self.counters.conflict_budget = budget;
    }

    /// Limits the propagations of the next solve, negative for no limit.
    pub fn set_propagation_budget(&mut self, budget: i64) {
        self.counters.propagation_budget = budget;
    }

    /// Removes any budget on the next solve.
    pub fn budgets_off(&mut self) {
        self.counters.conflict_budget = -1;
        self.counters.propagation_budget = -1;
    }

    /// An estimate of progress through the search space, in [0, 1].
    ///
    /// Each assignment at level *l* covers `1/|atoms|^(l+1)` of the space.
    pub fn progress_estimate(&self) -> f64 {
        let atom_count = self.atom_db.count();
        if atom_count == 0 {
            return 0.0;
        }

        let f = 1.0 / atom_count as f64;
        let mut progress = 0.0;

        for level in 0..=self.decision_level() {
            let begin = match level {
                0 => 0,
                _ => self.trail.level_start(level - 1),
            };
            let end = match level == self.decision_level() {
                true => self.trail.len(),
                false => self.trail.level_start(level),
            };
            progress += f.powi(level as i32) * (end - begin) as f64;
        }

        progress * f
    }
}

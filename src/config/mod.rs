/*!
Configuration of a context.

The primary configuration is fixed when a context is created.
Some databases clone the parts of the configuration they use.

Defaults are tuned for quick, deterministic results on small formulas, with proof logging enabled.
*/

/// The representation of activity scores.
pub type Activity = f64;

/// The strength of conflict clause minimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Minimization {
    /// No minimization.
    None,

    /// Drop a literal if the tail of its reason clause is already seen, or proven.
    ///
    /// Incompatible with proof logging, as derivations through dropped literals are not partition-tracked.
    Basic,

    /// Drop a literal if every reason path from it leads to seen or proven literals.
    Deep,
}

/// The scope of phase saving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseSaving {
    /// Decisions take the configured initial polarity.
    None,

    /// Polarities are saved for assignments above the backjump target only.
    Limited,

    /// Polarities are saved for every assignment undone.
    Full,
}

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// Log learnt and deleted clauses, enabling validation and replay of an unsatisfiable result.
    ///
    /// While set, clause storage is append-only: deletion marks a clause and compaction is disabled.
    pub log_proof: bool,

    /// The atom activity decay factor, in (0, 1).
    pub variable_decay: Activity,

    /// The clause activity decay factor, in (0, 1).
    pub clause_decay: Activity,

    /// The frequency with which the decision heuristic chooses a random atom, in [0, 1].
    pub random_decision_frequency: f64,

    /// The seed of the random source.
    pub random_seed: u64,

    /// Choose the polarity of a decision at random, rather than by saved phase.
    pub random_polarity: bool,

    /// Randomize the initial activity of fresh atoms.
    pub random_initial_activity: bool,

    /// The strength of conflict clause minimization.
    pub minimization: Minimization,

    /// The scope of phase saving.
    pub phase_saving: PhaseSaving,

    /// Space restarts by the luby sequence, rather than geometrically.
    pub luby_restarts: bool,

    /// The base restart interval, in conflicts.
    pub restart_first: u32,

    /// The restart interval growth factor, greater than 1.
    pub restart_inc: f64,

    /// The fraction of wasted arena space which triggers compaction.
    ///
    /// Irrelevant while [log_proof](Config::log_proof) is set.
    pub garbage_frac: f64,

    /// Remove satisfied original clauses when simplifying at the root level.
    pub remove_satisfied: bool,

    /// The initial limit on learnt clauses, as a fraction of original clauses.
    pub learntsize_factor: f64,

    /// Growth applied to the learnt clause limit on each adjustment.
    pub learntsize_inc: f64,

    /// Conflicts before the first learnt limit adjustment.
    pub learntsize_adjust_start: f64,

    /// Growth of the adjustment interval.
    pub learntsize_adjust_inc: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_proof: true,

            variable_decay: 0.95,
            clause_decay: 0.999,

            random_decision_frequency: 0.0,
            random_seed: 91648253,
            random_polarity: false,
            random_initial_activity: false,

            minimization: Minimization::None,
            phase_saving: PhaseSaving::Full,

            luby_restarts: true,
            restart_first: 100,
            restart_inc: 2.0,

            garbage_frac: f64::INFINITY,
            remove_satisfied: true,

            learntsize_factor: 1.0 / 3.0,
            learntsize_inc: 1.1,
            learntsize_adjust_start: 100.0,
            learntsize_adjust_inc: 1.5,
        }
    }
}

/// The activity at which atom activities are rescaled.
pub const VARIABLE_ACTIVITY_MAX: Activity = 1e100;

/// The activity at which clause activities are rescaled.
pub const CLAUSE_ACTIVITY_MAX: f64 = 1e20;

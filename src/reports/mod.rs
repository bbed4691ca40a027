//! Reports on the state of a context.

mod dimacs;

/// The outcome of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// A valuation satisfying the formula was found.
    Satisfiable,

    /// The formula is unsatisfiable --- outright, or under the given assumptions.
    Unsatisfiable,

    /// The solve ended early, by budget or interrupt.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

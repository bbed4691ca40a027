/*!
Error types used in the library.

- Some of these are internally expected --- e.g. BCP errors are used to control the flow of a solve, as a conflict during propagation is data rather than a failure.
- Others are external --- e.g. a context returns a `Build` error to note the formula was identified as unsatisfiable while being read.
- Validation and replay errors are different again: these signal a bug in the solver or a corrupted proof, and callers typically abort.

Names of the error enums --- for the most part --- overlap with corresponding procedures, and so `err::` is often used as a prefix.
*/

use crate::{db::ClauseRef, structures::literal::CLiteral};

/// A union of varied error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An error when adding a clause to a context.
    Build(BuildError),

    /// An error during BCP.
    BCP(BCPError),

    /// An error in the clause database.
    ClauseDB(ClauseDBError),

    /// An error in the atom database.
    AtomDB(AtomDBError),

    /// An error during proof validation.
    Validation(ValidationError),

    /// An error during proof replay.
    Replay(ReplayError),
}

/// Noted errors when adding a clause to a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A clear instance of an unsatisfiable formula.
    Unsatisfiable,

    /// A clause was added while some decision is active.
    DecisionMade,

    /// Proof logging is enabled, but the clause came without a partition.
    MissingPartition,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseRef),
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// All possible arena references have been used.
    StorageExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors in the atom database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Errors during proof validation.
///
/// Any of these signals a bug in the solver or a corrupted proof --- there is no recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Validation was requested without proof logging enabled.
    NoProof,

    /// Validation was requested though the formula has not been identified as unsatisfiable.
    NotUnsatisfiable,

    /// The final proof entry is not a conflict under the current trail.
    NoFinalConflict(CLiteral),

    /// A lemma could not be rederived by unit propagation over earlier clauses.
    LemmaNotImplied(ClauseRef),
}

impl From<ValidationError> for ErrorKind {
    fn from(e: ValidationError) -> Self {
        ErrorKind::Validation(e)
    }
}

/// Errors during proof replay.
///
/// The recorded proof contradicts the current clause state --- fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// Replay was requested without proof logging enabled.
    NoProof,

    /// The clause database conflicts before any lemma is replayed.
    InconsistentDatabase,

    /// Propagation of a negated lemma failed to close under the core clauses.
    NoConflict(ClauseRef),
}

impl From<ReplayError> for ErrorKind {
    fn from(e: ReplayError) -> Self {
        ErrorKind::Replay(e)
    }
}

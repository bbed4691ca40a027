//! The abstract elements of a solve, and their representations.
//!
//! - [Atoms](atom), the variables of a formula.
//! - [Literals](literal), atoms paired with a polarity.
//! - [Clauses](clause), collections of literals interpreted disjunctively.
//! - [Ranges](range), intervals over the partitions a clause was derived from.

pub mod atom;
pub mod clause;
pub mod literal;
pub mod range;

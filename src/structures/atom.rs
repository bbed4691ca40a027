//! Atoms, the variables of a formula.
//!
//! Atoms are identified with (dense, zero-based) u32 indicies, and every per-atom structure in the library is a vector indexed by atom.
//! A fresh atom is obtained from a context with [fresh_atom](crate::context::GenericContext::fresh_atom), which grows each of those structures in step.

/// An atom.
pub type Atom = u32;

/// The last usable atom.
///
/// One short of [Atom::MAX] so the negation of any literal over a representable atom is itself representable.
pub const ATOM_MAX: Atom = Atom::MAX - 1;

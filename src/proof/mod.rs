/*!
The proof visitor contract.

[Replay](crate::procedures::replay) walks a validated proof and reports every resolution step to a [ProofVisitor], fine-grained enough for a visitor to rebuild the full resolution proof --- for interpolation, core extraction, or certificate emission.

Two shapes of step are reported:
- A binary resolution of a unit literal with a clause, deriving a unit ([visit_resolvent](ProofVisitor::visit_resolvent)).
- A chain resolution over a [ResolutionChain], deriving a unit, a clause, or the empty clause ([visit_unit_chain](ProofVisitor::visit_unit_chain), [visit_clause_chain](ProofVisitor::visit_clause_chain)).

The chain buffers are owned by the context and reused across calls, so a visitor must treat a borrowed chain as valid for the duration of the call only.

# Chains

A chain holds parallel sequences of clauses and pivots.
The antecedents of the resolvent are read as: `clauses[0]`, then for each pivot `pivots[i]` the clause `clauses[i + 1]` --- unless no such clause exists, in which case the antecedent is the unit clause of the pivot literal itself.
Resolving `clauses[0]` successively on each pivot against its antecedent yields the reported parent.

For the reference visitor, see [trace](crate::proof::trace).
*/

pub mod trace;

use crate::{
    db::{ClauseRef, arena::Arena},
    structures::literal::CLiteral,
};

/// The antecedents of a chain resolution, in resolution order.
#[derive(Default)]
pub struct ResolutionChain {
    /// The clause antecedents.
    pub clauses: Vec<ClauseRef>,

    /// The pivot literals, as assigned.
    pub pivots: Vec<CLiteral>,
}

impl ResolutionChain {
    /// Clears the chain for reuse.
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.pivots.clear();
    }
}

/// A visitor for the resolution steps of a replayed proof.
///
/// Callbacks borrow the arena so a visitor can read the literals of any clause antecedent.
pub trait ProofVisitor {
    /// A binary resolution: from the unit `unit` and the clause `clause`, derive the unit `parent`.
    fn visit_resolvent(&mut self, arena: &Arena, parent: CLiteral, unit: CLiteral, clause: ClauseRef);

    /// A chain resolution deriving the unit `parent`.
    fn visit_unit_chain(&mut self, arena: &Arena, chain: &ResolutionChain, parent: CLiteral);

    /// A chain resolution deriving the clause `parent`, or the empty clause if `parent` is none.
    fn visit_clause_chain(&mut self, arena: &Arena, chain: &ResolutionChain, parent: Option<ClauseRef>);

    /// True if work derived from `clause` already exists downstream.
    ///
    /// Allows the engine to suppress redundant derivations.
    fn itp_exists(&self, _clause: ClauseRef) -> bool {
        true
    }
}

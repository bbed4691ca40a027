/*!
Methods for building a formula in a context: fresh atoms, fresh literals, and clause addition.

# Clause addition

[add_clause](crate::context::GenericContext::add_clause) requires the context to be at the root decision level, and takes the partition of the clause alongside its literals.

The literals are sorted, deduplicated, and checked for a tautology.
What happens to literals already false at the root depends on proof logging:

- With proof logging off, false literals are dropped --- the standard pre-simplification.
- With proof logging on, false literals are kept but moved behind the others, so the watched positions hold the literals which may still change.
  Dropping a false literal would be a resolution step the proof never recorded.

A clause unit under the current root valuation is attached as the reason of its literal and propagated at once.
A conflict found by that propagation settles the formula as unsatisfiable, with the conflicting clause logged as the witness for the empty clause.
*/

use crate::{
    context::GenericContext,
    misc::targets,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        range::Range,
    },
    types::err::{self, ErrorKind},
};

/// Non-fatal outcomes of adding a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was stored.
    Added,

    /// The clause contains a literal and its negation, and was dropped.
    Tautology,

    /// The clause is satisfied at the root level, and was dropped.
    ///
    /// Sound with proof logging as the satisfying literal is proven, and so any derivation through the clause could route through that proof instead.
    Satisfied,
}

impl<R: rand::Rng> GenericContext<R> {
    /// A fresh atom, eligible as a decision, with phase saving initialised to false.
    pub fn fresh_atom(&mut self) -> Result<Atom, ErrorKind> {
        self.fresh_atom_detailed(false, true)
    }

    /// A fresh atom, with the given initial phase and decision eligibility.
    pub fn fresh_atom_detailed(
        &mut self,
        previous_value: bool,
        decision: bool,
    ) -> Result<Atom, ErrorKind> {
        let initial_activity = match self.config.random_initial_activity {
            true => self.rng.random::<f64>() * 0.00001,
            false => 0.0,
        };

        let atom = self
            .atom_db
            .fresh_atom(previous_value, decision, initial_activity)?;
        self.clause_db.watches.fresh_atom();

        Ok(atom)
    }

    /// The positive literal of a fresh atom.
    pub fn fresh_literal(&mut self) -> Result<CLiteral, ErrorKind> {
        Ok(CLiteral::new(self.fresh_atom()?, true))
    }

    /// The positive literals of `count` fresh atoms.
    pub fn fresh_literals(&mut self, count: usize) -> Result<Vec<CLiteral>, ErrorKind> {
        let mut literals = Vec::with_capacity(count);
        for _ in 0..count {
            literals.push(self.fresh_literal()?);
        }
        Ok(literals)
    }

    /// Adds a clause to the context, tagged with the partition `part`.
    ///
    /// An `Unsatisfiable` error notes the formula --- not the call --- failed: the clause made the formula trivially unsatisfiable.
    pub fn add_clause(
        &mut self,
        clause: Vec<CLiteral>,
        part: Range,
    ) -> Result<ClauseOk, ErrorKind> {
        if self.decision_level() != 0 {
            return Err(err::BuildError::DecisionMade.into());
        }
        if self.config.log_proof && part.undef() {
            return Err(err::BuildError::MissingPartition.into());
        }
        if !self.ok {
            return Err(err::BuildError::Unsatisfiable.into());
        }

        let mut literals = clause;
        literals.sort_unstable();

        // Deduplicate, check for a tautology, and (without a proof) drop false literals.
        let mut previous: Option<CLiteral> = None;
        let mut keep = Vec::with_capacity(literals.len());
        for literal in literals {
            if self.value_of(literal) == Some(true) {
                return Ok(ClauseOk::Satisfied);
            }
            if previous == Some(literal.negate()) {
                return Ok(ClauseOk::Tautology);
            }
            if previous == Some(literal) {
                continue;
            }
            if !self.config.log_proof && self.value_of(literal) == Some(false) {
                continue;
            }
            previous = Some(literal);
            keep.push(literal);
        }
        let mut literals = keep;

        if self.config.log_proof {
            // Move false literals behind the rest, preserving the relative order of the rest.
            literals.sort_by_key(|literal| self.value_of(*literal) == Some(false));
        }

        log::trace!(target: targets::CLAUSE_DB, "Adding clause {literals:?} with partition {part}");

        if literals.is_empty() {
            self.ok = false;
            return Err(err::BuildError::Unsatisfiable.into());
        }

        if self.config.log_proof && self.value_of(literals[0]) == Some(false) {
            // Every literal is false: the clause conflicts with the root valuation.
            // Log it as the final entry of the proof, the witness for the empty clause.
            let reference = self.clause_db.arena.alloc(literals, false)?;
            self.clause_db.arena[reference].join_partition(part);
            self.proof.push(reference);
            self.join_part_info(reference, part);
            self.ok = false;
            return Err(err::BuildError::Unsatisfiable.into());
        }

        let unit = literals.len() == 1
            || (self.config.log_proof && self.value_of(literals[1]) == Some(false));

        if unit {
            let asserted = literals[0];
            if self.config.log_proof {
                let reference = self.clause_db.arena.alloc(literals, false)?;
                self.clause_db.arena[reference].join_partition(part);
                self.clause_db.originals.push(reference);
                self.clause_db.total_part.join(part);
                self.join_part_info(reference, part);
                self.assign(asserted, Some(reference));
            } else {
                self.assign(asserted, None);
            }

            if let Err(err::BCPError::Conflict(conflict)) = self.bcp(false) {
                if self.config.log_proof {
                    self.proof.push(conflict);
                }
                self.ok = false;
                return Err(err::BuildError::Unsatisfiable.into());
            }
            return Ok(ClauseOk::Added);
        }

        let reference = self.clause_db.arena.alloc(literals, false)?;
        self.clause_db.arena[reference].join_partition(part);
        self.clause_db.originals.push(reference);
        self.clause_db.total_part.join(part);
        self.clause_db.attach(reference);
        self.join_part_info(reference, part);

        Ok(ClauseOk::Added)
    }

    /// Joins a singleton partition into the partition information of each atom of a clause.
    fn join_part_info(&mut self, reference: crate::db::ClauseRef, part: Range) {
        if !part.is_singleton() {
            return;
        }
        for index in 0..self.clause_db.arena[reference].size() {
            let atom = self.clause_db.arena[reference].literal(index).atom();
            self.atom_db.part_info[atom as usize].join(part);
        }
    }
}

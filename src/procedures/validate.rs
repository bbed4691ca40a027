/*!
Validation of a logged proof, and identification of the core.

See [GenericContext::validate] for the context method.

# Overview

After an unsatisfiable solve the proof log holds every learnt clause, every deletion, and --- last --- the clause of the final conflict.
Validation walks the log *backwards*, undoing the solve: each deletion is resurrected, and each learnt clause is rolled back and, if needed for the refutation, re-checked.

The check is reverse unit propagation: with the clause detached, assume the negation of each of its literals and propagate.
A conflict means the clause is implied by the earlier clauses; no conflict means the proof is bogus.

# The core

A clause is *core* if the empty clause is derived from it.
Core marks spread backwards from the final conflict: the reasons of the final trail are core, each re-checked lemma marks the clauses of its propagation conflict, and --- the delicate part --- when rolling back an assignment forced by a core clause, the reasons supporting that clause's tail become core in turn.

Validation leaves every core mark in place for [replay](crate::procedures::replay), and leaves the context consistent (`ok`) at the root level.
*/

use crate::{
    context::GenericContext,
    db::ClauseRef,
    misc::targets,
    structures::literal::Literal,
    types::err,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Checks that each lemma of the logged proof is derivable from earlier clauses, marking the core.
    ///
    /// Pre: proof logging is on, and the formula was identified as unsatisfiable.
    /// An error other than `NoProof`/`NotUnsatisfiable` signals a bug in the solver or a corrupted proof.
    pub fn validate(&mut self) -> Result<(), err::ValidationError> {
        if !self.config.log_proof {
            return Err(err::ValidationError::NoProof);
        }
        if self.ok || self.proof.is_empty() {
            return Err(err::ValidationError::NotUnsatisfiable);
        }

        // The final conflict clause is in the core, along with the reasons of its literals.
        let last = match self.proof.last() {
            Some(reference) => reference,
            None => return Err(err::ValidationError::NotUnsatisfiable),
        };
        self.clause_db.arena[last].set_core();
        for index in 0..self.clause_db.arena[last].size() {
            let literal = self.clause_db.arena[last].literal(index);
            if self.value_of(literal) != Some(false) {
                return Err(err::ValidationError::NoFinalConflict(literal));
            }
            if let Some(reason) = self.atom_db.reason_of(literal.atom()) {
                self.clause_db.arena[reason].set_core();
            }
        }

        // The logical trail length: entries above are rolled back lazily.
        let mut trail_size = self.trail.len();
        self.ok = true;

        for entry in (0..self.proof.len() - 1).rev() {
            let reference = self.proof.entry(entry);

            if self.clause_db.arena[reference].deleted() {
                // A deletion entry: resurrect the clause.
                self.clause_db.arena[reference].set_deleted(false);
                if self.clause_db.arena[reference].size() > 1 {
                    self.clause_db.attach(reference);
                } else {
                    let literal = self.clause_db.arena[reference].literal(0);
                    self.enqueue(literal, Some(reference));
                }
                continue;
            }

            // A learnt clause: roll it back.
            if self.locked(reference) {
                // Undo the propagation the clause performed.
                let first = self.clause_db.arena[reference].literal(0);
                while self.trail.literal(trail_size - 1) != first {
                    let atom = self.trail.literal(trail_size - 1).atom();
                    self.atom_db.clear_value(atom);
                    self.atom_db.restore_to_heap(atom);
                    trail_size -= 1;

                    // An assignment supporting a core reason makes its own reasons core.
                    if let Some(reason) = self.atom_db.reason_of(atom)
                        && self.clause_db.arena[reason].core()
                    {
                        for position in 1..self.clause_db.arena[reason].size() {
                            let tail = self.clause_db.arena[reason].literal(position).atom();
                            if let Some(tail_reason) = self.atom_db.reason_of(tail) {
                                self.clause_db.arena[tail_reason].set_core();
                            }
                        }
                    }
                }

                let atom = first.atom();
                self.atom_db.clear_value(atom);
                self.atom_db.restore_to_heap(atom);
                trail_size -= 1;
            }

            if self.clause_db.arena[reference].size() > 1 {
                self.clause_db.detach(reference, false);
            }
            self.clause_db.arena[reference].set_deleted(true);

            if self.clause_db.arena[reference].core() {
                debug_assert!(
                    self.value_of(self.clause_db.arena[reference].literal(0)).is_none()
                );
                self.settle_trail(trail_size);
                log::trace!(target: targets::VALIDATION, "Checking lemma {reference}");
                self.validate_lemma(reference)?;
            }
        }

        self.settle_trail(trail_size);

        // Close the core over the reasons of the remaining root trail.
        for index in (0..self.trail.len()).rev() {
            let atom = self.trail.literal(index).atom();
            let Some(reason) = self.atom_db.reason_of(atom) else {
                continue;
            };
            if self.clause_db.arena[reason].core() {
                for position in 1..self.clause_db.arena[reason].size() {
                    let tail = self.clause_db.arena[reason].literal(position).atom();
                    if let Some(tail_reason) = self.atom_db.reason_of(tail) {
                        self.clause_db.arena[tail_reason].set_core();
                    }
                }
            }
        }

        log::info!(target: targets::VALIDATION, "Validated, proof length {}", self.proof.len());
        Ok(())
    }

    /// Shrinks the trail to `length` and resets the propagation cursor.
    fn settle_trail(&mut self, length: usize) {
        self.trail.shrink_to(length);
        self.trail.q_head = length;
        if let Some(start) = self.trail.level_indicies.first_mut() {
            *start = length;
        }
    }

    /// Checks one lemma by reverse unit propagation, marking the conflict closure core.
    ///
    /// Pre: the root level, with the lemma detached, marked deleted, and unassigned at its head.
    fn validate_lemma(&mut self, reference: ClauseRef) -> Result<(), err::ValidationError> {
        debug_assert!(self.decision_level() == 0);
        debug_assert!(self.ok);
        debug_assert!(self.clause_db.arena[reference].core());
        debug_assert!(!self.locked(reference));

        // Level one: the negated lemma as hypotheses.
        self.new_decision_level();
        for index in 0..self.clause_db.arena[reference].size() {
            let hypothesis = self.clause_db.arena[reference].literal(index).negate();
            self.enqueue(hypothesis, None);
        }

        // Level two: consequences of the hypotheses.
        self.new_decision_level();

        let conflict = match self.bcp(false) {
            Err(err::BCPError::Conflict(conflict)) => conflict,
            Ok(()) => {
                log::warn!(target: targets::VALIDATION, "No conflict from lemma {reference}");
                return Err(err::ValidationError::LemmaNotImplied(reference));
            }
        };

        // The conflict closes the derivation: mark its clauses core.
        self.clause_db.arena[conflict].set_core();
        for index in 0..self.clause_db.arena[conflict].size() {
            let atom = self.clause_db.arena[conflict].literal(index).atom();
            if self.atom_db.level_of(atom) > 1 {
                self.atom_db.seen[atom as usize] = true;
            } else if self.atom_db.level_of(atom) == 0
                && let Some(reason) = self.atom_db.reason_of(atom)
            {
                self.clause_db.arena[reason].set_core();
            }
        }

        let level_two_start = self.trail.level_start(1);
        for index in (level_two_start..self.trail.len()).rev() {
            let atom = self.trail.literal(index).atom();
            if !self.atom_db.seen[atom as usize] {
                continue;
            }
            self.atom_db.seen[atom as usize] = false;

            let Some(reason) = self.atom_db.reason_of(atom) else {
                continue;
            };
            self.clause_db.arena[reason].set_core();

            debug_assert!(
                self.value_of(self.clause_db.arena[reason].literal(0)) == Some(true)
            );
            for position in 1..self.clause_db.arena[reason].size() {
                let tail = self.clause_db.arena[reason].literal(position).atom();
                debug_assert!(self.atom_db.value_of(tail).is_some());

                if self.atom_db.level_of(tail) > 1 {
                    self.atom_db.seen[tail as usize] = true;
                } else if self.atom_db.level_of(tail) == 0
                    && let Some(tail_reason) = self.atom_db.reason_of(tail)
                {
                    self.clause_db.arena[tail_reason].set_core();
                }
            }
        }

        self.backjump(0);
        self.ok = true;
        Ok(())
    }
}

/*!
Replay of a validated proof to a [ProofVisitor].

See [GenericContext::replay] for the context method.

# Overview

Replay walks the proof *forwards*, rederiving each core lemma from the clauses before it and reporting every resolution step:

- Root level units forced along the way are labelled as they appear: a binary reason gives a binary resolution, a longer reason a chain over its tail.
- Each core lemma is rederived by assuming its negation and propagating over the core clauses alone.
  The conflict, together with the reasons on the trail above the hypotheses, forms the chain which derives the lemma.
- The final root conflict --- the empty clause --- is labelled from the literals of its conflicting clause.

Throughout, hypotheses sit at decision level one and their consequences at level two, mirroring [validation](crate::procedures::validate).
Learnt clauses which never entered the core are dropped as their entries are crossed.
*/

use crate::{
    context::GenericContext,
    db::ClauseRef,
    misc::targets,
    proof::ProofVisitor,
    structures::literal::Literal,
    types::err,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Replays the validated proof, reporting each resolution to `visitor`.
    ///
    /// Pre: proof logging is on and [validate](GenericContext::validate) succeeded.
    pub fn replay(&mut self, visitor: &mut impl ProofVisitor) -> Result<(), err::ReplayError> {
        if !self.config.log_proof || self.proof.is_empty() {
            return Err(err::ReplayError::NoProof);
        }

        // The initial database must be consistent.
        if self.bcp(true).is_err() {
            return Err(err::ReplayError::InconsistentDatabase);
        }
        self.label_level0(visitor);

        for entry in 0..self.proof.len() {
            let reference = self.proof.entry(entry);

            // A live clause which never entered the core is dropped here, unless locked.
            if !self.clause_db.arena[reference].deleted()
                && !self.locked(reference)
                && !self.clause_db.arena[reference].core()
            {
                if self.clause_db.arena[reference].size() > 1 {
                    self.clause_db.detach(reference, false);
                }
                self.clause_db.arena[reference].set_deleted(true);
                continue;
            }

            // Skip anything not needed, or already present.
            if !self.clause_db.arena[reference].core()
                || !self.clause_db.arena[reference].deleted()
            {
                continue;
            }

            log::trace!(target: targets::REPLAY, "Rederiving {reference}");
            debug_assert!(
                self.value_of(self.clause_db.arena[reference].literal(0)).is_none()
            );

            // Hypotheses at level one, consequences at level two.
            self.new_decision_level();
            for index in 0..self.clause_db.arena[reference].size() {
                let hypothesis = self.clause_db.arena[reference].literal(index).negate();
                self.enqueue(hypothesis, None);
            }
            self.new_decision_level();

            let conflict = match self.bcp(true) {
                Err(err::BCPError::Conflict(conflict)) => conflict,
                Ok(()) => return Err(err::ReplayError::NoConflict(reference)),
            };

            if self.traverse_proof(visitor, reference, conflict) {
                self.backjump(0);
                self.clause_db.arena[reference].set_deleted(false);

                let unit_shaped = self.clause_db.arena[reference].size() <= 1
                    || self.value_of(self.clause_db.arena[reference].literal(1)) == Some(false);

                if unit_shaped {
                    let literal = self.clause_db.arena[reference].literal(0);
                    debug_assert!(self.value_of(literal).is_none());
                    self.assign(literal, Some(reference));

                    let conflict = self.bcp(true);
                    self.label_level0(visitor);

                    if let Err(err::BCPError::Conflict(conflict)) = conflict {
                        // The empty clause is derived.
                        self.label_final(visitor, conflict);
                        return Ok(());
                    }
                } else {
                    self.clause_db.attach(reference);
                }
            } else {
                self.backjump(0);
            }
        }

        if self.proof.len() == 1 {
            self.label_final(visitor, self.proof.entry(0));
        }
        Ok(())
    }

    /// Reconstructs the chain which derives `lemma` from `conflict` and the reasons on the trail.
    ///
    /// Returns false if the chain is trivial (no pivots), in which case nothing is reported.
    fn traverse_proof(
        &mut self,
        visitor: &mut impl ProofVisitor,
        lemma: ClauseRef,
        conflict: ClauseRef,
    ) -> bool {
        let mut path_count = self.clause_db.arena[conflict].size();
        for index in 0..self.clause_db.arena[conflict].size() {
            let atom = self.clause_db.arena[conflict].literal(index).atom();
            self.atom_db.seen[atom as usize] = true;
        }

        self.chain.clear();
        self.chain.clauses.push(conflict);

        // Walk the trail top down, resolving each seen literal against its reason.
        let mut index = self.trail.len();
        while path_count > 0 {
            debug_assert!(index > 0);
            index -= 1;
            let literal = self.trail.literal(index);
            let atom = literal.atom();

            if !self.atom_db.seen[atom as usize] {
                continue;
            }
            self.atom_db.seen[atom as usize] = false;
            path_count -= 1;

            // Level one literals are the hypotheses, not resolution steps.
            if self.atom_db.level_of(atom) == 1 {
                continue;
            }

            self.chain.pivots.push(literal);

            if self.atom_db.level_of(atom) == 0 {
                // A proven literal resolves as a unit leaf.
                continue;
            }

            let Some(reason) = self.atom_db.reason_of(atom) else {
                unreachable!("Unreasoned assignment above the hypotheses");
            };
            self.chain.clauses.push(reason);

            debug_assert!(
                self.value_of(self.clause_db.arena[reason].literal(0)) == Some(true)
            );
            for position in 1..self.clause_db.arena[reason].size() {
                let tail = self.clause_db.arena[reason].literal(position).atom();
                if !self.atom_db.seen[tail as usize] {
                    self.atom_db.seen[tail as usize] = true;
                    path_count += 1;
                }
            }
        }

        if self.chain.pivots.is_empty() {
            return false;
        }
        visitor.visit_clause_chain(&self.clause_db.arena, &self.chain, Some(lemma));
        true
    }

    /// Labels each root level unit forced since the last call.
    pub(crate) fn label_level0(&mut self, visitor: &mut impl ProofVisitor) {
        for index in self.label_start..self.trail.len() {
            let literal = self.trail.literal(index);
            let Some(reason) = self.atom_db.reason_of(literal.atom()) else {
                continue;
            };

            match self.clause_db.arena[reason].size() {
                1 => {}
                2 => {
                    let other = self.clause_db.arena[reason].literal(1).negate();
                    visitor.visit_resolvent(&self.clause_db.arena, literal, other, reason);
                }
                size => {
                    self.chain.clear();
                    self.chain.clauses.push(reason);
                    for position in 1..size {
                        let pivot = self.clause_db.arena[reason].literal(position).negate();
                        self.chain.pivots.push(pivot);
                    }
                    visitor.visit_unit_chain(&self.clause_db.arena, &self.chain, literal);
                }
            }
        }
        self.label_start = self.trail.len();
    }

    /// Labels the empty clause, resolved from every literal of `conflict`.
    fn label_final(&mut self, visitor: &mut impl ProofVisitor, conflict: ClauseRef) {
        self.chain.clear();
        self.chain.clauses.push(conflict);
        for index in 0..self.clause_db.arena[conflict].size() {
            let pivot = self.clause_db.arena[conflict].literal(index).negate();
            self.chain.pivots.push(pivot);
        }
        visitor.visit_clause_chain(&self.clause_db.arena, &self.chain, None);
    }
}

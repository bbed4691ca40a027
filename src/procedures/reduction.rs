/*!
Keeping the databases small: learnt reduction, root simplification, and compaction.

# Reduction

When the learnt database outgrows its limit around half of the learnt clauses are removed, ordered so low-activity long clauses go first.
Binary clauses and locked clauses (those some assignment depends on) are never removed.

# Removal under a proof

With proof logging, removal of a clause appends the clause to the proof as a deletion and marks it, but the clause stays in the arena --- [validation](crate::procedures::validate) resurrects deletions as its backward pass crosses them.
Without a proof the clause space is accounted wasted, and the arena is compacted once the wasted share passes [garbage_frac](crate::config::Config::garbage_frac).

# Simplification

At the root level satisfied clauses can be removed outright.
This is gated by counters so repeat simplification without fresh root assignments is skipped.
*/

use crate::{
    context::GenericContext,
    db::{ClauseRef, arena::Arena},
    misc::targets,
    structures::literal::Literal,
};

impl<R: rand::Rng> GenericContext<R> {
    /// True if some literal of the clause is satisfied on the current valuation.
    pub fn satisfied(&self, reference: ClauseRef) -> bool {
        let clause = &self.clause_db.arena[reference];
        (0..clause.size()).any(|index| self.value_of(clause.literal(index)) == Some(true))
    }

    /// Removes the clause behind `reference`: a deletion entry in the proof, or freed space without one.
    pub fn remove_clause(&mut self, reference: ClauseRef) {
        if self.config.log_proof {
            self.proof.push(reference);
        }

        if self.clause_db.arena[reference].size() > 1 {
            self.clause_db.detach(reference, false);
        }

        // Without a proof a locked reason must not dangle.
        if !self.config.log_proof && self.locked(reference) {
            let atom = self.clause_db.arena[reference].literal(0).atom();
            self.atom_db.set_reason(atom, None);
        }

        self.clause_db.arena[reference].set_deleted(true);
        if !self.config.log_proof {
            self.clause_db.arena.free(reference);
        }
    }

    /// Removes around half of the learnt clauses, the less active first.
    ///
    /// Binary and locked clauses are kept, as is any clause above the activity threshold in the kept half.
    pub fn reduce_db(&mut self) {
        let extra_limit = self.clause_db.activity_inc() / self.clause_db.learnts.len() as f64;

        let mut learnts = std::mem::take(&mut self.clause_db.learnts);
        {
            // Sort to worst-first: long clauses before binary, low activity before high.
            let arena = &self.clause_db.arena;
            learnts.sort_by(|&x, &y| {
                let x_worse = arena[x].size() > 2
                    && (arena[y].size() == 2 || arena[x].activity() < arena[y].activity());
                let y_worse = arena[y].size() > 2
                    && (arena[x].size() == 2 || arena[y].activity() < arena[x].activity());
                match (x_worse, y_worse) {
                    (true, false) => std::cmp::Ordering::Less,
                    (false, true) => std::cmp::Ordering::Greater,
                    _ => std::cmp::Ordering::Equal,
                }
            });
        }

        let half = learnts.len() / 2;
        let mut kept = Vec::with_capacity(learnts.len());
        for (index, reference) in learnts.into_iter().enumerate() {
            let removable = self.clause_db.arena[reference].size() > 2
                && !self.locked(reference)
                && (index < half
                    || (self.clause_db.arena[reference].activity() as f64) < extra_limit);

            if removable {
                self.remove_clause(reference);
            } else {
                kept.push(reference);
            }
        }

        log::info!(
            target: targets::REDUCTION,
            "Reduction kept {} clauses",
            kept.len(),
        );
        self.clause_db.learnts = kept;
        self.check_garbage();
    }

    /// Simplifies the databases against the root valuation by removing satisfied clauses.
    ///
    /// Returns false only if the formula is identified as unsatisfiable.
    pub fn simplify(&mut self) -> bool {
        debug_assert!(self.decision_level() == 0);

        if !self.ok || self.bcp(false).is_err() {
            self.ok = false;
            return false;
        }

        if self.assignment_count() as i64 == self.simp_db_assigns || self.simp_db_props > 0 {
            return true;
        }

        let learnts = std::mem::take(&mut self.clause_db.learnts);
        self.clause_db.learnts = self.remove_satisfied(learnts);

        if self.config.remove_satisfied {
            let originals = std::mem::take(&mut self.clause_db.originals);
            self.clause_db.originals = self.remove_satisfied(originals);
        }

        self.check_garbage();
        self.atom_db.rebuild_heap();

        self.simp_db_assigns = self.assignment_count() as i64;
        self.simp_db_props =
            (self.clause_db.original_literal_count + self.clause_db.learnt_literal_count) as i64;

        true
    }

    /// Removes every satisfied clause of `list`, returning those kept.
    fn remove_satisfied(&mut self, list: Vec<ClauseRef>) -> Vec<ClauseRef> {
        let mut kept = Vec::with_capacity(list.len());
        for reference in list {
            if self.satisfied(reference) {
                self.remove_clause(reference);
            } else {
                kept.push(reference);
            }
        }
        kept
    }

    /// Compacts the arena if the wasted share passes the configured fraction.
    ///
    /// A no-op while proof logging: the proof holds references for the lifetime of the solve.
    pub fn check_garbage(&mut self) {
        if self.config.log_proof {
            return;
        }
        let arena = &self.clause_db.arena;
        if (arena.wasted() as f64) > (arena.allocated() as f64) * self.config.garbage_frac {
            self.collect_garbage();
        }
    }

    /// Relocates every reachable clause into a fresh arena.
    ///
    /// Roots are the watch lists, the locked reasons, the clause lists, and the proof.
    /// Every outstanding [ClauseRef] elsewhere is invalid once this returns.
    fn collect_garbage(&mut self) {
        let before = self.clause_db.arena.allocated();
        let mut fresh = Arena::with_capacity(before - self.clause_db.arena.wasted());

        self.clause_db.watches.clean_all(&self.clause_db.arena);

        for list in self.clause_db.watches.lists_mut() {
            for watcher in list.iter_mut() {
                self.clause_db.arena.reloc(&mut watcher.clause, &mut fresh);
            }
        }

        // Relocate reasons the trail depends on, skipping stale reasons of unlocked assignments.
        for index in 0..self.trail.len() {
            let literal = self.trail.literal(index);
            let atom = literal.atom();
            if let Some(reason) = self.atom_db.reason_of(atom) {
                let keep = self.clause_db.arena[reason].forwarded()
                    || self.clause_db.arena[reason].literal(0) == literal;
                if keep && let Some(slot) = self.atom_db.reason_slot(atom).as_mut() {
                    self.clause_db.arena.reloc(slot, &mut fresh);
                }
            }
        }

        for index in 0..self.clause_db.learnts.len() {
            let slot = &mut self.clause_db.learnts[index];
            self.clause_db.arena.reloc(slot, &mut fresh);
        }
        for index in 0..self.clause_db.originals.len() {
            let slot = &mut self.clause_db.originals[index];
            self.clause_db.arena.reloc(slot, &mut fresh);
        }
        for reference in self.proof.entries_mut() {
            self.clause_db.arena.reloc(reference, &mut fresh);
        }

        log::info!(
            target: targets::CLAUSE_DB,
            "Compaction {} to {} literals",
            before,
            fresh.allocated(),
        );
        self.clause_db.arena = fresh;
    }
}

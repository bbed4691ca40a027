/*!
Boolean constraint propagation.

See [GenericContext::bcp] for the context method.

# Overview

Each literal on the trail beyond the propagation cursor is propagated in turn: the watch list of the literal is drained, and each watching clause either keeps its watch, moves its watch to a fresh literal, queues a forced assignment, or is returned as a conflict.

# Complications

While the list of the propagated literal is drained, a clause may move a watch onto *another* list.
To satisfy the borrow checker the drained list is taken out of the watch index for the duration, and restored --- compacted --- afterwards.
This is sound as no clause ever moves a watch onto the drained list: a moved watch is to a literal which is not false, while the literal watched through the drained list is.

# Core mode

In core mode clauses not marked core are skipped, watch untouched.
[Replay](crate::procedures::replay) uses this to rederive each lemma from the core clauses alone.
*/

use crate::{
    context::GenericContext,
    misc::targets,
    structures::literal::Literal,
    types::err,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Propagates all queued assignments, watching for a clause unsatisfied on the valuation.
    ///
    /// On a conflict the propagation cursor is advanced past the queue, so a following call is a no-op until the trail is unwound.
    pub fn bcp(&mut self, core_only: bool) -> Result<(), err::BCPError> {
        self.clause_db.watches.clean_all(&self.clause_db.arena);

        while self.trail.q_head < self.trail.len() {
            let literal = self.trail.literal(self.trail.q_head);
            self.trail.q_head += 1;
            self.counters.propagations += 1;
            self.simp_db_props -= 1;

            let false_literal = literal.negate();
            let mut list = self.clause_db.watches.take(literal);

            let mut read = 0;
            let mut write = 0;

            'watchers: while read < list.len() {
                let watcher = list[read];

                // A true blocker settles the clause without inspection.
                if self.value_of(watcher.blocker) == Some(true) {
                    list[write] = watcher;
                    write += 1;
                    read += 1;
                    continue 'watchers;
                }

                let reference = watcher.clause;

                if core_only && !self.clause_db.arena[reference].core() {
                    list[write] = watcher;
                    write += 1;
                    read += 1;
                    continue 'watchers;
                }

                // Ensure the false literal is at position 1.
                {
                    let clause = &mut self.clause_db.arena[reference];
                    if clause.literal(0) == false_literal {
                        clause.swap(0, 1);
                    }
                    debug_assert_eq!(clause.literal(1), false_literal);
                }
                read += 1;

                let first = self.clause_db.arena[reference].literal(0);
                let fresh_watcher = crate::db::watches::Watcher {
                    clause: reference,
                    blocker: first,
                };

                if first != watcher.blocker && self.value_of(first) == Some(true) {
                    list[write] = fresh_watcher;
                    write += 1;
                    continue 'watchers;
                }

                // Look for a fresh watch.
                let size = self.clause_db.arena[reference].size();
                for candidate in 2..size {
                    if self.value_of(self.clause_db.arena[reference].literal(candidate))
                        != Some(false)
                    {
                        self.clause_db.arena[reference].swap(1, candidate);
                        let moved = self.clause_db.arena[reference].literal(1);
                        self.clause_db.watches.push(moved.negate(), fresh_watcher);
                        continue 'watchers;
                    }
                }

                // No fresh watch: the clause is unit, or unsatisfied.
                list[write] = fresh_watcher;
                write += 1;

                if self.value_of(first) == Some(false) {
                    log::trace!(target: targets::PROPAGATION, "Conflict at {reference} on {literal}");
                    self.trail.q_head = self.trail.len();
                    while read < list.len() {
                        list[write] = list[read];
                        write += 1;
                        read += 1;
                    }
                    list.truncate(write);
                    self.clause_db.watches.restore(literal, list);
                    return Err(err::BCPError::Conflict(reference));
                }

                log::trace!(target: targets::PROPAGATION, "Consequence {first} of {reference}");
                self.assign(first, Some(reference));
            }

            list.truncate(write);
            self.clause_db.watches.restore(literal, list);
        }

        Ok(())
    }
}

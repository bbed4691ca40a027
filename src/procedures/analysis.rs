/*!
Conflict analysis: the derivation of a learnt clause from a conflict.

# Overview

Analysis resolves the conflicting clause against the reasons of its literals, walking the trail backwards, until exactly one literal of the current decision level remains --- the first unique implication point.
The learnt clause asserts the negation of that literal after a backjump to the second-highest level in the clause.

Literals proven at the root level are never included in a learnt clause.
With proof logging the partition of every clause resolved --- and, through [trail_part](crate::db::atom::AtomDB::trail_part), of the derivation of every root literal resolved on --- is joined into the partition of the learnt clause.

# Minimization

A literal of the learnt clause is redundant if its reason paths lead only to literals already in the clause, or proven.
[Basic](crate::config::Minimization::Basic) minimization inspects one reason deep, [deep](crate::config::Minimization::Deep) minimization searches the implication graph, pruned by a bitmask abstracting the levels of the clause.

A failed redundancy search must not leak into the learnt partition: partitions joined along the search are accumulated locally and merged only on success.
*/

use crate::{
    config::Minimization,
    context::GenericContext,
    db::{ClauseRef, LevelIndex},
    misc::targets,
    structures::{
        literal::{CLiteral, Literal},
        range::Range,
    },
};

/// The output of conflict analysis.
pub struct Analysis {
    /// The learnt clause, with the asserted literal first and a literal of the second-highest level second.
    pub clause: Vec<CLiteral>,

    /// The level to backjump to, at which the clause asserts.
    pub backtrack_level: LevelIndex,

    /// The join of the partitions of every clause used in the derivation.
    pub part: Range,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Derives a first-UIP learnt clause from the conflict at `conflict`.
    ///
    /// Pre: the current decision level is above the root, and every `seen` mark is clear.
    /// Post: every `seen` mark is clear.
    pub fn conflict_analysis(&mut self, conflict: ClauseRef) -> Analysis {
        let mut path_count: usize = 0;
        let mut pivot: Option<CLiteral> = None;

        // Position 0 is reserved for the asserting literal.
        let mut learnt: Vec<CLiteral> = vec![CLiteral::new(0, false)];
        let mut part = Range::default();
        if self.config.log_proof {
            part = self.clause_db.arena[conflict].partition();
        }

        let mut index = self.trail.len();
        let mut reason = Some(conflict);

        loop {
            debug_assert!(reason.is_some(), "Resolved past the implication point");
            let reference = match reason {
                Some(reference) => reference,
                None => break,
            };

            if self.config.log_proof {
                part.join(self.clause_db.arena[reference].partition());
            }
            if self.clause_db.arena[reference].learnt() {
                self.clause_db.bump_activity(reference);
            }

            let start = match pivot {
                None => 0,
                Some(_) => 1,
            };
            for position in start..self.clause_db.arena[reference].size() {
                let literal = self.clause_db.arena[reference].literal(position);
                let atom = literal.atom();

                if self.atom_db.seen[atom as usize] {
                    continue;
                }

                if self.atom_db.level_of(atom) > 0 {
                    self.atom_db.bump_activity(atom);
                    self.atom_db.seen[atom as usize] = true;
                    if self.atom_db.level_of(atom) >= self.decision_level() {
                        path_count += 1;
                    } else {
                        learnt.push(literal);
                    }
                } else if self.config.log_proof {
                    // The literal is proven: fold the partition of its derivation.
                    debug_assert!(!self.atom_db.trail_part[atom as usize].undef());
                    part.join(self.atom_db.trail_part[atom as usize]);
                }
            }

            // Select the next clause to resolve against.
            loop {
                index -= 1;
                if self.atom_db.seen[self.trail.literal(index).atom() as usize] {
                    break;
                }
            }
            let literal = self.trail.literal(index);
            pivot = Some(literal);
            reason = self.atom_db.reason_of(literal.atom());
            self.atom_db.seen[literal.atom() as usize] = false;
            path_count -= 1;

            if path_count == 0 {
                break;
            }
        }

        learnt[0] = match pivot {
            Some(literal) => literal.negate(),
            None => unreachable!("Analysis without a conflict"),
        };

        // Minimize the learnt clause.
        self.analyze_toclear.clear();
        self.analyze_toclear.extend_from_slice(&learnt);
        self.counters.max_literals += learnt.len() as u64;

        match self.config.minimization {
            Minimization::Deep => {
                let mut abstract_levels: u32 = 0;
                for literal in &learnt[1..] {
                    abstract_levels |= self.atom_db.abstract_level(literal.atom());
                }

                let mut write = 1;
                for read in 1..learnt.len() {
                    let literal = learnt[read];
                    let keep = self.atom_db.reason_of(literal.atom()).is_none()
                        || !self.literal_redundant(literal, abstract_levels, &mut part);
                    if keep {
                        learnt[write] = literal;
                        write += 1;
                    }
                }
                learnt.truncate(write);
            }

            Minimization::Basic => {
                debug_assert!(!self.config.log_proof);
                let mut write = 1;
                for read in 1..learnt.len() {
                    let literal = learnt[read];
                    let keep = match self.atom_db.reason_of(literal.atom()) {
                        None => true,
                        Some(reason) => {
                            let mut required = false;
                            for position in 1..self.clause_db.arena[reason].size() {
                                let tail = self.clause_db.arena[reason].literal(position).atom();
                                if !self.atom_db.seen[tail as usize]
                                    && self.atom_db.level_of(tail) > 0
                                {
                                    required = true;
                                    break;
                                }
                            }
                            required
                        }
                    };
                    if keep {
                        learnt[write] = literal;
                        write += 1;
                    }
                }
                learnt.truncate(write);
            }

            Minimization::None => {}
        }

        self.counters.tot_literals += learnt.len() as u64;

        // Find the backtrack level, and place a literal of that level at position 1.
        let backtrack_level = match learnt.len() {
            1 => 0,
            _ => {
                let mut max_index = 1;
                for position in 2..learnt.len() {
                    if self.atom_db.level_of(learnt[position].atom())
                        > self.atom_db.level_of(learnt[max_index].atom())
                    {
                        max_index = position;
                    }
                }
                learnt.swap(1, max_index);
                self.atom_db.level_of(learnt[1].atom())
            }
        };

        for literal in self.analyze_toclear.drain(..) {
            self.atom_db.seen[literal.atom() as usize] = false;
        }

        log::trace!(target: targets::ANALYSIS, "Learnt {learnt:?} asserting at {backtrack_level}");

        Analysis {
            clause: learnt,
            backtrack_level,
            part,
        }
    }

    /// True if every reason path from `literal` leads back to seen or proven literals.
    ///
    /// `abstract_levels` prunes the search: a path through a level outside the learnt clause cannot close.
    /// Partitions met along the search are joined into `part` only if the literal proves redundant.
    fn literal_redundant(
        &mut self,
        literal: CLiteral,
        abstract_levels: u32,
        part: &mut Range,
    ) -> bool {
        self.analyze_stack.clear();
        self.analyze_stack.push(literal);

        let mut local_part = Range::default();
        let top = self.analyze_toclear.len();

        while let Some(next) = self.analyze_stack.pop() {
            let reason = match self.atom_db.reason_of(next.atom()) {
                Some(reason) => reason,
                None => unreachable!("Redundancy search from a decision"),
            };

            if self.config.log_proof {
                local_part.join(self.clause_db.arena[reason].partition());
            }

            for position in 1..self.clause_db.arena[reason].size() {
                let tail = self.clause_db.arena[reason].literal(position);
                let atom = tail.atom();

                if self.atom_db.seen[atom as usize] {
                    continue;
                }

                if self.atom_db.level_of(atom) > 0 {
                    if self.atom_db.reason_of(atom).is_some()
                        && (self.atom_db.abstract_level(atom) & abstract_levels) != 0
                    {
                        self.atom_db.seen[atom as usize] = true;
                        self.analyze_stack.push(tail);
                        self.analyze_toclear.push(tail);
                    } else {
                        // The search failed: roll the marks back to the snapshot.
                        for cleared in self.analyze_toclear.drain(top..) {
                            self.atom_db.seen[cleared.atom() as usize] = false;
                        }
                        return false;
                    }
                } else if self.config.log_proof {
                    debug_assert!(!self.atom_db.trail_part[atom as usize].undef());
                    local_part.join(self.atom_db.trail_part[atom as usize]);
                }
            }
        }

        if self.config.log_proof {
            part.join(local_part);
        }
        true
    }

    /// Expresses the conflict with the assumption `literal` in terms of assumptions, into [conflict](GenericContext::conflict).
    pub fn analyze_final(&mut self, literal: CLiteral) {
        self.conflict.clear();
        self.conflict.push(literal);

        if self.decision_level() == 0 {
            return;
        }

        self.atom_db.seen[literal.atom() as usize] = true;

        for index in (self.trail.level_start(0)..self.trail.len()).rev() {
            let trail_literal = self.trail.literal(index);
            let atom = trail_literal.atom();
            if !self.atom_db.seen[atom as usize] {
                continue;
            }

            match self.atom_db.reason_of(atom) {
                None => {
                    debug_assert!(self.atom_db.level_of(atom) > 0);
                    self.conflict.push(trail_literal.negate());
                }
                Some(reason) => {
                    for position in 1..self.clause_db.arena[reason].size() {
                        let tail = self.clause_db.arena[reason].literal(position).atom();
                        if self.atom_db.level_of(tail) > 0 {
                            self.atom_db.seen[tail as usize] = true;
                        }
                    }
                }
            }
            self.atom_db.seen[atom as usize] = false;
        }

        self.atom_db.seen[literal.atom() as usize] = false;
    }
}

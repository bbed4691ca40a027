/*!
The conflict-driven search loop.

Each iteration propagates, and:

- On a conflict at the root level, the formula is unsatisfiable --- with proof logging the conflicting clause completes the proof.
- On any other conflict, [analysis](crate::procedures::analysis) learns a clause, the trail is unwound to the level at which the clause asserts, and the clause is stored, logged, and attached.
- Without a conflict the loop restarts if the conflict allowance is spent, simplifies and reduces the databases if worthwhile, asserts any pending assumption, and otherwise decides.

Assumptions are asserted one per decision level.
An assumption already satisfied takes an empty (dummy) level; a falsified assumption settles the solve as unsatisfiable under assumptions, with the responsible subset left in [conflict](crate::context::GenericContext::conflict).
*/

use crate::{
    context::GenericContext,
    misc::targets,
    structures::literal::Literal,
    types::err::{self, ErrorKind},
};

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// Every decision atom is assigned without conflict.
    Satisfiable,

    /// A conflict at the root level, or under the assumptions.
    Unsatisfiable,

    /// The conflict allowance or a budget was spent.
    Interrupted,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Searches for a model, allowing `conflicts_allowed` conflicts before an interrupt (negative for no allowance).
    pub fn search(&mut self, conflicts_allowed: i64) -> Result<SearchResult, ErrorKind> {
        debug_assert!(self.ok);

        let mut conflict_count: i64 = 0;
        self.counters.starts += 1;

        loop {
            match self.bcp(false) {
                Err(err::BCPError::Conflict(conflict)) => {
                    self.counters.conflicts += 1;
                    conflict_count += 1;

                    if self.decision_level() == 0 {
                        if self.config.log_proof {
                            self.proof.push(conflict);
                        }
                        return Ok(SearchResult::Unsatisfiable);
                    }

                    let analysis = self.conflict_analysis(conflict);
                    self.backjump(analysis.backtrack_level);

                    if self.config.log_proof {
                        log::trace!(
                            target: targets::PROOF,
                            "Logging lemma {:?} with partition {}",
                            analysis.clause,
                            analysis.part,
                        );
                    }

                    let asserted = analysis.clause[0];
                    if analysis.clause.len() == 1 {
                        if self.config.log_proof {
                            let reference = self.clause_db.arena.alloc(analysis.clause, true)?;
                            self.proof.push(reference);
                            self.clause_db.arena[reference].join_partition(analysis.part);
                            self.assign(asserted, Some(reference));
                        } else {
                            self.assign(asserted, None);
                        }
                    } else {
                        let reference = self.clause_db.arena.alloc(analysis.clause, true)?;
                        if self.config.log_proof {
                            self.proof.push(reference);
                            self.clause_db.arena[reference].join_partition(analysis.part);
                        }
                        self.clause_db.learnts.push(reference);
                        self.clause_db.attach(reference);
                        self.clause_db.bump_activity(reference);
                        self.assign(asserted, Some(reference));
                    }

                    self.atom_db.decay_activity();
                    self.clause_db.decay_activity();

                    self.learntsize_adjust_cnt -= 1;
                    if self.learntsize_adjust_cnt == 0 {
                        self.learntsize_adjust_confl *= self.config.learntsize_adjust_inc;
                        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i64;
                        self.max_learnts *= self.config.learntsize_inc;

                        log::info!(
                            target: targets::REDUCTION,
                            "Conflicts {} | limit {} learnts {} | progress {:.3}%",
                            self.counters.conflicts,
                            self.max_learnts as usize,
                            self.learnt_count(),
                            self.progress_estimate() * 100.0,
                        );
                    }
                }

                Ok(()) => {
                    if (conflicts_allowed >= 0 && conflict_count >= conflicts_allowed)
                        || !self.counters.within_budget()
                    {
                        self.counters.progress = self.progress_estimate();
                        self.backjump(0);
                        return Ok(SearchResult::Interrupted);
                    }

                    if self.decision_level() == 0 && !self.simplify() {
                        return Ok(SearchResult::Unsatisfiable);
                    }

                    if self.learnt_count() as f64 - self.assignment_count() as f64
                        >= self.max_learnts
                    {
                        self.reduce_db();
                    }

                    let mut next = None;
                    while (self.decision_level() as usize) < self.assumptions.len() {
                        let assumption = self.assumptions[self.decision_level() as usize];
                        match self.value_of(assumption) {
                            Some(true) => {
                                // Dummy level, the assumption already holds.
                                self.new_decision_level();
                            }
                            Some(false) => {
                                self.analyze_final(assumption.negate());
                                return Ok(SearchResult::Unsatisfiable);
                            }
                            None => {
                                next = Some(assumption);
                                break;
                            }
                        }
                    }

                    if next.is_none() {
                        self.counters.decisions += 1;
                        next = self.pick_decision_literal();
                    }

                    let Some(decision) = next else {
                        return Ok(SearchResult::Satisfiable);
                    };

                    self.new_decision_level();
                    self.assign(decision, None);
                }
            }
        }
    }
}

/*!
The clause database: the arena, the watch index, and the clause lists.

An original clause is recorded in [originals](ClauseDB::originals) and a learnt clause in [learnts](ClauseDB::learnts), with both allocated in the shared [arena](crate::db::arena).
Attachment to the [watch index](crate::db::watches) is what makes a clause visible to propagation.

Clause activity is maintained here, for use when [reducing](crate::procedures::reduction) the learnt database.
*/

use crate::{
    config::{CLAUSE_ACTIVITY_MAX, Config},
    db::{
        arena::{Arena, ClauseRef},
        watches::{Watcher, Watches},
    },
    misc::targets,
    structures::{literal::Literal, range::Range},
};

/// The clause database.
pub struct ClauseDB {
    /// The arena, holding every clause.
    pub arena: Arena,

    /// The watch index.
    pub watches: Watches,

    /// References to the original clauses of the formula.
    pub originals: Vec<ClauseRef>,

    /// References to the learnt clauses currently kept.
    pub learnts: Vec<ClauseRef>,

    /// The join of the partitions of every original clause.
    pub total_part: Range,

    /// A count of literals in attached original clauses.
    pub original_literal_count: usize,

    /// A count of literals in attached learnt clauses.
    pub learnt_literal_count: usize,

    /// The bump applied to a clause on [bump_activity](ClauseDB::bump_activity).
    activity_inc: f64,

    /// The decay factor applied through [decay_activity](ClauseDB::decay_activity).
    clause_decay: f64,
}

impl ClauseDB {
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            arena: Arena::default(),
            watches: Watches::default(),
            originals: Vec::default(),
            learnts: Vec::default(),
            total_part: Range::default(),
            original_literal_count: 0,
            learnt_literal_count: 0,
            activity_inc: 1.0,
            clause_decay: config.clause_decay,
        }
    }

    /// Attaches the clause behind `reference` to the watch index.
    ///
    /// The clause must have at least two literals, and its watches are the literals at positions 0 and 1.
    pub fn attach(&mut self, reference: ClauseRef) {
        let clause = &self.arena[reference];
        debug_assert!(clause.size() > 1);

        let first = clause.literal(0);
        let second = clause.literal(1);

        self.watches.push(
            first.negate(),
            Watcher {
                clause: reference,
                blocker: second,
            },
        );
        self.watches.push(
            second.negate(),
            Watcher {
                clause: reference,
                blocker: first,
            },
        );

        match clause.learnt() {
            true => self.learnt_literal_count += clause.size(),
            false => self.original_literal_count += clause.size(),
        }
    }

    /// Detaches the clause behind `reference` from the watch index.
    ///
    /// Lazy by default: the affected lists are smudged and the watchers dropped on the next [clean](crate::db::watches::Watches::clean_all).
    pub fn detach(&mut self, reference: ClauseRef, strict: bool) {
        let clause = &self.arena[reference];
        debug_assert!(clause.size() > 1);

        let first = clause.literal(0);
        let second = clause.literal(1);

        if strict {
            self.watches.remove(first.negate(), reference);
            self.watches.remove(second.negate(), reference);
        } else {
            self.watches.smudge(first.negate());
            self.watches.smudge(second.negate());
        }

        // Saturating, as a clause unit under the root valuation is stored without being attached.
        match clause.learnt() {
            true => {
                self.learnt_literal_count = self.learnt_literal_count.saturating_sub(clause.size())
            }
            false => {
                self.original_literal_count =
                    self.original_literal_count.saturating_sub(clause.size())
            }
        }
    }

    /// Bumps the activity of the clause behind `reference`, rescaling every learnt activity if the bump overflows.
    pub fn bump_activity(&mut self, reference: ClauseRef) {
        let clause = &mut self.arena[reference];
        let bumped = clause.activity() + self.activity_inc as f32;
        clause.set_activity(bumped);

        if bumped as f64 > CLAUSE_ACTIVITY_MAX {
            log::trace!(target: targets::CLAUSE_DB, "Rescaling clause activity");
            let factor = (1.0 / CLAUSE_ACTIVITY_MAX) as f32;
            for &learnt in &self.learnts {
                let activity = self.arena[learnt].activity();
                self.arena[learnt].set_activity(activity * factor);
            }
            self.activity_inc *= 1.0 / CLAUSE_ACTIVITY_MAX;
        }
    }

    /// Increases the bump applied to clauses, decaying all current activities relative to future bumps.
    pub fn decay_activity(&mut self) {
        self.activity_inc *= 1.0 / self.clause_decay;
    }

    /// The current clause activity bump, used to set the removal threshold when reducing.
    pub fn activity_inc(&self) -> f64 {
        self.activity_inc
    }
}

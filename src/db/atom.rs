/*!
A database of things keyed by atom.

Things include:
- A current (often partial) valuation.
- The reason and decision level of each assignment, while it stands.
- An [IndexHeap] recording the activity of atoms, where (at least) every unassigned decision atom is active on the heap.
- The previous value of each atom, consulted when phase saving.
- Transient `seen` marks, used by analysis and proof traversal, cleared by whoever set them.
- Partition information: the partition range of each atom over the input clauses it occurs in, and the partition range of the derivation of each proven (level zero) literal.

Stale entries are tolerated on the activity heap --- an atom may sit on the heap while assigned --- and are skipped when popped.
*/

use crate::{
    config::{Activity, Config, VARIABLE_ACTIVITY_MAX},
    db::{ClauseRef, LevelIndex},
    generic::index_heap::IndexHeap,
    structures::{
        atom::{ATOM_MAX, Atom},
        literal::{CLiteral, Literal},
        range::Range,
    },
    types::err::AtomDBError,
};

/// The atom database.
pub struct AtomDB {
    /// The current valuation.
    valuation: Vec<Option<bool>>,

    /// The clause forcing each assignment, if any.
    reasons: Vec<Option<ClauseRef>>,

    /// The decision level of each assignment.
    levels: Vec<LevelIndex>,

    /// Activity of each atom, with unassigned decision atoms active.
    activity_heap: IndexHeap<Activity>,

    /// The value each atom held before its assignment was undone.
    previous_value: Vec<bool>,

    /// Whether each atom is eligible as a decision.
    decision_flags: Vec<bool>,

    /// Transient marks used by analysis and proof traversal.
    pub seen: Vec<bool>,

    /// The partition range of each atom, over the singleton-partition input clauses it occurs in.
    pub part_info: Vec<Range>,

    /// The partition range of the derivation of each proven literal.
    pub trail_part: Vec<Range>,

    /// The bump applied to an atom on [bump_activity](AtomDB::bump_activity).
    activity_inc: Activity,

    /// The decay factor applied through [decay_activity](AtomDB::decay_activity).
    variable_decay: Activity,

    /// A count of decision-eligible atoms.
    decision_atom_count: usize,
}

impl AtomDB {
    pub fn new(config: &Config) -> Self {
        AtomDB {
            valuation: Vec::default(),
            reasons: Vec::default(),
            levels: Vec::default(),
            activity_heap: IndexHeap::default(),
            previous_value: Vec::default(),
            decision_flags: Vec::default(),
            seen: Vec::default(),
            part_info: Vec::default(),
            trail_part: Vec::default(),
            activity_inc: 1.0,
            variable_decay: config.variable_decay,
            decision_atom_count: 0,
        }
    }

    /// A count of atoms in the database.
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// A fresh atom, with each per-atom structure grown in step.
    pub fn fresh_atom(
        &mut self,
        previous_value: bool,
        decision: bool,
        initial_activity: Activity,
    ) -> Result<Atom, AtomDBError> {
        let atom = match Atom::try_from(self.valuation.len()) {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(AtomDBError::AtomsExhausted),
        };

        self.valuation.push(None);
        self.reasons.push(None);
        self.levels.push(0);
        self.previous_value.push(previous_value);
        self.decision_flags.push(decision);
        self.seen.push(false);
        self.part_info.push(Range::default());
        self.trail_part.push(Range::default());

        self.activity_heap.add(atom as usize, initial_activity);
        if decision {
            self.decision_atom_count += 1;
            self.activity_heap.activate(atom as usize);
        }

        Ok(atom)
    }

    /// The value of `atom` on the current valuation.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation[atom as usize]
    }

    /// The value of `literal`, relative to the polarity of the literal.
    ///
    /// `Some(true)` if the literal agrees with the valuation, `Some(false)` if it conflicts, `None` if its atom has no value.
    pub fn value_of_literal(&self, literal: CLiteral) -> Option<bool> {
        self.valuation[literal.atom() as usize].map(|value| value == literal.polarity())
    }

    /// Values the atom of `literal` to the polarity of `literal`, with the given reason and level.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex, reason: Option<ClauseRef>) {
        let atom = literal.atom() as usize;
        self.valuation[atom] = Some(literal.polarity());
        self.levels[atom] = level;
        self.reasons[atom] = reason;
    }

    /// Clears the value of `atom`.
    ///
    /// The activity heap is untouched --- pair with [restore_to_heap](AtomDB::restore_to_heap) where required.
    pub fn clear_value(&mut self, atom: Atom) {
        self.valuation[atom as usize] = None;
    }

    /// Saves the previous value of `atom`, for phase saving.
    pub fn save_phase(&mut self, atom: Atom, value: bool) {
        self.previous_value[atom as usize] = value;
    }

    /// The value `atom` held before its assignment was undone.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_value[atom as usize]
    }

    /// The reason of the assignment of `atom`, if any.
    pub fn reason_of(&self, atom: Atom) -> Option<ClauseRef> {
        self.reasons[atom as usize]
    }

    /// Sets the reason of the assignment of `atom`.
    pub fn set_reason(&mut self, atom: Atom, reason: Option<ClauseRef>) {
        self.reasons[atom as usize] = reason;
    }

    /// Mutable access to the reason slot of `atom`, for relocation during compaction.
    pub fn reason_slot(&mut self, atom: Atom) -> &mut Option<ClauseRef> {
        &mut self.reasons[atom as usize]
    }

    /// The decision level of the assignment of `atom`.
    pub fn level_of(&self, atom: Atom) -> LevelIndex {
        self.levels[atom as usize]
    }

    /// A bitmask abstracting the decision level of `atom`, for cheap intersection tests.
    pub fn abstract_level(&self, atom: Atom) -> u32 {
        1 << (self.levels[atom as usize] & 31)
    }

    /// True if `atom` is eligible as a decision.
    pub fn is_decision(&self, atom: Atom) -> bool {
        self.decision_flags[atom as usize]
    }

    /// Sets whether `atom` is eligible as a decision.
    pub fn set_decision(&mut self, atom: Atom, decision: bool) {
        if decision && !self.decision_flags[atom as usize] {
            self.decision_atom_count += 1;
        } else if !decision && self.decision_flags[atom as usize] {
            self.decision_atom_count -= 1;
        }
        self.decision_flags[atom as usize] = decision;
        if decision && self.value_of(atom).is_none() {
            self.activity_heap.activate(atom as usize);
        }
    }

    /// A count of decision-eligible atoms.
    pub fn decision_atom_count(&self) -> usize {
        self.decision_atom_count
    }

    /// Places `atom` back on the activity heap, if eligible and absent.
    pub fn restore_to_heap(&mut self, atom: Atom) {
        if self.decision_flags[atom as usize] {
            self.activity_heap.activate(atom as usize);
        }
    }

    /// Pops the most active atom off the heap, stale entries included.
    pub fn pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }

    /// A uniformly random active atom, stale entries included.
    pub fn random_active(&self, rng: &mut impl rand::Rng) -> Option<Atom> {
        match self.activity_heap.active_count() {
            0 => None,
            count => Some(self.activity_heap.active_at(rng.random_range(0..count)) as Atom),
        }
    }

    /// Rebuilds the activity heap to hold exactly the unassigned decision atoms.
    pub fn rebuild_heap(&mut self) {
        self.activity_heap.deactivate_all();
        for atom in 0..self.count() {
            if self.decision_flags[atom] && self.valuation[atom].is_none() {
                self.activity_heap.activate(atom);
            }
        }
    }

    /// Bumps the activity of `atom`, rescaling every activity if the bump overflows.
    pub fn bump_activity(&mut self, atom: Atom) {
        let bumped = self.activity_heap.value_at(atom as usize) + self.activity_inc;
        self.activity_heap.revalue(atom as usize, bumped);

        if bumped > VARIABLE_ACTIVITY_MAX {
            let factor = 1.0 / VARIABLE_ACTIVITY_MAX;
            self.activity_heap.rescale(|activity| activity * factor);
            self.activity_inc *= factor;
        }
    }

    /// Increases the bump applied to atoms, decaying all current activities relative to future bumps.
    pub fn decay_activity(&mut self) {
        self.activity_inc *= 1.0 / self.variable_decay;
    }
}

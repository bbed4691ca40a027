/*!
Recovery from a conflict: unwinding the trail to a lower decision level.

Every assignment above the target level is undone: its value is cleared, its atom is returned to the activity heap, and --- subject to the [phase saving](crate::config::PhaseSaving) configuration --- its value is remembered for the next decision on the atom.
*/

use crate::{
    config::PhaseSaving,
    context::GenericContext,
    db::LevelIndex,
    misc::targets,
    structures::literal::Literal,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Unwinds the trail to the `target` level, keeping every assignment at that level but none beyond.
    ///
    /// Safe to call with a target at or above the current level --- nothing happens.
    pub fn backjump(&mut self, target: LevelIndex) {
        if self.decision_level() <= target {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.decision_level());

        let target_start = self.trail.level_start(target);
        let top_start = match self.trail.level_indicies.last() {
            Some(&start) => start,
            None => 0,
        };

        for index in (target_start..self.trail.len()).rev() {
            let literal = self.trail.literal(index);
            let atom = literal.atom();

            self.atom_db.clear_value(atom);

            let save = match self.config.phase_saving {
                PhaseSaving::Full => true,
                PhaseSaving::Limited => index > top_start,
                PhaseSaving::None => false,
            };
            if save {
                self.atom_db.save_phase(atom, literal.polarity());
            }

            self.atom_db.restore_to_heap(atom);
        }

        self.trail.q_head = target_start;
        self.trail.shrink_to(target_start);
        self.trail.level_indicies.truncate(target as usize);
    }
}

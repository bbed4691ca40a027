/*!
Choosing the next literal to assume.

The atom is chosen from the activity heap --- at random with probability [random_decision_frequency](crate::config::Config::random_decision_frequency), by maximum activity otherwise --- skipping stale heap entries.

The polarity is the saved phase of the atom, or random under [random_polarity](crate::config::Config::random_polarity).
*/

use crate::{
    context::GenericContext,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

impl<R: rand::Rng> GenericContext<R> {
    /// The next decision literal, or none if every decision atom is assigned.
    pub fn pick_decision_literal(&mut self) -> Option<CLiteral> {
        let mut next: Option<Atom> = None;

        if self.rng.random_bool(self.config.random_decision_frequency)
            && let Some(atom) = self.atom_db.random_active(&mut self.rng)
        {
            if self.atom_db.value_of(atom).is_none() && self.atom_db.is_decision(atom) {
                self.counters.random_decisions += 1;
            }
            next = Some(atom);
        }

        loop {
            match next {
                Some(atom)
                    if self.atom_db.value_of(atom).is_none() && self.atom_db.is_decision(atom) =>
                {
                    break;
                }
                _ => match self.atom_db.pop_most_active() {
                    None => return None,
                    Some(atom) => next = Some(atom),
                },
            }
        }

        let atom = next?;
        let polarity = match self.config.random_polarity {
            true => self.rng.random_bool(0.5),
            false => self.atom_db.previous_value_of(atom),
        };

        let literal = CLiteral::new(atom, polarity);
        log::trace!("Decision {literal}");
        Some(literal)
    }
}

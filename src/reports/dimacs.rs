/*!
Export of the current formula in DIMACS form.

The export covers the original clauses not yet satisfied at the root, with false literals dropped, plus a unit clause per given assumption.
Atoms are renumbered densely, so the export stands alone.

A context already identified as unsatisfiable exports a canonical contradiction.
*/

use std::io::Write;

use crate::{
    context::GenericContext,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// A dense renaming of atoms, built as atoms are met.
#[derive(Default)]
struct AtomMap {
    names: Vec<Option<Atom>>,
    next: Atom,
}

impl AtomMap {
    fn name_of(&mut self, atom: Atom) -> Atom {
        if self.names.len() <= atom as usize {
            self.names.resize(atom as usize + 1, None);
        }
        match self.names[atom as usize] {
            Some(name) => name,
            None => {
                let name = self.next;
                self.names[atom as usize] = Some(name);
                self.next += 1;
                name
            }
        }
    }

    fn literal_as_int(&mut self, literal: CLiteral) -> isize {
        let magnitude = (self.name_of(literal.atom()) + 1) as isize;
        match literal.polarity() {
            true => magnitude,
            false => -magnitude,
        }
    }
}

impl<R: rand::Rng> GenericContext<R> {
    /// Writes the formula in the context to `writer` in DIMACS form, with the given assumptions as units.
    pub fn to_dimacs(
        &self,
        writer: &mut impl Write,
        assumptions: &[CLiteral],
    ) -> std::io::Result<()> {
        if !self.ok {
            return write!(writer, "p cnf 1 2\n1 0\n-1 0\n");
        }

        let mut map = AtomMap::default();
        let mut count = 0;

        // Name every atom which will appear, so the header is complete.
        for &reference in &self.clause_db.originals {
            if self.satisfied(reference) {
                continue;
            }
            count += 1;
            for &literal in self.clause_db.arena[reference].literals() {
                if self.value_of(literal) != Some(false) {
                    map.name_of(literal.atom());
                }
            }
        }
        for &assumption in assumptions {
            map.name_of(assumption.atom());
        }
        count += assumptions.len();

        writeln!(writer, "p cnf {} {}", map.next, count)?;

        for &assumption in assumptions {
            debug_assert!(self.value_of(assumption) != Some(false));
            writeln!(writer, "{} 0", map.literal_as_int(assumption))?;
        }

        for &reference in &self.clause_db.originals {
            if self.satisfied(reference) {
                continue;
            }
            for &literal in self.clause_db.arena[reference].literals() {
                if self.value_of(literal) != Some(false) {
                    write!(writer, "{} ", map.literal_as_int(literal))?;
                }
            }
            writeln!(writer, "0")?;
        }

        Ok(())
    }
}

/*!
The watch index.

For each literal *p* a list of watchers is kept, one for each attached clause watching *~p*.
When *p* is assigned true those clauses are the only ones which may have become unit or unsatisfied, and [bcp](crate::procedures::bcp) drains the list.

Each watcher carries a blocker literal from the clause.
If the blocker is already true the clause is satisfied and inspecting the clause itself can be skipped.

Detaching a clause is lazy by default: the lists holding its watchers are [smudged](Watches::smudge) and the watchers are dropped in bulk by [clean_all](Watches::clean_all) before the next propagation pass.
*/

use crate::{
    db::arena::{Arena, ClauseRef},
    structures::literal::{CLiteral, Literal},
};

/// A watcher, an entry in a watch list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Watcher {
    /// The watching clause.
    pub clause: ClauseRef,

    /// A literal of the clause, satisfaction of which makes inspection of the clause unnecessary.
    pub blocker: CLiteral,
}

/// Watch lists for each literal, with support for lazy deletion.
#[derive(Default)]
pub struct Watches {
    /// A watch list per literal, indexed by [Literal::index].
    lists: Vec<Vec<Watcher>>,

    /// Whether the list at an index may hold watchers of deleted clauses.
    dirty: Vec<bool>,

    /// Indicies of dirty lists.
    dirties: Vec<usize>,
}

impl Watches {
    /// Extends the structure with lists for both literals of a fresh atom.
    pub fn fresh_atom(&mut self) {
        self.lists.push(Vec::default());
        self.lists.push(Vec::default());
        self.dirty.push(false);
        self.dirty.push(false);
    }

    /// The watch list of `literal`.
    pub fn list(&self, literal: CLiteral) -> &[Watcher] {
        &self.lists[literal.index()]
    }

    /// Adds `watcher` to the watch list of `literal`.
    pub fn push(&mut self, literal: CLiteral, watcher: Watcher) {
        self.lists[literal.index()].push(watcher);
    }

    /// Removes the watcher of `clause` from the watch list of `literal`, immediately.
    pub fn remove(&mut self, literal: CLiteral, clause: ClauseRef) {
        let list = &mut self.lists[literal.index()];
        if let Some(position) = list.iter().position(|watcher| watcher.clause == clause) {
            list.swap_remove(position);
        }
    }

    /// Takes ownership of the watch list of `literal`, leaving an empty list.
    ///
    /// Paired with [restore](Watches::restore) this allows a list to be drained while watchers are pushed to *other* lists.
    /// During propagation of `literal` no watcher is ever moved to the list of `literal`, as the fresh watched literal is never false while `~literal` is.
    pub fn take(&mut self, literal: CLiteral) -> Vec<Watcher> {
        std::mem::take(&mut self.lists[literal.index()])
    }

    /// Restores a list taken with [take](Watches::take).
    pub fn restore(&mut self, literal: CLiteral, list: Vec<Watcher>) {
        self.lists[literal.index()] = list;
    }

    /// Notes the watch list of `literal` may hold watchers of deleted clauses.
    pub fn smudge(&mut self, literal: CLiteral) {
        let index = literal.index();
        if !self.dirty[index] {
            self.dirty[index] = true;
            self.dirties.push(index);
        }
    }

    /// Drops every watcher of a deleted clause from each dirty list.
    pub fn clean_all(&mut self, arena: &Arena) {
        for &index in &self.dirties {
            self.lists[index].retain(|watcher| !arena[watcher.clause].deleted());
            self.dirty[index] = false;
        }
        self.dirties.clear();
    }

    /// Mutable access to every list, for relocation during compaction.
    pub fn lists_mut(&mut self) -> impl Iterator<Item = &mut Vec<Watcher>> {
        self.lists.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_removal() {
        let mut arena = Arena::default();
        let mut watches = Watches::default();
        watches.fresh_atom();

        let clause = arena
            .alloc(vec![CLiteral::new(0, true), CLiteral::new(0, false)], false)
            .unwrap();

        let p = CLiteral::new(0, true);
        watches.push(
            p,
            Watcher {
                clause,
                blocker: CLiteral::new(0, false),
            },
        );

        watches.remove(p, clause);
        assert!(watches.list(p).is_empty());
    }

    #[test]
    fn smudge_and_clean() {
        let mut arena = Arena::default();
        let mut watches = Watches::default();
        watches.fresh_atom();

        let live = arena
            .alloc(vec![CLiteral::new(0, true), CLiteral::new(0, false)], false)
            .unwrap();
        let dead = arena
            .alloc(vec![CLiteral::new(0, false), CLiteral::new(0, true)], false)
            .unwrap();
        arena[dead].set_deleted(true);

        let p = CLiteral::new(0, true);
        watches.push(
            p,
            Watcher {
                clause: live,
                blocker: CLiteral::new(0, false),
            },
        );
        watches.push(
            p,
            Watcher {
                clause: dead,
                blocker: CLiteral::new(0, false),
            },
        );

        watches.smudge(p);
        watches.clean_all(&arena);

        assert_eq!(watches.list(p).len(), 1);
        assert_eq!(watches.list(p)[0].clause, live);
    }
}

/*!
The proof log, an append-only record of the derivation history.

Entries are arena references, in the order the referenced clauses were learnt or deleted:
- A learnt clause is appended when it is stored.
- A deleted clause is appended again at the point of deletion, distinguished by the deletion mark it carries from then on.
- The last entry of a completed proof is the conflict clause of the final, root level, conflict --- the witness for the empty clause.

[Validation](crate::procedures::validate) walks the log backwards to check each lemma and mark the core; [replay](crate::procedures::replay) walks it forwards to rebuild the resolution proof for a visitor.
*/

use crate::db::ClauseRef;

/// The proof log.
#[derive(Default)]
pub struct ProofLog {
    entries: Vec<ClauseRef>,
}

impl ProofLog {
    /// Appends a reference to the log.
    pub fn push(&mut self, reference: ClauseRef) {
        self.entries.push(reference);
    }

    /// The entry at `index`.
    pub fn entry(&self, index: usize) -> ClauseRef {
        self.entries[index]
    }

    /// The final entry, if any.
    pub fn last(&self) -> Option<ClauseRef> {
        self.entries.last().copied()
    }

    /// A count of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutable access to every entry, for relocation during compaction.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut ClauseRef> {
        self.entries.iter_mut()
    }
}

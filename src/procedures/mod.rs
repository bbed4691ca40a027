/*!
The procedures of a solve, factored by task.

- [bcp] --- boolean constraint propagation over the watch index.
- [analysis] --- first-UIP conflict analysis, with optional minimization.
- [backjump] --- recovery from a conflict, and decision levels generally.
- [decision] --- choosing the next literal to assume.
- [search] --- the conflict-driven search loop between restarts.
- [solve] --- restart scheduling around the search loop.
- [reduction] --- learnt database reduction, root simplification, and compaction.
- [validate] --- the backward pass checking each lemma of a logged proof.
- [replay] --- the forward pass reporting the resolution proof to a visitor.
*/

pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod reduction;
pub mod replay;
pub mod search;
pub mod solve;
pub mod validate;

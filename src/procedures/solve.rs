/*!
Determines the satisfiability of the formula in a context.

[solve](crate::context::GenericContext::solve) schedules runs of the [search](crate::procedures::search) loop, each bounded by a growing conflict allowance: the luby sequence scaled by [restart_first](crate::config::Config::restart_first), or a geometric series, per [luby_restarts](crate::config::Config::luby_restarts).

On a satisfiable search the valuation is copied to [model](crate::context::GenericContext::model).
On an unsatisfiable search with no assumption conflict recorded the formula itself is unsatisfiable and [ok](crate::context::GenericContext::ok) is cleared --- with proof logging the proof is then complete, and may be [validated](crate::procedures::validate) and [replayed](crate::procedures::replay).
A spent budget or an interrupt reports unknown.

# Example

```rust
# use vouch_sat::config::Config;
# use vouch_sat::context::Context;
# use vouch_sat::reports::Report;
# use vouch_sat::structures::range::Range;
let mut ctx = Context::from_config(Config::default());

let p = ctx.fresh_literal().unwrap();

assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
assert!(ctx.add_clause(vec![-p], Range::singleton(1)).is_err());

assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
assert!(ctx.validate().is_ok());
```
*/

use crate::{
    context::GenericContext,
    generic::luby::luby,
    procedures::search::SearchResult,
    reports::Report,
    structures::literal::CLiteral,
    types::err::ErrorKind,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Determines the satisfiability of the formula in the context.
    pub fn solve(&mut self) -> Result<Report, ErrorKind> {
        self.solve_internal()
    }

    /// As [solve](GenericContext::solve), under the given assumptions.
    ///
    /// The assumptions are kept on the context: on an unsatisfiable result [conflict](GenericContext::conflict) holds the responsible subset.
    pub fn solve_given(&mut self, assumptions: Vec<CLiteral>) -> Result<Report, ErrorKind> {
        self.assumptions = assumptions;
        self.solve_internal()
    }

    fn solve_internal(&mut self) -> Result<Report, ErrorKind> {
        self.model.clear();
        self.conflict.clear();

        if !self.ok {
            return Ok(Report::Unsatisfiable);
        }

        self.counters.solves += 1;

        self.max_learnts = self.original_count() as f64 * self.config.learntsize_factor;
        self.learntsize_adjust_confl = self.config.learntsize_adjust_start;
        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i64;

        let mut status: Option<SearchResult> = None;
        let mut current_restarts: u32 = 0;

        loop {
            let rest_base = match self.config.luby_restarts {
                true => luby(self.config.restart_inc, current_restarts),
                false => self.config.restart_inc.powi(current_restarts as i32),
            };

            match self.search((rest_base * self.config.restart_first as f64) as i64)? {
                SearchResult::Interrupted => {}
                result => {
                    status = Some(result);
                    break;
                }
            }

            if !self.counters.within_budget() {
                break;
            }
            current_restarts += 1;
        }

        let report = match status {
            Some(SearchResult::Satisfiable) => {
                self.model = (0..self.atom_db.count())
                    .map(|atom| self.atom_db.value_of(atom as u32))
                    .collect();
                Report::Satisfiable
            }
            Some(SearchResult::Unsatisfiable) => {
                if self.conflict.is_empty() {
                    self.ok = false;
                }
                Report::Unsatisfiable
            }
            Some(SearchResult::Interrupted) | None => Report::Unknown,
        };

        self.backjump(0);
        Ok(report)
    }
}

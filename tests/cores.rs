use vouch_sat::{
    config::Config,
    context::Context,
    db::{ClauseRef, arena::Arena},
    proof::{ProofVisitor, ResolutionChain, trace::TraceVisitor},
    reports::Report,
    structures::{literal::CLiteral, range::Range},
};

/// Counts callbacks, and records the shape of the final (empty clause) chain.
#[derive(Default)]
struct CountingVisitor {
    resolvents: usize,
    unit_chains: usize,
    clause_chains: usize,
    final_chains: usize,
    final_antecedents: usize,
}

impl ProofVisitor for CountingVisitor {
    fn visit_resolvent(&mut self, _: &Arena, _: CLiteral, _: CLiteral, _: ClauseRef) {
        self.resolvents += 1;
    }

    fn visit_unit_chain(&mut self, _: &Arena, _: &ResolutionChain, _: CLiteral) {
        self.unit_chains += 1;
    }

    fn visit_clause_chain(&mut self, _: &Arena, chain: &ResolutionChain, parent: Option<ClauseRef>) {
        self.clause_chains += 1;
        if parent.is_none() {
            self.final_chains += 1;
            self.final_antecedents = chain.pivots.len() + 1;
        }
    }
}

mod validation {
    use super::*;

    #[test]
    fn contradictory_units() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p], Range::singleton(1)).is_err());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.proof.len() >= 1);
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn two_pigeons_one_hole() {
        let mut ctx = Context::from_config(Config::default());

        let [a, b] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        let mut unsat_on_addition = false;
        for (clause, part) in [
            (vec![a, b], 0),
            (vec![-a, -b], 1),
            (vec![a], 2),
            (vec![b], 3),
        ] {
            if ctx.add_clause(clause, Range::singleton(part)).is_err() {
                unsat_on_addition = true;
            }
        }

        if !unsat_on_addition {
            assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        }
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn validation_requires_a_proof() {
        let mut ctx = Context::from_config(Config {
            log_proof: false,
            ..Config::default()
        });
        let p = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p], Range::singleton(1)).is_err());

        assert!(ctx.validate().is_err());
    }

    #[test]
    fn validation_requires_unsatisfiability() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        assert!(ctx.validate().is_err());
    }
}

mod replay {
    use super::*;

    #[test]
    fn contradictory_units_trace() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p], Range::singleton(1)).is_err());

        assert!(ctx.validate().is_ok());

        let mut visitor = TraceVisitor::new(Vec::new());
        assert!(ctx.replay(&mut visitor).is_ok());
        let (result, trace) = visitor.finish();
        assert!(result.is_ok());

        // Both unit inputs as leaves, then the empty clause resolved from them.
        let text = String::from_utf8(trace).unwrap();
        assert_eq!(text, "1 -1 0 0\n2 1 0 0\n3 0 1 2 0\n");
    }

    #[test]
    fn contradictory_units_shape() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p], Range::singleton(1)).is_err());
        assert!(ctx.validate().is_ok());

        let mut visitor = CountingVisitor::default();
        assert!(ctx.replay(&mut visitor).is_ok());

        assert_eq!(visitor.final_chains, 1);
        assert_eq!(visitor.final_antecedents, 2);
    }

    #[test]
    fn pigeons_trace_ends_with_the_empty_clause() {
        let mut ctx = Context::from_config(Config::default());

        let [a, b] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        let mut unsat_on_addition = false;
        for (clause, part) in [
            (vec![a, b], 0),
            (vec![-a, -b], 1),
            (vec![a], 2),
            (vec![b], 3),
        ] {
            if ctx.add_clause(clause, Range::singleton(part)).is_err() {
                unsat_on_addition = true;
            }
        }
        if !unsat_on_addition {
            assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        }
        assert!(ctx.validate().is_ok());

        let mut visitor = TraceVisitor::new(Vec::new());
        assert!(ctx.replay(&mut visitor).is_ok());
        let (result, trace) = visitor.finish();
        assert!(result.is_ok());

        let text = String::from_utf8(trace).unwrap();
        let last = text.lines().last().unwrap();
        let tokens: Vec<&str> = last.split_whitespace().collect();

        // The final resolvent is the empty clause with at least two antecedents.
        assert_eq!(tokens[1], "0");
        assert!(tokens.len() >= 5);
        assert_eq!(*tokens.last().unwrap(), "0");
    }
}

mod pigeonhole {
    use super::*;

    /// Three pigeons into two holes: `lits[i][j]` reads pigeon `i` sits in hole `j`.
    fn three_pigeons(ctx: &mut Context) -> bool {
        let literals = ctx.fresh_literals(6).unwrap();
        let lits: Vec<&[CLiteral]> = literals.chunks(2).collect();

        let mut part = 0;
        let mut unsat = false;

        for pigeon in 0..3 {
            let clause = vec![lits[pigeon][0], lits[pigeon][1]];
            unsat |= ctx.add_clause(clause, Range::singleton(part)).is_err();
            part += 1;
        }

        for hole in 0..2 {
            for first in 0..3 {
                for second in (first + 1)..3 {
                    let clause = vec![-lits[first][hole], -lits[second][hole]];
                    unsat |= ctx.add_clause(clause, Range::singleton(part)).is_err();
                    part += 1;
                }
            }
        }

        unsat
    }

    #[test]
    fn refuted_validated_replayed() {
        let mut ctx = Context::from_config(Config::default());

        if !three_pigeons(&mut ctx) {
            assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        }

        // Every proof entry carries a partition within the partitions of the input.
        let total = ctx.clause_db.total_part;
        for entry in 0..ctx.proof.len() {
            let partition = ctx.clause_db.arena[ctx.proof.entry(entry)].partition();
            assert!(!partition.undef());
            assert!(total.min() <= partition.min());
            assert!(partition.max() <= total.max());
        }

        assert!(ctx.validate().is_ok());

        let mut visitor = CountingVisitor::default();
        assert!(ctx.replay(&mut visitor).is_ok());

        assert_eq!(visitor.final_chains, 1);
        assert!(visitor.final_antecedents >= 2);
        assert!(visitor.clause_chains >= 1);
    }

    #[test]
    fn traces_are_deterministic() {
        let run = || {
            let mut ctx = Context::from_config(Config::default());
            if !three_pigeons(&mut ctx) {
                assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
            }
            assert!(ctx.validate().is_ok());

            let mut visitor = TraceVisitor::new(Vec::new());
            assert!(ctx.replay(&mut visitor).is_ok());
            let (result, trace) = visitor.finish();
            assert!(result.is_ok());
            trace
        };

        assert_eq!(run(), run());
    }
}

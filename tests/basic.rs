use vouch_sat::{
    builder::ClauseOk,
    config::Config,
    context::Context,
    reports::Report,
    structures::{literal::Literal, range::Range},
};

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal().unwrap();

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(vec![p], Range::singleton(0)));

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value_of(p), Some(true));
    }

    #[test]
    fn conflict() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p, -q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![p, -q], Range::singleton(1)).is_ok());

        // The final clause forces a root conflict, settled during addition or the solve.
        let addition = ctx.add_clause(vec![-p, q], Range::singleton(1));
        match addition {
            Err(_) => assert!(!ctx.ok),
            Ok(_) => assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable)),
        }
    }

    #[test]
    fn unit_conjunct() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(vec![p, q], Range::singleton(0)));
        assert!(ctx.add_clause(vec![-p], Range::singleton(1)).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        assert_eq!(ctx.value_of(p), Some(false));
        assert_eq!(ctx.value_of(q), Some(true));
    }

    #[test]
    fn duplicates_collapse() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert_eq!(
            Ok(ClauseOk::Added),
            ctx.add_clause(vec![p, q, p, q, p], Range::singleton(0))
        );
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
    }

    #[test]
    fn tautologies_are_dropped() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal().unwrap();

        assert_eq!(
            Ok(ClauseOk::Tautology),
            ctx.add_clause(vec![p, -p], Range::singleton(0))
        );
        assert_eq!(ctx.original_count(), 0);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        let mut ctx = Context::from_config(Config::default());
        let _ = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![], Range::singleton(0)).is_err());
        assert!(!ctx.ok);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn model_satisfies_every_clause() {
        let mut ctx = Context::from_config(Config::default());

        let literals = ctx.fresh_literals(4).unwrap();
        let [p, q, r, s] = *literals.as_slice() else {
            panic!("Insufficient literals");
        };

        let clauses = [
            vec![p, q, -r],
            vec![-p, r],
            vec![-q, -s],
            vec![r, s],
            vec![-r, -s, p],
        ];

        for clause in &clauses {
            assert!(ctx.add_clause(clause.clone(), Range::singleton(0)).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        for clause in &clauses {
            assert!(
                clause
                    .iter()
                    .any(|literal| ctx.model[literal.atom() as usize] == Some(literal.polarity()))
            );
        }
    }

    #[test]
    fn non_decision_atoms_are_left_alone() {
        let mut ctx = Context::from_config(Config::default());

        let passive = ctx.fresh_atom_detailed(false, false).unwrap();
        let retired = ctx.fresh_atom().unwrap();
        ctx.atom_db.set_decision(retired, false);
        let p = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        // Nothing constrains the passive atoms, and no decision values them.
        assert_eq!(ctx.model[passive as usize], None);
        assert_eq!(ctx.model[retired as usize], None);
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![p, -q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p, r], Range::singleton(1)).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        let first_model = ctx.model.clone();

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.model, first_model);
    }
}

mod dimacs {
    use super::*;

    #[test]
    fn export_roundtrip_shape() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-q, r], Range::singleton(0)).is_ok());

        let mut out = Vec::new();
        assert!(ctx.to_dimacs(&mut out, &[p]).is_ok());
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("p cnf 3 3"));
        assert_eq!(lines.next(), Some("1 0"));
        assert!(text.lines().count() == 4);
    }

    #[test]
    fn export_of_unsatisfiable_context() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal().unwrap();

        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p], Range::singleton(1)).is_err());

        let mut out = Vec::new();
        assert!(ctx.to_dimacs(&mut out, &[]).is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), "p cnf 1 2\n1 0\n-1 0\n");
    }
}

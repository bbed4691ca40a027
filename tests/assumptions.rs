use vouch_sat::{
    config::Config,
    context::Context,
    reports::Report,
    structures::{literal::Literal, range::Range},
};

mod basic_assumptions {
    use super::*;

    #[test]
    fn direct() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![-p, q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-q], Range::singleton(0)).is_ok());

        assert_eq!(ctx.solve_given(vec![p]), Ok(Report::Unsatisfiable));

        assert!(ctx.conflict.contains(&-p));
    }

    #[test]
    fn small_chain() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r, s, t] = *ctx.fresh_literals(5).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![-p, q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-q, r], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-r, s], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-s, t], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-t], Range::singleton(0)).is_ok());

        assert_eq!(ctx.solve_given(vec![p]), Ok(Report::Unsatisfiable));

        assert!(ctx.conflict.contains(&-p));
    }

    #[test]
    fn guided_model() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-p, r], Range::singleton(0)).is_ok());

        assert_eq!(ctx.solve_given(vec![-r]), Ok(Report::Satisfiable));

        assert_eq!(ctx.model[r.atom() as usize], Some(false));
        assert_eq!(ctx.model[p.atom() as usize], Some(false));
        assert_eq!(ctx.model[q.atom() as usize], Some(true));
    }

    #[test]
    fn satisfied_assumptions_take_dummy_levels() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        // The unit makes the assumption of p hold before any decision.
        assert!(ctx.add_clause(vec![p], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![p, q], Range::singleton(0)).is_ok());

        assert_eq!(ctx.solve_given(vec![p]), Ok(Report::Satisfiable));
        assert_eq!(ctx.model[p.atom() as usize], Some(true));
    }

    #[test]
    fn assumptions_do_not_stick() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).unwrap().as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q], Range::singleton(0)).is_ok());
        assert!(ctx.add_clause(vec![-q], Range::singleton(0)).is_ok());

        assert_eq!(ctx.solve_given(vec![-p]), Ok(Report::Unsatisfiable));

        // The formula itself remains satisfiable.
        assert_eq!(ctx.solve_given(vec![]), Ok(Report::Satisfiable));
        assert_eq!(ctx.model[p.atom() as usize], Some(true));
    }
}

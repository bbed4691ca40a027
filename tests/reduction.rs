use rand::{Rng, SeedableRng};

use vouch_sat::{
    config::Config,
    context::Context,
    generic::minimal_pcg::MinimalPCG32,
    reports::Report,
    structures::{
        literal::{CLiteral, Literal},
        range::Range,
    },
};

const ATOMS: usize = 60;
const CLAUSES: usize = 255;

/// A deterministic random 3-SAT instance, near the satisfiability threshold.
fn random_formula(seed: u64) -> Vec<Vec<CLiteral>> {
    let mut rng = MinimalPCG32::from_seed(seed.to_le_bytes());
    let mut formula = Vec::with_capacity(CLAUSES);

    while formula.len() < CLAUSES {
        let mut clause: Vec<CLiteral> = Vec::with_capacity(3);
        while clause.len() < 3 {
            let atom = rng.random_range(0..ATOMS as u32);
            if clause.iter().all(|literal| literal.atom() != atom) {
                clause.push(CLiteral::new(atom, rng.random_bool(0.5)));
            }
        }
        formula.push(clause);
    }

    formula
}

fn load(ctx: &mut Context, formula: &[Vec<CLiteral>]) {
    let _ = ctx.fresh_literals(ATOMS).unwrap();
    for (index, clause) in formula.iter().enumerate() {
        assert!(
            ctx.add_clause(clause.clone(), Range::singleton(index as u32))
                .is_ok()
        );
    }
}

mod random_instances {
    use super::*;

    #[test]
    fn verdicts_agree_across_proof_modes() {
        let formula = random_formula(5158);

        let mut with_proof = Context::from_config(Config::default());
        load(&mut with_proof, &formula);
        let with_proof_report = with_proof.solve().unwrap();
        assert_ne!(with_proof_report, Report::Unknown);

        let mut without_proof = Context::from_config(Config {
            log_proof: false,
            ..Config::default()
        });
        load(&mut without_proof, &formula);
        let without_proof_report = without_proof.solve().unwrap();

        assert_eq!(with_proof_report, without_proof_report);

        // An eager compaction threshold exercises relocation without changing the verdict.
        let mut compacting = Context::from_config(Config {
            log_proof: false,
            garbage_frac: 0.05,
            ..Config::default()
        });
        load(&mut compacting, &formula);
        assert_eq!(compacting.solve().unwrap(), with_proof_report);

        match with_proof_report {
            Report::Satisfiable => {
                for clause in &formula {
                    assert!(clause.iter().any(|literal| {
                        with_proof.model[literal.atom() as usize] == Some(literal.polarity())
                    }));
                }
            }
            Report::Unsatisfiable => {
                assert!(with_proof.validate().is_ok());
            }
            Report::Unknown => unreachable!(),
        }
    }

    #[test]
    fn learnt_clauses_stay_sound() {
        // Harder instances force learning, reduction, and restarts.
        for seed in [3, 91, 648, 253] {
            let formula = random_formula(seed);

            let mut ctx = Context::from_config(Config::default());
            load(&mut ctx, &formula);

            match ctx.solve().unwrap() {
                Report::Satisfiable => {
                    for clause in &formula {
                        assert!(clause.iter().any(|literal| {
                            ctx.model[literal.atom() as usize] == Some(literal.polarity())
                        }));
                    }
                }
                Report::Unsatisfiable => {
                    assert!(ctx.validate().is_ok());
                }
                Report::Unknown => unreachable!(),
            }
        }
    }

    #[test]
    fn kept_learnts_are_live() {
        let formula = random_formula(7919);

        let mut ctx = Context::from_config(Config::default());
        load(&mut ctx, &formula);
        let _ = ctx.solve().unwrap();

        // The learnt list holds only clauses not marked deleted.
        for &reference in &ctx.clause_db.learnts {
            assert!(!ctx.clause_db.arena[reference].deleted());
        }
    }
}

mod budgets {
    use super::*;

    #[test]
    fn spent_conflict_budget_reports_unknown() {
        let formula = random_formula(5158);

        let mut ctx = Context::from_config(Config::default());
        load(&mut ctx, &formula);
        ctx.set_conflict_budget(0);

        assert_eq!(ctx.solve(), Ok(Report::Unknown));

        ctx.budgets_off();
        assert_ne!(ctx.solve(), Ok(Report::Unknown));
    }

    #[test]
    fn interrupts_report_unknown() {
        let formula = random_formula(5158);

        let mut ctx = Context::from_config(Config::default());
        load(&mut ctx, &formula);
        ctx.interrupt();

        assert_eq!(ctx.solve(), Ok(Report::Unknown));

        ctx.clear_interrupt();
        assert_ne!(ctx.solve(), Ok(Report::Unknown));
    }
}

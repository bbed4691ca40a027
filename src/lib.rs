//! A library for determining the satisfiability of boolean formulas written in conjunctive normal form --- and for backing up an *unsatisfiable* answer with a checked, replayable resolution proof.
//!
//! vouch_sat is a conflict-driven clause-learning solver in the MiniSAT tradition, extended with three tightly coupled subsystems:
//! - A **proof log**: every learnt clause, every deletion, and the final conflict are recorded, and clauses carry *partition* annotations joined through resolution --- the raw material for Craig interpolation.
//! - A **validator**: a backward pass which re-checks each lemma of the log by reverse unit propagation and marks the clauses the refutation actually needs --- the core.
//! - A **replayer**: a forward pass which rebuilds the refutation from the core and reports each resolution, pivot by pivot, to a pluggable [ProofVisitor](crate::proof::ProofVisitor).
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context](crate::context).
//!
//! Contexts are built from a [configuration](crate::config), given clauses [programatically](crate::context::GenericContext::add_clause), and queried with [solve](crate::context::GenericContext::solve).
//! Internally, a solve is viewed in terms of relationships between a handful of [databases](crate::db): the formula lives in a clause database, the valuation in an atom database, and the chronology of assignments on the trail.
//! The [procedures](crate::procedures) of a solve read some databases to revise others, around the conflict-driven loop.
//!
//! Useful starting points:
//! - The [solve procedure](crate::procedures::solve), for the dynamics of a solve.
//! - The [proof log](crate::db::proof) and [validation](crate::procedures::validate), for what makes an unsatisfiable answer checkable.
//! - The [visitor contract](crate::proof), for consuming a replayed proof.
//!
//! # Example
//!
//! Prove a two-pigeon, one-hole formula unsatisfiable, validate the proof, and print the resolution trace:
//!
//! ```rust
//! # use vouch_sat::config::Config;
//! # use vouch_sat::context::Context;
//! # use vouch_sat::proof::trace::TraceVisitor;
//! # use vouch_sat::reports::Report;
//! # use vouch_sat::structures::range::Range;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let p = ctx.fresh_literal().unwrap();
//! let q = ctx.fresh_literal().unwrap();
//!
//! let mut trivially_unsat = false;
//! for (clause, part) in [
//!     (vec![p, q], 0),
//!     (vec![-p, -q], 0),
//!     (vec![p], 1),
//!     (vec![q], 1),
//! ] {
//!     if ctx.add_clause(clause, Range::singleton(part)).is_err() {
//!         trivially_unsat = true;
//!     }
//! }
//!
//! if !trivially_unsat {
//!     assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
//! }
//! assert!(ctx.validate().is_ok());
//!
//! let mut visitor = TraceVisitor::new(Vec::new());
//! assert!(ctx.replay(&mut visitor).is_ok());
//!
//! let (result, trace) = visitor.finish();
//! assert!(result.is_ok());
//! assert!(!trace.is_empty());
//! ```
//!
//! # Logs
//!
//! To help diagnose issues (somewhat) detailed calls to [log!](log) are made, with targets defined in [misc] to narrow output to relevant parts of the library.
//! As logging is only built on request, logs are verbose.

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;
pub mod proof;
pub mod reports;

pub mod misc;

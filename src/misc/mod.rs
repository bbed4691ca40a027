/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
Note, no log implementation is provided --- for details, see [log].

For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
- Logs related to propagation can be filtered with `RUST_LOG=propagation …`
- Logs of the backward validation pass can be found with `RUST_LOG=validation=info …`
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const PROPAGATION: &str = "propagation";
    pub const ANALYSIS: &str = "analysis";
    pub const REDUCTION: &str = "reduction";
    pub const CLAUSE_DB: &str = "clause_db";
    pub const BACKJUMP: &str = "backjump";
    pub const PROOF: &str = "proof";
    pub const VALIDATION: &str = "validation";
    pub const REPLAY: &str = "replay";
}

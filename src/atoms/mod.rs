// ── GroupSwap Atoms Layer ──────────────────────────────────────────────────
// Pure constants, types, traits and error types. No side effects, no I/O.
// Dependency rule: atoms may only depend on std and external pure crates.
// Nothing here may import from engine/ or commands/.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// GroupSwap — Atomic Peer-to-Peer Swaps
// Validates trades, builds two-leg atomic groups, and settles them on chain.
//
// Module layout:
//   address      — sha512_256, base32 codec, Address parse/format
//   helpers      — to_base_units, base_units_to_amount
//   transaction  — payment, asset_transfer, msgpack encoding, txid, fees, group ids, signed envelopes
//   validator    — validate_trade, validate_acceptance
//   atomic       — build_atomic_transfer
//   settlement   — settle_atomic_transfer, submit_signed
//   optin        — build_opt_in

pub(crate) mod address;
pub(crate) mod helpers;
pub(crate) mod transaction;

pub mod validator;
pub mod atomic;
pub mod settlement;
pub mod optin;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use validator::{validate_acceptance, validate_trade};
pub use atomic::build_atomic_transfer;
pub use settlement::{settle_atomic_transfer, submit_signed};
pub use optin::build_opt_in;

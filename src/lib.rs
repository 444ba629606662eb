// GroupSwap — peer-to-peer asset trades settled as one atomic transaction group.
//
// A proposer offers an amount of ALGO or a token in exchange for another; an
// acceptor settles it by co-signing a two-transaction group that the chain
// executes in full or not at all.
//
// Layers:
//   atoms/     — constants, error enums, plain data types, collaborator traits
//   engine/    — transaction encoding, validation, group building, settlement,
//                algod client, asset catalog, trade book, local signer, config
//   commands/  — thin operations for a UI, taking the acting user explicitly

pub mod atoms;
pub mod engine;
pub mod commands;

pub use atoms::error::{EngineError, EngineResult, ValidationError};
pub use atoms::traits::{ChainClient, Signer};
pub use atoms::types::{
    AccountSnapshot, Address, Asset, AssetKind, DeskConfig, Network, SignerBundle, SignerGroup, Trade, TradeLeg,
    TradeStatus, TradeView, Transaction,
};
pub use commands::state::DeskState;
pub use engine::book::TradeBook;
pub use engine::signer::LocalKeySigner;

// GroupSwap Engine — chain access, atomic swap construction, trade book
// Everything with behavior lives here; atoms/ holds the plain data it moves.

pub mod swap;
pub mod algod;
pub mod catalog;
pub mod book;
pub mod signer;
pub mod config;

#[cfg(test)]
pub(crate) mod mock;

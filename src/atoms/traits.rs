// ── GroupSwap Atoms: Collaborator Traits ───────────────────────────────────
// Seams to the outside world. The engine only talks to a chain node and a
// wallet through these, so tests swap in in-memory implementations.

use async_trait::async_trait;
use log::info;

use super::error::{EngineError, EngineResult};
use super::types::{AccountSnapshot, PendingTransaction, SignerGroup, SuggestedParams};

/// Typed access to a chain node.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current suggested fee and validity parameters.
    async fn suggested_params(&self) -> EngineResult<SuggestedParams>;

    /// Submit one or more concatenated signed transactions. Returns the txid
    /// of the first transaction.
    async fn send_raw_transaction(&self, signed: &[u8]) -> EngineResult<String>;

    async fn pending_transaction(&self, tx_id: &str) -> EngineResult<PendingTransaction>;

    /// Last round the node has seen.
    async fn last_round(&self) -> EngineResult<u64>;

    /// Block until the node has seen a round after `round`.
    async fn wait_for_block_after(&self, round: u64) -> EngineResult<u64>;

    async fn account_information(&self, address: &str) -> EngineResult<AccountSnapshot>;

    /// Poll for `tx_id` for at most `rounds` rounds. Returns the confirmed round.
    async fn wait_for_confirmation(&self, tx_id: &str, rounds: u64) -> EngineResult<u64> {
        let start = self.last_round().await? + 1;
        let mut current = start;
        while current < start + rounds {
            let pending = self.pending_transaction(tx_id).await?;
            if let Some(round) = pending.confirmed_round.filter(|r| *r > 0) {
                info!("[chain] {} confirmed in round {}", tx_id, round);
                return Ok(round);
            }
            if !pending.pool_error.is_empty() {
                return Err(EngineError::Broadcast(format!(
                    "Transaction rejected by pool: {}",
                    pending.pool_error
                )));
            }
            self.wait_for_block_after(current).await?;
            current += 1;
        }
        Err(EngineError::NotConfirmed { tx_id: tx_id.to_string(), rounds })
    }
}

/// An external wallet.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign every bundle of every group, in order. Returns the signed
    /// transaction bytes per bundle, or `EngineError::SignerCancelled` when
    /// the user declines.
    async fn sign_groups(&self, groups: &[SignerGroup]) -> EngineResult<Vec<Vec<u8>>>;
}

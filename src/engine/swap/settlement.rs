// GroupSwap — Settlement
// submit_signed, settle_atomic_transfer
//
// Sequential suspensions only: sign → submit → bounded confirmation poll.
// Nothing is retried; a failure past signing is surfaced to the caller, who
// re-syncs balances. Atomic grouping rules out a half-settled trade.

use log::{info, warn};

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::{ChainClient, Signer};
use crate::atoms::types::SignerGroup;

/// Submit already-signed bytes as one submission and wait up to `rounds`
/// rounds for confirmation. Returns the txid of the first transaction.
pub async fn submit_signed(chain: &dyn ChainClient, signed: &[u8], rounds: u64) -> EngineResult<String> {
    let tx_id = chain
        .send_raw_transaction(signed)
        .await
        .map_err(|e| EngineError::Broadcast(e.to_string()))?;
    info!("[swap] Submitted {} ({} bytes), waiting up to {} rounds", tx_id, signed.len(), rounds);

    let round = chain.wait_for_confirmation(&tx_id, rounds).await.inspect_err(|e| {
        warn!("[swap] {} not settled: {}", tx_id, e);
    })?;
    info!("[swap] {} confirmed in round {}", tx_id, round);
    Ok(tx_id)
}

/// Sign both halves of an atomic transfer, concatenate the signed legs in
/// offer-then-request order, broadcast them as one group, and confirm.
pub async fn settle_atomic_transfer(
    chain: &dyn ChainClient,
    signer: &dyn Signer,
    groups: (SignerGroup, SignerGroup),
    rounds: u64,
) -> EngineResult<String> {
    let (offer_group, request_group) = groups;
    let expected = offer_group.len() + request_group.len();

    let signed = signer.sign_groups(&[offer_group, request_group]).await?;
    if signed.len() != expected {
        return Err(EngineError::Signer(format!(
            "expected {} signed transactions, got {}",
            expected,
            signed.len()
        )));
    }

    submit_signed(chain, &signed.concat(), rounds).await
}

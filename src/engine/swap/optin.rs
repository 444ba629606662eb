// GroupSwap — Asset Opt-In
// An account must opt in to a token before it can receive it: a zero-amount
// transfer of the token from the account to itself.

use log::info;

use super::transaction::asset_transfer;
use crate::atoms::error::EngineResult;
use crate::atoms::traits::ChainClient;
use crate::atoms::types::{Address, SignerBundle, SignerGroup};

/// Build the single-transaction opt-in group for `address` and `asset_id`,
/// fee estimated from the network's per-byte suggestion.
pub async fn build_opt_in(chain: &dyn ChainClient, address: &str, asset_id: u64) -> EngineResult<SignerGroup> {
    let account: Address = address.parse()?;
    let params = chain.suggested_params().await?;

    let mut txn = asset_transfer(&params, account, account, asset_id, 0);
    txn.apply_suggested_fee(params.min_fee)?;
    info!("[swap] Built opt-in of {} to asset {} (fee {})", account, asset_id, txn.fee);

    Ok(vec![SignerBundle { txn, signers: vec![account] }])
}

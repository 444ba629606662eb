// GroupSwap — Atomic Transfer Builder
// build_atomic_transfer
//
// Turns a validated trade into two unsigned transfers bound into one atomic
// group, partitioned by signer:
//   leg A (offer):   creator  → acceptor, network-suggested fee
//   leg B (request): acceptor → creator,  flat FLAT_FEE
// The group id is hashed over [A, B] in that order, so the chain settles
// both legs or neither.

use log::{error, info};

use super::helpers::to_base_units;
use super::transaction::{asset_transfer, assign_group_id, payment};
use crate::atoms::constants::FLAT_FEE;
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::ChainClient;
use crate::atoms::types::{Address, SignerBundle, SignerGroup, SuggestedParams, TradeLeg, Transaction};

const BUILD_FAILED_MESSAGE: &str = "Failed to create atomic transfer. Please try again.";

/// One leg as an unsigned transfer, amount scaled to the leg's base units.
fn leg_transaction(
    params: &SuggestedParams,
    from: Address,
    to: Address,
    leg: &TradeLeg,
    amount: f64,
) -> EngineResult<Transaction> {
    let units = to_base_units(amount, leg.decimals())?;
    Ok(match leg {
        TradeLeg::Native => payment(params, from, to, units),
        TradeLeg::Asset(asset) => asset_transfer(params, from, to, asset.id, units),
    })
}

async fn build_group(
    chain: &dyn ChainClient,
    from: &str,
    to: &str,
    offer: &TradeLeg,
    offer_amount: f64,
    request: &TradeLeg,
    request_amount: f64,
) -> EngineResult<(SignerGroup, SignerGroup)> {
    let from: Address = from.parse()?;
    let to: Address = to.parse()?;

    let params = chain.suggested_params().await?;

    let mut offer_txn = leg_transaction(&params, from, to, offer, offer_amount)?;
    offer_txn.apply_suggested_fee(params.min_fee)?;

    let mut request_txn = leg_transaction(&params, to, from, request, request_amount)?;
    request_txn.set_flat_fee(FLAT_FEE);

    let mut txns = [offer_txn, request_txn];
    let group = assign_group_id(&mut txns)?;
    let [offer_txn, request_txn] = txns;

    info!(
        "[swap] Built atomic group {} ({} {} → {} {}, rounds {}..{})",
        group.to_base64(),
        offer_amount,
        offer.label(),
        request_amount,
        request.label(),
        params.first_round,
        params.last_round
    );

    Ok((
        vec![SignerBundle { txn: offer_txn, signers: vec![from] }],
        vec![SignerBundle { txn: request_txn, signers: vec![to] }],
    ))
}

/// Build the two signer-partitioned halves of an atomic trade.
///
/// Returns `(bundle for from_address, bundle for to_address)`. The only
/// network call is the suggested-parameters fetch. Every failure (network,
/// malformed address, amount overflow) is logged and re-raised as a single
/// user-safe `EngineError::TransferBuild`.
pub async fn build_atomic_transfer(
    chain: &dyn ChainClient,
    from_address: &str,
    to_address: &str,
    offer: &TradeLeg,
    offer_amount: f64,
    request: &TradeLeg,
    request_amount: f64,
) -> EngineResult<(SignerGroup, SignerGroup)> {
    build_group(chain, from_address, to_address, offer, offer_amount, request, request_amount)
        .await
        .map_err(|e| {
            error!("[swap] Error creating atomic transfer: {}", e);
            EngineError::TransferBuild(BUILD_FAILED_MESSAGE.into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::{Asset, TxType};
    use crate::engine::mock::MockChain;

    fn addr(byte: u8) -> String {
        Address([byte; 32]).to_string()
    }

    fn token_x() -> TradeLeg {
        TradeLeg::Asset(Asset {
            id: 123,
            name: "Token X".into(),
            unit: "TX".into(),
            logo: None,
            decimals: 2,
            total: 1_000_000,
            verified: true,
            usd_value: None,
            verification_tier: "verified".into(),
            is_collectible: false,
        })
    }

    #[tokio::test]
    async fn test_native_for_token_group() {
        let chain = MockChain::new();
        let (a, b) = build_atomic_transfer(&chain, &addr(1), &addr(2), &TradeLeg::Native, 1.0, &token_x(), 5.0)
            .await
            .unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);

        let leg_a = &a[0];
        assert_eq!(leg_a.signers, vec![Address([1u8; 32])]);
        assert_eq!(leg_a.txn.kind, TxType::Payment);
        assert_eq!(leg_a.txn.amount, 1_000_000);
        assert_eq!(leg_a.txn.sender, Address([1u8; 32]));
        assert_eq!(leg_a.txn.receiver, Some(Address([2u8; 32])));

        let leg_b = &b[0];
        assert_eq!(leg_b.signers, vec![Address([2u8; 32])]);
        assert_eq!(leg_b.txn.kind, TxType::AssetTransfer);
        assert_eq!(leg_b.txn.asset_amount, 500);
        assert_eq!(leg_b.txn.asset_id, 123);
        assert_eq!(leg_b.txn.sender, Address([2u8; 32]));
        assert_eq!(leg_b.txn.asset_receiver, Some(Address([1u8; 32])));
        assert_eq!(leg_b.txn.fee, FLAT_FEE);

        assert!(leg_a.txn.group.is_some());
        assert_eq!(leg_a.txn.group, leg_b.txn.group);
        assert_eq!(chain.params_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_request_leg_fee_ignores_suggested_fee() {
        let chain = MockChain::new();
        chain.params.lock().fee = 50;
        let (a, b) = build_atomic_transfer(&chain, &addr(1), &addr(2), &token_x(), 2.5, &TradeLeg::Native, 3.0)
            .await
            .unwrap();
        assert_eq!(a[0].txn.asset_amount, 250);
        assert!(a[0].txn.fee > FLAT_FEE);
        assert_eq!(b[0].txn.fee, FLAT_FEE);
        assert_eq!(b[0].txn.amount, 3_000_000);
    }

    #[tokio::test]
    async fn test_group_id_matches_ordered_pair() {
        let chain = MockChain::new();
        let (a, b) = build_atomic_transfer(&chain, &addr(1), &addr(2), &TradeLeg::Native, 1.0, &token_x(), 5.0)
            .await
            .unwrap();
        let expected = crate::engine::swap::transaction::compute_group_id(&[a[0].txn.clone(), b[0].txn.clone()]).unwrap();
        assert_eq!(a[0].txn.group, Some(expected));
    }

    #[tokio::test]
    async fn test_network_failure_is_uniform() {
        let chain = MockChain::new();
        *chain.fail_params.lock() = true;
        let err = build_atomic_transfer(&chain, &addr(1), &addr(2), &TradeLeg::Native, 1.0, &token_x(), 5.0)
            .await
            .unwrap_err();
        match err {
            EngineError::TransferBuild(msg) => assert_eq!(msg, BUILD_FAILED_MESSAGE),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_address_is_uniform() {
        let chain = MockChain::new();
        let err = build_atomic_transfer(&chain, "not-an-address", &addr(2), &TradeLeg::Native, 1.0, &token_x(), 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::TransferBuild(_)));
        assert!(!err.to_string().contains("not-an-address"));
    }
}

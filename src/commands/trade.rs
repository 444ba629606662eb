// commands/trade.rs — Thin wrappers for trade creation, acceptance, reconciliation,
// cancellation, listing, account lookup, and token opt-in.
//
// Every command takes the acting user's address explicitly; nothing reads an
// ambient "current wallet".

use log::{error, info, warn};

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::{AccountSnapshot, Trade, TradeLeg, TradeView};
use crate::commands::state::DeskState;
use crate::engine::swap::{build_atomic_transfer, build_opt_in, settle_atomic_transfer, submit_signed, validate_acceptance};

// ── Trades ─────────────────────────────────────────────────────────────

pub async fn desk_create_trade(
    state: &DeskState,
    current_user: &str,
    offer: TradeLeg,
    offer_amount: f64,
    request: TradeLeg,
    request_amount: f64,
) -> Result<Trade, String> {
    let account = state.chain.account_information(current_user).await.map_err(|e| e.to_string())?;
    state
        .book
        .create(&account, offer, offer_amount, request, request_amount)
        .map_err(|e| e.to_string())
}

async fn settle(state: &DeskState, trade: &Trade, acceptor: &str) -> EngineResult<String> {
    let groups = build_atomic_transfer(
        state.chain.as_ref(),
        &trade.creator,
        acceptor,
        &trade.offer,
        trade.offer_amount,
        &trade.request,
        trade.request_amount,
    )
    .await?;
    settle_atomic_transfer(state.chain.as_ref(), state.signer.as_ref(), groups, state.config.confirmation_rounds).await
}

async fn accept(state: &DeskState, current_user: &str, trade_id: &str) -> EngineResult<String> {
    let trade = state.book.get(trade_id)?;
    if trade.creator == current_user {
        return Err(EngineError::SelfAcceptance(trade_id.to_string()));
    }

    let acceptor = state.chain.account_information(current_user).await?;
    validate_acceptance(&acceptor, &trade)?;

    let trade = state.book.claim(trade_id, current_user)?;
    match settle(state, &trade, current_user).await {
        Ok(tx_id) => {
            state.book.complete(trade_id)?;
            info!("[desk] Trade {} settled in {}", trade_id, tx_id);
            Ok(tx_id)
        }
        Err(EngineError::NotConfirmed { tx_id, rounds }) => {
            // The group may still land, so the trade stays locked until reconciled
            warn!("[desk] Trade {} outcome unknown after {} rounds, claim kept on {}", trade_id, rounds, tx_id);
            state.book.record_submission(trade_id, &tx_id);
            Err(EngineError::NotConfirmed { tx_id, rounds })
        }
        Err(e) => {
            error!("[desk] Trade {} failed: {}", trade_id, e);
            state.book.release(trade_id);
            Err(e)
        }
    }
}

/// Accept a trade as `current_user`: validate, lock, build, sign, settle.
/// Returns the txid of the confirmed group.
pub async fn desk_accept_trade(state: &DeskState, current_user: &str, trade_id: &str) -> Result<String, String> {
    accept(state, current_user, trade_id).await.map_err(|e| e.to_string())
}

async fn reconcile(state: &DeskState, trade_id: &str) -> EngineResult<Trade> {
    let Some(tx_id) = state.book.pending_submission(trade_id) else {
        return state.book.get(trade_id);
    };
    let pending = state.chain.pending_transaction(&tx_id).await?;
    if let Some(round) = pending.confirmed_round.filter(|r| *r > 0) {
        info!("[desk] Trade {} settled in {} at round {}", trade_id, tx_id, round);
        return state.book.complete(trade_id);
    }
    if !pending.pool_error.is_empty() {
        error!("[desk] Trade {} group {} rejected: {}", trade_id, tx_id, pending.pool_error);
        state.book.release(trade_id);
    }
    state.book.get(trade_id)
}

/// Re-check a trade whose settlement group was submitted but not confirmed in
/// time. Completes it once the group confirms and frees it if the node dropped
/// the group; otherwise the trade stays locked.
pub async fn desk_reconcile_trade(state: &DeskState, trade_id: &str) -> Result<Trade, String> {
    reconcile(state, trade_id).await.map_err(|e| e.to_string())
}

/// Returns `false` when the trade was already terminal or mid-settlement.
pub fn desk_cancel_trade(state: &DeskState, current_user: &str, trade_id: &str) -> Result<bool, String> {
    state.book.cancel(trade_id, current_user).map_err(|e| e.to_string())
}

pub fn desk_list_trades(state: &DeskState, current_user: &str) -> Vec<TradeView> {
    state.book.view_for(current_user)
}

// ── Accounts ───────────────────────────────────────────────────────────

pub async fn desk_account(state: &DeskState, address: &str) -> Result<AccountSnapshot, String> {
    state.chain.account_information(address).await.map_err(|e| e.to_string())
}

async fn opt_in(state: &DeskState, current_user: &str, asset_id: u64) -> EngineResult<String> {
    let group = build_opt_in(state.chain.as_ref(), current_user, asset_id).await?;
    let signed = state.signer.sign_groups(&[group]).await?;
    let tx_id = submit_signed(state.chain.as_ref(), &signed.concat(), state.config.confirmation_rounds).await?;
    info!("[desk] {} opted in to asset {}", current_user, asset_id);
    Ok(tx_id)
}

/// Opt `current_user` in to `asset_id` so the account can receive it.
pub async fn desk_opt_in(state: &DeskState, current_user: &str, asset_id: u64) -> Result<String, String> {
    opt_in(state, current_user, asset_id).await.map_err(|e| e.to_string())
}

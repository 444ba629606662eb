// GroupSwap — Trade Book
// In-memory, process-local store of proposed trades and their lifecycle.
//
//   active ──claim──▶ active (claimed) ──complete──▶ completed
//     │                    │
//     │                    └──release──▶ active
//     └──cancel (creator)──▶ cancelled
//
// A claim is the single-writer lock for settlement: at most one acceptor can
// hold it, and a claimed trade can be neither claimed again nor cancelled.
// Once a group is on the wire its txid rides on the claim until the outcome
// is known.

use log::{info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;

use super::swap::validate_trade;
use crate::atoms::error::{EngineError, EngineResult, ValidationError};
use crate::atoms::types::{AccountSnapshot, Trade, TradeLeg, TradeStatus, TradeView};

const CLAIMED: &str = "settlement in progress";

struct Claim {
    acceptor: String,
    /// Set once the group was submitted but its outcome is unknown.
    tx_id: Option<String>,
}

#[derive(Default)]
struct BookInner {
    /// Creation order.
    trades: Vec<Trade>,
    /// Trade id → settlement in flight.
    claims: HashMap<String, Claim>,
}

impl BookInner {
    fn find_mut(&mut self, id: &str) -> EngineResult<&mut Trade> {
        self.trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::TradeNotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct TradeBook {
    inner: Mutex<BookInner>,
}

impl TradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate from the creator's side and record a new active trade.
    /// Nothing touches the chain until the trade is accepted.
    pub fn create(
        &self,
        creator: &AccountSnapshot,
        offer: TradeLeg,
        offer_amount: f64,
        request: TradeLeg,
        request_amount: f64,
    ) -> EngineResult<Trade> {
        validate_trade(creator.balance(), &creator.opted_in(), &offer, offer_amount, &request)?;
        if request_amount.is_nan() || request_amount <= 0.0 {
            return Err(ValidationError::InvalidRequestAmount.into());
        }

        let trade = Trade {
            id: uuid::Uuid::new_v4().to_string(),
            creator: creator.address.clone(),
            offer,
            offer_amount,
            request,
            request_amount,
            status: TradeStatus::Active,
            created_at: chrono::Utc::now().timestamp_millis(),
        };
        info!(
            "[book] {} offers {} {} for {} {} ({})",
            trade.creator,
            trade.offer_amount,
            trade.offer.label(),
            trade.request_amount,
            trade.request.label(),
            trade.id
        );
        self.inner.lock().trades.push(trade.clone());
        Ok(trade)
    }

    pub fn get(&self, id: &str) -> EngineResult<Trade> {
        self.inner
            .lock()
            .trades
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| EngineError::TradeNotFound(id.to_string()))
    }

    pub fn list(&self) -> Vec<Trade> {
        self.inner.lock().trades.clone()
    }

    pub fn active(&self) -> Vec<Trade> {
        self.inner
            .lock()
            .trades
            .iter()
            .filter(|t| t.status == TradeStatus::Active)
            .cloned()
            .collect()
    }

    /// Take the settlement lock on an active trade. Exactly one concurrent
    /// caller wins; the rest see `TradeNotActive`.
    pub fn claim(&self, id: &str, acceptor: &str) -> EngineResult<Trade> {
        let mut inner = self.inner.lock();
        let trade = inner.find_mut(id)?;
        if trade.creator == acceptor {
            return Err(EngineError::SelfAcceptance(id.to_string()));
        }
        if trade.status != TradeStatus::Active {
            return Err(EngineError::not_active(id, trade.status.as_str()));
        }
        let trade = trade.clone();
        if inner.claims.contains_key(id) {
            return Err(EngineError::not_active(id, CLAIMED));
        }
        inner.claims.insert(id.to_string(), Claim { acceptor: acceptor.to_string(), tx_id: None });
        info!("[book] {} claimed {}", acceptor, id);
        Ok(trade)
    }

    /// Drop a claim after a failed settlement; the trade stays active.
    pub fn release(&self, id: &str) {
        if let Some(claim) = self.inner.lock().claims.remove(id) {
            warn!("[book] Released claim of {} on {}", claim.acceptor, id);
        }
    }

    /// Note the txid of a submitted group whose confirmation is still open.
    /// The claim stays held until `complete` or `release`.
    pub fn record_submission(&self, id: &str, tx_id: &str) {
        if let Some(claim) = self.inner.lock().claims.get_mut(id) {
            info!("[book] {} awaiting {}", id, tx_id);
            claim.tx_id = Some(tx_id.to_string());
        }
    }

    /// Txid of the submitted group holding this trade's claim, if any.
    pub fn pending_submission(&self, id: &str) -> Option<String> {
        self.inner.lock().claims.get(id).and_then(|c| c.tx_id.clone())
    }

    /// Mark a claimed trade completed after its group confirmed.
    pub fn complete(&self, id: &str) -> EngineResult<Trade> {
        let mut inner = self.inner.lock();
        if inner.claims.remove(id).is_none() {
            let status = inner.find_mut(id)?.status;
            return Err(EngineError::not_active(id, status.as_str()));
        }
        let trade = inner.find_mut(id)?;
        trade.status = TradeStatus::Completed;
        info!("[book] {} completed", id);
        Ok(trade.clone())
    }

    /// Withdraw an active trade. Only its creator may do so. Returns `false`
    /// without changing anything when the trade is terminal or mid-settlement.
    pub fn cancel(&self, id: &str, current_user: &str) -> EngineResult<bool> {
        let mut inner = self.inner.lock();
        let claimed = inner.claims.contains_key(id);
        let trade = inner.find_mut(id)?;
        if trade.creator != current_user {
            return Err(EngineError::NotTradeCreator(id.to_string()));
        }
        if trade.status.is_terminal() || claimed {
            return Ok(false);
        }
        trade.status = TradeStatus::Cancelled;
        info!("[book] {} cancelled by creator", id);
        Ok(true)
    }

    /// Every trade with the actions open to `current_user`.
    pub fn view_for(&self, current_user: &str) -> Vec<TradeView> {
        let inner = self.inner.lock();
        inner
            .trades
            .iter()
            .map(|trade| {
                let open = trade.status == TradeStatus::Active && !inner.claims.contains_key(&trade.id);
                let mine = trade.creator == current_user;
                TradeView {
                    trade: trade.clone(),
                    can_accept: open && !mine && !current_user.is_empty(),
                    can_cancel: open && mine,
                }
            })
            .collect()
    }
}

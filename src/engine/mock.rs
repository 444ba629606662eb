// In-memory ChainClient for unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::ChainClient;
use crate::atoms::types::{AccountSnapshot, Digest, PendingTransaction, SuggestedParams};

pub(crate) struct MockChain {
    pub params: Mutex<SuggestedParams>,
    pub fail_params: Mutex<bool>,
    pub submitted: Mutex<Vec<Vec<u8>>>,
    pub reject_send: Mutex<Option<String>>,
    /// Polls before the pending transaction reports confirmed; None = never.
    pub confirm_after: Mutex<Option<u64>>,
    pub pool_error: Mutex<String>,
    pub round: AtomicU64,
    pub polls: AtomicU64,
    pub params_calls: AtomicU64,
}

impl MockChain {
    pub fn new() -> Self {
        MockChain {
            params: Mutex::new(SuggestedParams {
                fee: 0,
                min_fee: 1_000,
                first_round: 5_000,
                last_round: 6_000,
                genesis_id: "testnet-v1.0".into(),
                genesis_hash: Digest([7u8; 32]),
            }),
            fail_params: Mutex::new(false),
            submitted: Mutex::new(Vec::new()),
            reject_send: Mutex::new(None),
            confirm_after: Mutex::new(Some(0)),
            pool_error: Mutex::new(String::new()),
            round: AtomicU64::new(5_000),
            polls: AtomicU64::new(0),
            params_calls: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn suggested_params(&self) -> EngineResult<SuggestedParams> {
        self.params_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_params.lock() {
            return Err(EngineError::node(503, "node unavailable"));
        }
        Ok(self.params.lock().clone())
    }

    async fn send_raw_transaction(&self, signed: &[u8]) -> EngineResult<String> {
        if let Some(reason) = self.reject_send.lock().clone() {
            return Err(EngineError::node(400, reason));
        }
        self.submitted.lock().push(signed.to_vec());
        Ok(format!("TX{}", self.submitted.lock().len()))
    }

    async fn pending_transaction(&self, _tx_id: &str) -> EngineResult<PendingTransaction> {
        let polls = self.polls.fetch_add(1, Ordering::SeqCst);
        let confirmed = matches!(*self.confirm_after.lock(), Some(n) if polls >= n);
        Ok(PendingTransaction {
            confirmed_round: confirmed.then(|| self.round.load(Ordering::SeqCst)),
            pool_error: self.pool_error.lock().clone(),
        })
    }

    async fn last_round(&self) -> EngineResult<u64> {
        Ok(self.round.load(Ordering::SeqCst))
    }

    async fn wait_for_block_after(&self, round: u64) -> EngineResult<u64> {
        self.round.store(round + 1, Ordering::SeqCst);
        Ok(round + 1)
    }

    async fn account_information(&self, address: &str) -> EngineResult<AccountSnapshot> {
        // Unit tests never read balances through the chain
        Ok(AccountSnapshot { address: address.to_string(), ..Default::default() })
    }
}

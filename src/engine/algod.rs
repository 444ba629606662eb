// GroupSwap — Algod REST Client
// suggested_params, send_raw_transaction, pending_transaction, last_round,
// wait_for_block_after, account_information
//
// Thin reqwest wrapper over the node's v2 REST API. Every non-2xx response
// becomes `EngineError::Node` with the node's own message when it sent one.

use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::atoms::constants::DEFAULT_VALIDITY_ROUNDS;
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::ChainClient;
use crate::atoms::types::{AccountSnapshot, DeskConfig, Digest, PendingTransaction, SuggestedParams};

const TOKEN_HEADER: &str = "X-Algo-API-Token";

pub struct AlgodClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AlgodClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(AlgodClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &DeskConfig) -> EngineResult<Self> {
        let url = config.algod_url();
        info!("[algod] Using node {} ({:?})", url, config.network);
        Self::new(&url, config.algod_token.clone(), config.request_timeout_secs)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn read_json(resp: reqwest::Response) -> EngineResult<Value> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("[algod] HTTP {}: {}", status.as_u16(), body);
            return Err(EngineError::node(status.as_u16(), node_message(&body)));
        }
        Ok(resp.json().await?)
    }

    async fn get(&self, path: &str) -> EngineResult<Value> {
        let resp = self.request(reqwest::Method::GET, path).send().await?;
        Self::read_json(resp).await
    }
}

// ── Response parsing ──────────────────────────────────────────────────────

/// The node wraps errors as `{"message": "..."}`; fall back to the raw body.
fn node_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

fn require_u64(json: &Value, key: &str) -> EngineResult<u64> {
    json.get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| EngineError::Other(format!("algod response missing '{}'", key)))
}

pub(crate) fn parse_params(json: &Value) -> EngineResult<SuggestedParams> {
    let first_round = require_u64(json, "last-round")?;
    let hash_b64 = json
        .get("genesis-hash")
        .and_then(|v| v.as_str())
        .ok_or_else(|| EngineError::Other("algod response missing 'genesis-hash'".into()))?;
    let hash = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, hash_b64)
        .map_err(|e| EngineError::Other(format!("bad genesis hash: {}", e)))?;
    let genesis_hash: [u8; 32] = hash
        .try_into()
        .map_err(|_| EngineError::Other("genesis hash is not 32 bytes".into()))?;

    Ok(SuggestedParams {
        fee: json.get("fee").and_then(|v| v.as_u64()).unwrap_or(0),
        min_fee: json.get("min-fee").and_then(|v| v.as_u64()).unwrap_or(0),
        first_round,
        last_round: first_round + DEFAULT_VALIDITY_ROUNDS,
        genesis_id: json.get("genesis-id").and_then(|v| v.as_str()).unwrap_or("").to_string(),
        genesis_hash: Digest(genesis_hash),
    })
}

pub(crate) fn parse_pending(json: &Value) -> PendingTransaction {
    PendingTransaction {
        confirmed_round: json.get("confirmed-round").and_then(|v| v.as_u64()),
        pool_error: json.get("pool-error").and_then(|v| v.as_str()).unwrap_or("").to_string(),
    }
}

pub(crate) fn parse_account(address: &str, json: &Value) -> EngineResult<AccountSnapshot> {
    let amount = require_u64(json, "amount")?;
    let mut assets = BTreeMap::new();
    if let Some(holdings) = json.get("assets").and_then(|v| v.as_array()) {
        for holding in holdings {
            if let Some(id) = holding.get("asset-id").and_then(|v| v.as_u64()) {
                let held = holding.get("amount").and_then(|v| v.as_u64()).unwrap_or(0);
                assets.insert(id, held);
            }
        }
    }
    Ok(AccountSnapshot { address: address.to_string(), amount, assets })
}

#[async_trait]
impl ChainClient for AlgodClient {
    async fn suggested_params(&self) -> EngineResult<SuggestedParams> {
        parse_params(&self.get("/v2/transactions/params").await?)
    }

    async fn send_raw_transaction(&self, signed: &[u8]) -> EngineResult<String> {
        let resp = self
            .request(reqwest::Method::POST, "/v2/transactions")
            .header(reqwest::header::CONTENT_TYPE, "application/x-binary")
            .body(signed.to_vec())
            .send()
            .await?;
        let json = Self::read_json(resp).await?;
        json.get("txId")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| EngineError::Other("algod response missing 'txId'".into()))
    }

    async fn pending_transaction(&self, tx_id: &str) -> EngineResult<PendingTransaction> {
        Ok(parse_pending(&self.get(&format!("/v2/transactions/pending/{}", tx_id)).await?))
    }

    async fn last_round(&self) -> EngineResult<u64> {
        require_u64(&self.get("/v2/status").await?, "last-round")
    }

    async fn wait_for_block_after(&self, round: u64) -> EngineResult<u64> {
        let json = self.get(&format!("/v2/status/wait-for-block-after/{}", round)).await?;
        require_u64(&json, "last-round")
    }

    async fn account_information(&self, address: &str) -> EngineResult<AccountSnapshot> {
        parse_account(address, &self.get(&format!("/v2/accounts/{}", address)).await?)
    }
}

// ── GroupSwap Atoms: Pure Data Types ──────────────────────────────────────────
// Plain struct/enum definitions. Encoding, hashing and address parsing live
// in engine/swap/ as inherent impls on these types.
// Atoms layer rule: no I/O, no side effects, no imports from engine/.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::constants::{NATIVE_DECIMALS, NATIVE_SYMBOL};

// ── Chain primitives ───────────────────────────────────────────────────────

/// A 32-byte ed25519 public key identifying an account.
/// Textual form is the 58-char checksummed base32 address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 32]);

/// A 32-byte SHA-512/256 digest (transaction ids, group ids, genesis hash).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; 32]);

/// Suggested transaction parameters as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee per byte in microAlgos (usually 0 when the network is not congested).
    pub fee: u64,
    pub min_fee: u64,
    pub first_round: u64,
    pub last_round: u64,
    pub genesis_id: String,
    pub genesis_hash: Digest,
}

/// Node view of a submitted transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTransaction {
    pub confirmed_round: Option<u64>,
    /// Non-empty when the transaction pool evicted the transaction.
    pub pool_error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxType {
    /// Native-coin payment (`pay`).
    Payment,
    /// Token transfer (`axfer`), including 0-amount opt-ins.
    AssetTransfer,
}

/// An unsigned transaction. Field order matches the canonical (sorted)
/// wire key order so the msgpack map comes out canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub asset_amount: u64,
    pub amount: u64,
    pub asset_receiver: Option<Address>,
    pub fee: u64,
    pub first_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: Digest,
    pub group: Option<Digest>,
    pub last_valid: u64,
    pub note: Vec<u8>,
    pub receiver: Option<Address>,
    pub sender: Address,
    pub kind: TxType,
    pub asset_id: u64,
}

/// One transaction plus the addresses allowed to sign it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerBundle {
    pub txn: Transaction,
    pub signers: Vec<Address>,
}

/// The bundles one counterparty is asked to sign.
pub type SignerGroup = Vec<SignerBundle>;

// ── Assets ─────────────────────────────────────────────────────────────────

/// A fungible token descriptor fetched from the verified-asset catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub decimals: u8,
    pub total: u64,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<String>,
    pub verification_tier: String,
    #[serde(default)]
    pub is_collectible: bool,
}

/// Catalog filter for `filter_assets`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    All,
    Collectibles,
    Tokens,
}

// ── Trades ─────────────────────────────────────────────────────────────────

/// One side of a trade: the native coin or a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "asset", rename_all = "lowercase")]
pub enum TradeLeg {
    Native,
    Asset(Asset),
}

impl TradeLeg {
    pub fn decimals(&self) -> u8 {
        match self {
            TradeLeg::Native => NATIVE_DECIMALS,
            TradeLeg::Asset(asset) => asset.decimals,
        }
    }

    /// Display name: "ALGO" or the asset name.
    pub fn label(&self) -> &str {
        match self {
            TradeLeg::Native => NATIVE_SYMBOL,
            TradeLeg::Asset(asset) => &asset.name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Active,
    Completed,
    Cancelled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Active => "active",
            TradeStatus::Completed => "completed",
            TradeStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TradeStatus::Active)
    }
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed bilateral exchange. Transient: lives only in the trade book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub creator: String,
    pub offer: TradeLeg,
    pub offer_amount: f64,
    pub request: TradeLeg,
    pub request_amount: f64,
    pub status: TradeStatus,
    /// Unix milliseconds.
    pub created_at: i64,
}

/// A trade as seen by a specific user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeView {
    #[serde(flatten)]
    pub trade: Trade,
    pub can_accept: bool,
    pub can_cancel: bool,
}

// ── Accounts ───────────────────────────────────────────────────────────────

/// Balance and token holdings of one account at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub address: String,
    /// Native balance in microAlgos.
    pub amount: u64,
    /// Opted-in asset id → holding in base units.
    #[serde(default)]
    pub assets: BTreeMap<u64, u64>,
}

impl AccountSnapshot {
    /// Native balance in ALGO.
    pub fn balance(&self) -> f64 {
        self.amount as f64 / 10f64.powi(NATIVE_DECIMALS as i32)
    }

    pub fn opted_in(&self) -> HashSet<u64> {
        self.assets.keys().copied().collect()
    }

    pub fn holding(&self, asset_id: u64) -> Option<u64> {
        self.assets.get(&asset_id).copied()
    }
}

// ── Configuration ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    MainNet,
    #[default]
    TestNet,
}

/// Desk configuration, loaded from TOML by `engine::config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub network: Network,
    /// Overrides the per-network algod endpoint.
    pub algod_url: Option<String>,
    pub algod_token: Option<String>,
    /// Overrides the per-network verified-asset endpoint.
    pub catalog_url: Option<String>,
    pub confirmation_rounds: u64,
    pub request_timeout_secs: u64,
}

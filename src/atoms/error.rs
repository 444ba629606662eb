// ── GroupSwap Atoms: Error Types ───────────────────────────────────────────
// Canonical error enums for the crate, built with `thiserror`.
//
// Design rules:
//   • `ValidationError` covers pre-flight trade checks. These are recoverable
//     by the user correcting input and always fire before any network call.
//   • `EngineError` is coarse-grained by domain (network, encoding, signing,
//     trade lifecycle…). `#[from]` wires external error conversions.
//   • `TransferBuild` messages are user-safe; the root cause is logged by the
//     builder, never embedded here.

use thiserror::Error;

// ── Validation errors ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Offered amount is zero, negative, or not a number.
    #[error("Offer amount must be greater than 0")]
    InvalidAmount,

    /// Requested amount is zero, negative, or not a number.
    #[error("Request amount must be greater than 0")]
    InvalidRequestAmount,

    /// Native-coin leg plus the group fee reserve exceeds the balance.
    /// `required` is the exact total in ALGO, e.g. "1.002".
    #[error("Insufficient ALGO balance. You need at least {required} ALGO (including fees)")]
    InsufficientBalance { required: String },

    /// Token leg, but not enough ALGO left to pay the group fees.
    #[error("Insufficient ALGO balance for transaction fees")]
    InsufficientFeeReserve,

    /// The account has not opted in to a token it must hold.
    #[error("You need to opt-in to {asset} before trading it")]
    NotOptedIn { asset: String },

    /// The account holds the token but not enough of it.
    #[error("Insufficient {asset} balance. You need at least {required} {asset}")]
    InsufficientAssetBalance { asset: String, required: String },
}

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EngineError {
    /// Filesystem or OS-level I/O failure (config loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Canonical msgpack encoding failure.
    #[error("Encoding error: {0}")]
    Encoding(#[from] rmp_serde::encode::Error),

    /// HTTP / network failure (reqwest layer).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The node answered with a non-success HTTP status.
    #[error("Node error: {status}: {message}")]
    Node { status: u16, message: String },

    /// Pre-flight trade validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Building the atomic group failed. Message is user-facing.
    #[error("{0}")]
    TransferBuild(String),

    /// The wallet user declined to sign.
    #[error("Signing cancelled: {0}")]
    SignerCancelled(String),

    /// The signer could not produce a signature (missing key, bad bundle).
    #[error("Signer error: {0}")]
    Signer(String),

    /// The node rejected the submitted group.
    #[error("Broadcast failed: {0}")]
    Broadcast(String),

    /// Confirmation polling ran out of rounds.
    #[error("Transaction {tx_id} not confirmed after {rounds} rounds")]
    NotConfirmed { tx_id: String, rounds: u64 },

    #[error("Trade {0} not found")]
    TradeNotFound(String),

    /// Trade is terminal or already claimed by another acceptor.
    #[error("Trade {id} is no longer active ({status})")]
    TradeNotActive { id: String, status: String },

    #[error("Only the creator can cancel trade {0}")]
    NotTradeCreator(String),

    #[error("You cannot accept your own trade {0}")]
    SelfAcceptance(String),

    /// Desk configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed account address.
    #[error("Invalid address: {0}")]
    Address(String),

    /// Catch-all for errors that do not yet have a dedicated variant.
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Create a node error from an HTTP status and response body.
    pub fn node(status: u16, message: impl Into<String>) -> Self {
        Self::Node { status, message: message.into() }
    }

    /// Create a trade-not-active error.
    pub fn not_active(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self::TradeNotActive { id: id.into(), status: status.into() }
    }
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Other(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All engine operations return this type.
/// At UI boundaries, convert with `.map_err(|e| e.to_string())`.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<EngineError> for String {
    fn from(e: EngineError) -> Self {
        e.to_string()
    }
}

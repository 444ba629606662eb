// ── GroupSwap Atoms: Constants ─────────────────────────────────────────────
// All chain-level named constants for the crate live here.

// ── Native coin ───────────────────────────────────────────────────────────
pub const NATIVE_SYMBOL: &str = "ALGO";
/// ALGO is denominated in microAlgos (10^6 per ALGO).
pub const NATIVE_DECIMALS: u8 = 6;

// ── Fees ──────────────────────────────────────────────────────────────────
/// Buffer (0.002 ALGO, in microAlgos) the proposer must keep to cover both
/// transaction fees of the atomic group.
pub const FEE_RESERVE_MICRO: u64 = 2_000;
/// Explicit flat fee for the request leg of every atomic trade.
pub const FLAT_FEE: u64 = 1_000;
/// Network minimum fee per transaction.
pub const MIN_TXN_FEE: u64 = 1_000;
/// Bytes a signature adds to an encoded transaction (fee estimation).
pub(crate) const SIGNATURE_OVERHEAD_BYTES: u64 = 75;
/// Validity window applied to `first_round` when a node omits `last_round`.
pub(crate) const DEFAULT_VALIDITY_ROUNDS: u64 = 1_000;

// ── Confirmation ──────────────────────────────────────────────────────────
/// Rounds to wait for a submitted group before giving up.
pub const CONFIRMATION_ROUNDS: u64 = 4;

// ── Domain-separation prefixes for hashing ────────────────────────────────
pub(crate) const TXID_PREFIX: &[u8] = b"TX";
pub(crate) const GROUP_PREFIX: &[u8] = b"TG";

// ── Default endpoints ─────────────────────────────────────────────────────
pub(crate) const ALGOD_MAINNET_URL: &str = "https://mainnet-api.algonode.cloud";
pub(crate) const ALGOD_TESTNET_URL: &str = "https://testnet-api.algonode.cloud";
pub(crate) const CATALOG_MAINNET_URL: &str = "https://mainnet.api.perawallet.app/v1/public";
pub(crate) const CATALOG_TESTNET_URL: &str = "https://testnet.api.perawallet.app/v1/public";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

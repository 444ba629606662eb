// GroupSwap — Transaction Building & Encoding
// payment, asset_transfer, canonical msgpack encoding, transaction ids,
// fee estimation, group ids, signed-transaction envelopes
//
// Wire format: a msgpack map with keys in sorted order and every zero/empty
// field omitted. Byte strings (addresses, digests, notes) are msgpack `bin`.
// Hashes are SHA-512/256 over a two-byte domain prefix + the encoding.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::address::{base32_encode, sha512_256};
use crate::atoms::constants::{GROUP_PREFIX, MIN_TXN_FEE, SIGNATURE_OVERHEAD_BYTES, TXID_PREFIX};
use crate::atoms::error::EngineResult;
use crate::atoms::types::{Address, Digest, SuggestedParams, Transaction, TxType};

// ── Wire helpers ──────────────────────────────────────────────────────────

struct Bin<'a>(&'a [u8]);

impl Serialize for Bin<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl Digest {
    /// Unpadded base32, the textual form of transaction ids.
    pub fn to_base32(&self) -> String {
        base32_encode(&self.0)
    }

    pub fn to_base64(&self) -> String {
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, self.0)
    }
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Payment => "pay",
            TxType::AssetTransfer => "axfer",
        }
    }
}

impl Serialize for TxType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = [
            self.asset_amount != 0,
            self.amount != 0,
            self.asset_receiver.is_some(),
            self.fee != 0,
            self.first_valid != 0,
            !self.genesis_id.is_empty(),
            true, // gh
            self.group.is_some(),
            self.last_valid != 0,
            !self.note.is_empty(),
            self.receiver.is_some(),
            true, // snd
            true, // type
            self.asset_id != 0,
        ];
        let len = present.iter().filter(|p| **p).count();

        // Keys must stay in sorted order
        let mut map = serializer.serialize_map(Some(len))?;
        if self.asset_amount != 0 {
            map.serialize_entry("aamt", &self.asset_amount)?;
        }
        if self.amount != 0 {
            map.serialize_entry("amt", &self.amount)?;
        }
        if let Some(arcv) = &self.asset_receiver {
            map.serialize_entry("arcv", arcv)?;
        }
        if self.fee != 0 {
            map.serialize_entry("fee", &self.fee)?;
        }
        if self.first_valid != 0 {
            map.serialize_entry("fv", &self.first_valid)?;
        }
        if !self.genesis_id.is_empty() {
            map.serialize_entry("gen", &self.genesis_id)?;
        }
        map.serialize_entry("gh", &self.genesis_hash)?;
        if let Some(grp) = &self.group {
            map.serialize_entry("grp", grp)?;
        }
        if self.last_valid != 0 {
            map.serialize_entry("lv", &self.last_valid)?;
        }
        if !self.note.is_empty() {
            map.serialize_entry("note", &Bin(&self.note))?;
        }
        if let Some(rcv) = &self.receiver {
            map.serialize_entry("rcv", rcv)?;
        }
        map.serialize_entry("snd", &self.sender)?;
        map.serialize_entry("type", &self.kind)?;
        if self.asset_id != 0 {
            map.serialize_entry("xaid", &self.asset_id)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct TxGroup {
    txlist: Vec<Digest>,
}

#[derive(Serialize)]
struct SignedTransaction<'a> {
    sig: Bin<'a>,
    txn: &'a Transaction,
}

// ── Construction ──────────────────────────────────────────────────────────

fn base(params: &SuggestedParams, sender: Address, kind: TxType) -> Transaction {
    Transaction {
        asset_amount: 0,
        amount: 0,
        asset_receiver: None,
        fee: params.fee,
        first_valid: params.first_round,
        genesis_id: params.genesis_id.clone(),
        genesis_hash: params.genesis_hash,
        group: None,
        last_valid: params.last_round,
        note: Vec::new(),
        receiver: None,
        sender,
        kind,
        asset_id: 0,
    }
}

/// Native-coin payment of `amount` microAlgos. Fee still per-byte.
pub(crate) fn payment(params: &SuggestedParams, from: Address, to: Address, amount: u64) -> Transaction {
    let mut txn = base(params, from, TxType::Payment);
    txn.receiver = Some(to);
    txn.amount = amount;
    txn
}

/// Token transfer of `amount` base units of `asset_id`. Fee still per-byte.
pub(crate) fn asset_transfer(
    params: &SuggestedParams,
    from: Address,
    to: Address,
    asset_id: u64,
    amount: u64,
) -> Transaction {
    let mut txn = base(params, from, TxType::AssetTransfer);
    txn.asset_receiver = Some(to);
    txn.asset_amount = amount;
    txn.asset_id = asset_id;
    txn
}

impl Transaction {
    /// Canonical msgpack encoding.
    pub fn encode(&self) -> EngineResult<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    /// The exact bytes a signer signs: "TX" ‖ encoding.
    pub fn bytes_to_sign(&self) -> EngineResult<Vec<u8>> {
        let mut out = TXID_PREFIX.to_vec();
        out.extend_from_slice(&self.encode()?);
        Ok(out)
    }

    pub fn id_digest(&self) -> EngineResult<Digest> {
        Ok(Digest(sha512_256(&self.bytes_to_sign()?)))
    }

    /// Transaction id as shown by explorers and returned by the node.
    pub fn id(&self) -> EngineResult<String> {
        Ok(self.id_digest()?.to_base32())
    }

    /// Turn the per-byte fee in `self.fee` into a total fee:
    /// `max(per_byte × (encoded_len + signature overhead), min_fee)`.
    pub(crate) fn apply_suggested_fee(&mut self, min_fee: u64) -> EngineResult<()> {
        let per_byte = self.fee;
        let size = self.encode()?.len() as u64 + SIGNATURE_OVERHEAD_BYTES;
        let floor = if min_fee == 0 { MIN_TXN_FEE } else { min_fee };
        self.fee = per_byte.saturating_mul(size).max(floor);
        Ok(())
    }

    /// Pin the fee to an exact amount regardless of network suggestions.
    pub(crate) fn set_flat_fee(&mut self, fee: u64) {
        self.fee = fee;
    }
}

/// Group id over the ordered transactions: hash of "TG" ‖ {txlist: [txid…]}.
/// Any existing group field is ignored when hashing.
pub(crate) fn compute_group_id(txns: &[Transaction]) -> EngineResult<Digest> {
    let mut txlist = Vec::with_capacity(txns.len());
    for txn in txns {
        let mut ungrouped = txn.clone();
        ungrouped.group = None;
        txlist.push(ungrouped.id_digest()?);
    }
    let mut bytes = GROUP_PREFIX.to_vec();
    bytes.extend_from_slice(&rmp_serde::to_vec_named(&TxGroup { txlist })?);
    Ok(Digest(sha512_256(&bytes)))
}

/// Bind the transactions into one atomic group, in the given order.
pub(crate) fn assign_group_id(txns: &mut [Transaction]) -> EngineResult<Digest> {
    let group = compute_group_id(txns)?;
    for txn in txns.iter_mut() {
        txn.group = Some(group);
    }
    Ok(group)
}

/// Wrap a transaction and its ed25519 signature as {sig, txn}.
pub(crate) fn encode_signed(txn: &Transaction, signature: &[u8; 64]) -> EngineResult<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(&SignedTransaction { sig: Bin(signature), txn })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(fee: u64) -> SuggestedParams {
        SuggestedParams {
            fee,
            min_fee: 1_000,
            first_round: 1_000,
            last_round: 2_000,
            genesis_id: "testnet-v1.0".into(),
            genesis_hash: Digest([3u8; 32]),
        }
    }

    fn position(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .position(|w| w == needle)
            .unwrap_or_else(|| panic!("missing key {:?}", String::from_utf8_lossy(needle)))
    }

    #[test]
    fn test_payment_keys_sorted_and_zero_fields_omitted() {
        let txn = payment(&params(0), Address([1u8; 32]), Address([2u8; 32]), 5);
        let bytes = txn.encode().unwrap();
        // fixmap header: amt, fv, gen, gh, lv, rcv, snd, type (fee is 0)
        assert_eq!(bytes[0], 0x80 | 8);
        let keys: [&[u8]; 8] = [b"amt", b"fv", b"gen", b"gh", b"lv", b"rcv", b"snd", b"type"];
        let mut last = 0;
        for key in keys {
            let pos = position(&bytes, key);
            assert!(pos > last, "key {:?} out of order", String::from_utf8_lossy(key));
            last = pos;
        }
        assert!(bytes.windows(4).all(|w| w != b"xaid"));
    }

    #[test]
    fn test_addresses_are_bin_encoded() {
        let txn = payment(&params(0), Address([1u8; 32]), Address([2u8; 32]), 5);
        let bytes = txn.encode().unwrap();
        let rcv = position(&bytes, b"rcv");
        // bin8 marker, length 32, then the raw key
        assert_eq!(&bytes[rcv + 3..rcv + 5], &[0xc4, 32]);
        assert_eq!(&bytes[rcv + 5..rcv + 37], &[2u8; 32]);
    }

    #[test]
    fn test_asset_transfer_fields() {
        let txn = asset_transfer(&params(0), Address([1u8; 32]), Address([2u8; 32]), 123, 500);
        assert_eq!(txn.kind, TxType::AssetTransfer);
        let bytes = txn.encode().unwrap();
        assert!(position(&bytes, b"aamt") < position(&bytes, b"arcv"));
        assert!(position(&bytes, b"type") < position(&bytes, b"xaid"));
        assert!(bytes.windows(5).any(|w| w == b"axfer"));
    }

    #[test]
    fn test_txid_is_52_chars_and_stable() {
        let txn = payment(&params(0), Address([1u8; 32]), Address([2u8; 32]), 5);
        let id = txn.id().unwrap();
        assert_eq!(id.len(), 52);
        assert_eq!(id, txn.clone().id().unwrap());
    }

    #[test]
    fn test_suggested_fee_floor_and_per_byte() {
        let mut cheap = payment(&params(0), Address([1u8; 32]), Address([2u8; 32]), 5);
        cheap.apply_suggested_fee(1_000).unwrap();
        assert_eq!(cheap.fee, 1_000);

        let mut busy = payment(&params(10), Address([1u8; 32]), Address([2u8; 32]), 5);
        let size = busy.encode().unwrap().len() as u64 + 75;
        busy.apply_suggested_fee(1_000).unwrap();
        assert_eq!(busy.fee, (10 * size).max(1_000));
        assert!(busy.fee > 1_000);
    }

    #[test]
    fn test_group_id_depends_on_order() {
        let a = payment(&params(0), Address([1u8; 32]), Address([2u8; 32]), 5);
        let b = asset_transfer(&params(0), Address([2u8; 32]), Address([1u8; 32]), 9, 7);
        let forward = compute_group_id(&[a.clone(), b.clone()]).unwrap();
        let reverse = compute_group_id(&[b, a]).unwrap();
        assert_ne!(forward, reverse);
    }

    #[test]
    fn test_assign_group_id_is_idempotent() {
        let mut txns = vec![
            payment(&params(0), Address([1u8; 32]), Address([2u8; 32]), 5),
            payment(&params(0), Address([2u8; 32]), Address([1u8; 32]), 6),
        ];
        let first = assign_group_id(&mut txns).unwrap();
        assert!(txns.iter().all(|t| t.group == Some(first)));
        // Hashing ignores the existing group field
        let second = assign_group_id(&mut txns).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_signed_envelope_layout() {
        let txn = payment(&params(0), Address([1u8; 32]), Address([2u8; 32]), 5);
        let signed = encode_signed(&txn, &[9u8; 64]).unwrap();
        // fixmap(2), "sig", bin8(64)
        assert_eq!(&signed[..5], &[0x82, 0xa3, b's', b'i', b'g']);
        assert_eq!(&signed[5..7], &[0xc4, 64]);
        assert!(signed.ends_with(&txn.encode().unwrap()));
    }
}

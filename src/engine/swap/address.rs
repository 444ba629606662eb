// GroupSwap — Account Addresses
// base32_encode, base32_decode, sha512_256, Address parsing/formatting

use serde::{Serialize, Serializer};
use sha2::{Digest as _, Sha512_256};
use std::fmt;
use std::str::FromStr;

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::Address;

/// RFC 4648 base32 alphabet (no padding on the wire).
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const CHECKSUM_LEN: usize = 4;
const ADDRESS_LEN: usize = 58;

/// SHA-512/256, the chain's hash for ids and checksums.
pub(crate) fn sha512_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha512_256::digest(data));
    out
}

/// Unpadded base32 encoding.
pub(crate) fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Unpadded base32 decoding. Trailing pad bits must be zero.
pub(crate) fn base32_decode(s: &str) -> EngineResult<Vec<u8>> {
    let mut out = Vec::with_capacity(s.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    for c in s.bytes() {
        let value = match c {
            b'A'..=b'Z' => c - b'A',
            b'2'..=b'7' => c - b'2' + 26,
            _ => return Err(EngineError::Address(format!("invalid base32 character '{}'", c as char))),
        };
        buffer = (buffer << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    if buffer != 0 {
        return Err(EngineError::Address("non-zero trailing bits".into()));
    }
    Ok(out)
}

fn checksum(public_key: &[u8; 32]) -> [u8; CHECKSUM_LEN] {
    let hash = sha512_256(public_key);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[32 - CHECKSUM_LEN..]);
    out
}

impl Address {
    pub fn from_public_key(public_key: [u8; 32]) -> Self {
        Address(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let s = s.trim();
        if s.len() != ADDRESS_LEN {
            return Err(EngineError::Address(format!(
                "expected {} characters, got {} ('{}')",
                ADDRESS_LEN,
                s.len(),
                s
            )));
        }
        let bytes = base32_decode(s)?;
        if bytes.len() != 32 + CHECKSUM_LEN {
            return Err(EngineError::Address(format!("decoded to {} bytes", bytes.len())));
        }
        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(&bytes[..32]);
        if bytes[32..] != checksum(&public_key) {
            return Err(EngineError::Address(format!("checksum mismatch for '{}'", s)));
        }
        Ok(Address(public_key))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = Vec::with_capacity(32 + CHECKSUM_LEN);
        raw.extend_from_slice(&self.0);
        raw.extend_from_slice(&checksum(&self.0));
        f.write_str(&base32_encode(&raw))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

// Addresses go on the wire as 32-byte msgpack `bin`.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

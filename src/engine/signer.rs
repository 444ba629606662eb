// GroupSwap — Local Key Signer
// A `Signer` backed by in-memory ed25519 keys, for headless wallets and tests.
// Each bundle is signed by the key of its tagged signer; a bundle whose signer
// this wallet does not hold is refused rather than skipped.

use async_trait::async_trait;
use ed25519_dalek::{Signer as _, SigningKey};
use log::info;
use std::collections::HashMap;

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::Signer;
use crate::atoms::types::{Address, SignerGroup};
use crate::engine::swap::transaction::encode_signed;

pub struct LocalKeySigner {
    keys: HashMap<Address, SigningKey>,
}

impl Default for LocalKeySigner {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalKeySigner {
    pub fn new() -> Self {
        LocalKeySigner { keys: HashMap::new() }
    }

    /// Register a 32-byte ed25519 secret. Returns the account address.
    pub fn add_key(&mut self, secret: &[u8; 32]) -> Address {
        let signing_key = SigningKey::from_bytes(secret);
        let address = Address::from_public_key(signing_key.verifying_key().to_bytes());
        self.keys.insert(address, signing_key);
        address
    }

    pub fn holds(&self, address: &Address) -> bool {
        self.keys.contains_key(address)
    }
}

#[async_trait]
impl Signer for LocalKeySigner {
    async fn sign_groups(&self, groups: &[SignerGroup]) -> EngineResult<Vec<Vec<u8>>> {
        let mut signed = Vec::new();
        for bundle in groups.iter().flatten() {
            let signer = bundle
                .signers
                .first()
                .ok_or_else(|| EngineError::Signer("bundle has no signer".into()))?;
            if bundle.txn.sender != *signer {
                return Err(EngineError::Signer(format!(
                    "bundle signer {} is not the sender {}",
                    signer, bundle.txn.sender
                )));
            }
            let key = self
                .keys
                .get(signer)
                .ok_or_else(|| EngineError::Signer(format!("no key held for {}", signer)))?;
            let signature = key.sign(&bundle.txn.bytes_to_sign()?);
            signed.push(encode_signed(&bundle.txn, &signature.to_bytes())?);
        }
        info!("[signer] Signed {} transaction(s)", signed.len());
        Ok(signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::{Digest, SignerBundle, SuggestedParams};
    use crate::engine::swap::transaction::payment;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    fn params() -> SuggestedParams {
        SuggestedParams {
            fee: 0,
            min_fee: 1_000,
            first_round: 10,
            last_round: 1_010,
            genesis_id: "testnet-v1.0".into(),
            genesis_hash: Digest([4u8; 32]),
        }
    }

    #[tokio::test]
    async fn test_signs_with_sender_key() {
        let mut signer = LocalKeySigner::new();
        let from = signer.add_key(&[1u8; 32]);
        let to = Address([2u8; 32]);
        let txn = payment(&params(), from, to, 10);
        let groups = vec![vec![SignerBundle { txn: txn.clone(), signers: vec![from] }]];

        let signed = signer.sign_groups(&groups).await.unwrap();
        assert_eq!(signed.len(), 1);

        // Envelope: fixmap(2) "sig" bin8(64) <sig> "txn" <txn>
        let sig_bytes: [u8; 64] = signed[0][7..71].try_into().unwrap();
        let verifying = VerifyingKey::from_bytes(from.as_bytes()).unwrap();
        verifying
            .verify(&txn.bytes_to_sign().unwrap(), &Signature::from_bytes(&sig_bytes))
            .unwrap();
    }

    #[tokio::test]
    async fn test_refuses_unknown_signer() {
        let signer = LocalKeySigner::new();
        let from = Address([5u8; 32]);
        let txn = payment(&params(), from, Address([6u8; 32]), 10);
        let groups = vec![vec![SignerBundle { txn, signers: vec![from] }]];
        let err = signer.sign_groups(&groups).await.unwrap_err();
        assert!(matches!(err, EngineError::Signer(_)));
    }

    #[test]
    fn test_add_key_derives_address() {
        let mut signer = LocalKeySigner::new();
        let a = signer.add_key(&[1u8; 32]);
        let b = signer.add_key(&[2u8; 32]);
        assert_ne!(a, b);
        assert!(signer.holds(&a) && signer.holds(&b));
    }
}

use avail_subxt::AvailConfig as AvailRuntimeConfig;
use connectors_common::ConnectorError;
use std::fmt;
use subxt::ext::sp_core::crypto::Ss58Codec;
use subxt::ext::sp_core::sr25519::{self, Pair};
use subxt::ext::sp_core::Pair as _;

pub type AvailPairSigner = subxt::tx::PairSigner<AvailRuntimeConfig, Pair>;

/// sr25519 key pair derived from a seed phrase or secret URI (`//Alice`, `<mnemonic>//hard/soft`).
pub struct Signer {
    pair: Pair,
}

impl Signer {
    pub fn from_phrase(phrase: &str) -> Result<Self, ConnectorError> {
        // an empty URI silently resolves to the public dev phrase
        if phrase.trim().is_empty() {
            return Err(ConnectorError::Signer("empty seed phrase".to_string()));
        }
        let pair = Pair::from_string(phrase, None)
            .map_err(|e| ConnectorError::Signer(format!("invalid seed phrase: {:?}", e)))?;
        Ok(Signer { pair })
    }

    pub fn public(&self) -> sr25519::Public {
        self.pair.public()
    }

    /// SS58 address of the signing account.
    pub fn address(&self) -> String {
        self.pair.public().to_ss58check()
    }

    /// Extrinsic signer for the Avail runtime; nonce, era and genesis are filled in by subxt.
    pub fn pair_signer(&self) -> AvailPairSigner {
        AvailPairSigner::new(self.pair.clone())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("address", &self.address()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn test_dev_uri_address() {
        let signer = Signer::from_phrase("//Alice").unwrap();
        assert_eq!(signer.address(), ALICE);
    }

    #[test]
    fn test_derivation_changes_account() {
        let alice = Signer::from_phrase("//Alice").unwrap();
        let bob = Signer::from_phrase("//Bob").unwrap();
        assert_ne!(alice.public(), bob.public());
    }

    #[test]
    fn test_invalid_phrase_rejected() {
        let err = Signer::from_phrase("definitely not a valid mnemonic").unwrap_err();
        assert!(matches!(err, ConnectorError::Signer(_)));
    }

    #[test]
    fn test_empty_phrase_rejected() {
        assert!(matches!(Signer::from_phrase("  "), Err(ConnectorError::Signer(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = Signer::from_phrase("//Alice").unwrap();
        let out = format!("{:?}", signer);
        assert!(out.contains(ALICE));
        assert!(!out.contains("//Alice"));
    }
}

//! Signer selection.

use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use crate::error::Error;

/// Where the signing key comes from.
///
/// Sources are tried in order: `private_key`, `key_path`, `mnemonic`.
/// With a mnemonic, index 0 is the first account of the wallet.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Hex-encoded private key.
    pub private_key: Option<String>,
    /// File holding a hex-encoded private key.
    pub key_path: Option<PathBuf>,
    /// BIP-39 phrase.
    pub mnemonic: Option<String>,
    /// Derivation index used with `mnemonic`.
    pub mnemonic_index: u32,
}

impl SignerConfig {
    /// Build the signer.
    pub fn load(&self) -> Result<PrivateKeySigner> {
        if let Some(key) = &self.private_key {
            return key.trim().parse().wrap_err("invalid private key");
        }

        if let Some(path) = &self.key_path {
            let key = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read key file {}", path.display()))?;
            return key
                .trim()
                .parse()
                .wrap_err_with(|| format!("invalid private key in {}", path.display()));
        }

        if let Some(phrase) = &self.mnemonic {
            return MnemonicBuilder::<English>::default()
                .phrase(phrase.trim())
                .index(self.mnemonic_index)?
                .build()
                .wrap_err("invalid mnemonic");
        }

        Err(Error::NoSigner.into())
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |set: bool| if set { "<redacted>" } else { "<unset>" };
        f.debug_struct("SignerConfig")
            .field("private_key", &redacted(self.private_key.is_some()))
            .field("key_path", &self.key_path)
            .field("mnemonic", &redacted(self.mnemonic.is_some()))
            .field("mnemonic_index", &self.mnemonic_index)
            .finish()
    }
}

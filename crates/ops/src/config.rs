//! Script configuration.
//!
//! Values are layered: command line (and the matching environment variables)
//! over an optional TOML file over built-in defaults. The fixed call values
//! in [`crate::constants`] are not configurable.

use clap::Args;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{constants::defaults, proxy::ProxyKind, signer::SignerConfig};

/// Settings shared by both scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// JSON-RPC endpoint.
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,
    /// Directory with compiled contract artifacts.
    #[serde(default = "defaults::artifacts_dir")]
    pub artifacts_dir: PathBuf,
    /// Directory receiving the per-chain deployment manifests.
    #[serde(default = "defaults::manifest_dir")]
    pub manifest_dir: PathBuf,
    /// Proxy pattern used by the staking deployment.
    #[serde(default)]
    pub proxy_kind: ProxyKind,
    /// Blocks a deployment must be buried under.
    #[serde(default = "defaults::confirmations")]
    pub confirmations: u64,
    /// Give up waiting for a receipt after this many seconds.
    #[serde(default)]
    pub confirmation_timeout_secs: Option<u64>,
    #[serde(default)]
    pub signer: SignerConfig,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            rpc_url: defaults::rpc_url(),
            artifacts_dir: defaults::artifacts_dir(),
            manifest_dir: defaults::manifest_dir(),
            proxy_kind: ProxyKind::default(),
            confirmations: defaults::CONFIRMATIONS,
            confirmation_timeout_secs: None,
            signer: SignerConfig::default(),
        }
    }
}

impl ScriptConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }
}

/// Command line options shared by both scripts. Every option is optional.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Path to a TOML config file.
    #[arg(long, env = "X314_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint.
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Hex-encoded private key of the sending account.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// File containing a hex-encoded private key.
    #[arg(long)]
    pub key_path: Option<PathBuf>,

    /// BIP-39 mnemonic of the sending wallet.
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Account index used with --mnemonic.
    #[arg(long)]
    pub mnemonic_index: Option<u32>,

    /// Directory with compiled contract artifacts.
    #[arg(long, env = "X314_ARTIFACTS")]
    pub artifacts: Option<PathBuf>,
}

impl ConnectionArgs {
    /// Read the config file, if any, and apply the command line on top.
    pub fn resolve(&self) -> Result<ScriptConfig> {
        let mut config = match &self.config {
            Some(path) => ScriptConfig::load(path)?,
            None => ScriptConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Override `config` with every option set on the command line.
    pub fn apply(&self, config: &mut ScriptConfig) {
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url.clone_from(rpc_url);
        }
        if let Some(artifacts) = &self.artifacts {
            config.artifacts_dir.clone_from(artifacts);
        }
        if self.private_key.is_some() {
            config.signer.private_key.clone_from(&self.private_key);
        }
        if self.key_path.is_some() {
            config.signer.key_path.clone_from(&self.key_path);
        }
        if self.mnemonic.is_some() {
            config.signer.mnemonic.clone_from(&self.mnemonic);
        }
        if let Some(index) = self.mnemonic_index {
            config.signer.mnemonic_index = index;
        }
    }
}

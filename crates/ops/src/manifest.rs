//! Per-chain record of proxy deployments.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::proxy::ProxyDeployment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub chain_id: u64,
    #[serde(default)]
    pub proxies: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Artifact name of the implementation.
    pub contract: String,
    #[serde(flatten)]
    pub deployment: ProxyDeployment,
    /// Seconds since the Unix epoch.
    pub deployed_at: u64,
}

impl Manifest {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            proxies: Vec::new(),
        }
    }

    /// `<dir>/chain-<chain_id>.json`
    pub fn path(dir: &Path, chain_id: u64) -> PathBuf {
        dir.join(format!("chain-{chain_id}.json"))
    }

    /// Read the manifest for `chain_id`, or start an empty one.
    pub fn load(dir: &Path, chain_id: u64) -> Result<Self> {
        let path = Self::path(dir, chain_id);
        if !path.exists() {
            return Ok(Self::new(chain_id));
        }
        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read manifest {}", path.display()))?;
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("invalid manifest {}", path.display()))
    }

    /// Write the manifest, replacing the previous file atomically.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
        let path = Self::path(dir, self.chain_id);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(self)?)
            .wrap_err_with(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .wrap_err_with(|| format!("failed to write manifest {}", path.display()))?;
        Ok(path)
    }
}

/// Append `deployment` to the manifest of `chain_id` under `dir`.
pub fn record(
    dir: &Path,
    chain_id: u64,
    contract: &str,
    deployment: ProxyDeployment,
) -> Result<PathBuf> {
    let mut manifest = Manifest::load(dir, chain_id)?;
    manifest.proxies.push(ManifestEntry {
        contract: contract.to_string(),
        deployment,
        deployed_at: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default(),
    });
    manifest.save(dir)
}

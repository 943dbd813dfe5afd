//! Compiled contract artifacts.
//!
//! Artifacts follow the Hardhat layout: one JSON file per contract at
//! `<root>/<sourceName>/<contractName>.json`, next to a `.dbg.json` file that
//! is ignored here. Build info lives under `<root>/build-info` and is skipped.

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Error;

/// Directory holding compiler build info rather than artifacts.
const BUILD_INFO_DIR: &str = "build-info";

/// A compiled contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode. Empty for interfaces and abstract contracts.
    #[serde(default)]
    pub bytecode: Bytes,
}

impl Artifact {
    /// Returns `<sourceName>:<contractName>`.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Parse an artifact file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::InvalidArtifact {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolves contract names to artifacts under a root directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the artifact for `name`.
    ///
    /// `name` is either a bare contract name (`Staking`) or a fully qualified
    /// one (`contracts/Staking.sol:Staking`). A bare name that matches
    /// contracts from several sources is rejected.
    pub fn find(&self, name: &str) -> Result<Artifact, Error> {
        if let Some((source, contract)) = name.rsplit_once(':') {
            let path = self.root.join(source).join(format!("{contract}.json"));
            if !path.is_file() {
                return Err(self.not_found(name));
            }
            return Artifact::read(path);
        }

        let file_name = format!("{name}.json");
        let mut matches = Vec::new();
        self.collect(&self.root, &file_name, &mut matches)?;
        matches.sort();

        match matches.as_slice() {
            [] => Err(self.not_found(name)),
            [path] => {
                debug!(path = %path.display(), "resolved artifact");
                Artifact::read(path)
            }
            paths => Err(Error::AmbiguousArtifact {
                name: name.to_string(),
                candidates: paths
                    .iter()
                    .map(|path| self.qualified_name(path, name))
                    .collect(),
            }),
        }
    }

    fn collect(&self, dir: &Path, file_name: &str, out: &mut Vec<PathBuf>) -> Result<(), Error> {
        let io_err = |source| Error::ArtifactIo {
            path: dir.to_path_buf(),
            source,
        };

        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            if entry.file_type().map_err(io_err)?.is_dir() {
                if entry.file_name() != BUILD_INFO_DIR {
                    self.collect(&path, file_name, out)?;
                }
            } else if entry.file_name() == file_name {
                out.push(path);
            }
        }
        Ok(())
    }

    fn qualified_name(&self, path: &Path, name: &str) -> String {
        let source = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.root).ok())
            .unwrap_or_else(|| Path::new(""));
        format!("{}:{name}", source.display())
    }

    fn not_found(&self, name: &str) -> Error {
        Error::ArtifactNotFound {
            name: name.to_string(),
            dir: self.root.clone(),
        }
    }
}

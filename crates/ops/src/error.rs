//! Errors detected by the scripts themselves.
//!
//! Transport, signer and node errors are not listed here: they travel
//! unchanged inside [`eyre::Report`]s.

use alloy::primitives::B256;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No artifact file matches the requested contract name.
    #[error("artifact for contract `{name}` not found in {}", dir.display())]
    ArtifactNotFound { name: String, dir: PathBuf },
    /// A bare contract name matches artifacts from several sources.
    #[error("multiple artifacts for contract `{name}`, use one of: {}", candidates.join(", "))]
    AmbiguousArtifact { name: String, candidates: Vec<String> },
    /// The artifact directory could not be read.
    #[error("failed to read artifacts from {}", path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An artifact file is not valid artifact JSON.
    #[error("invalid artifact {}", path.display())]
    InvalidArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The artifact has no creation bytecode (interface or abstract contract).
    #[error("contract `{0}` has no creation bytecode")]
    MissingBytecode(String),
    /// The ABI has no method with this name.
    #[error("contract `{contract}` has no method `{method}`")]
    MissingMethod { contract: String, method: String },
    /// No overload of the method takes this many arguments.
    #[error("contract `{contract}` has no `{method}` taking {args} arguments")]
    ArgumentCount {
        contract: String,
        method: String,
        args: usize,
    },
    /// Several overloads of the method take this many arguments.
    #[error("contract `{contract}` has {count} overloads of `{method}` taking {args} arguments")]
    AmbiguousOverload {
        contract: String,
        method: String,
        args: usize,
        count: usize,
    },
    /// Arguments do not match the ABI types.
    #[error("failed to encode arguments for `{contract}.{method}`")]
    Encode {
        contract: String,
        method: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },
    /// None of the signer sources is set.
    #[error("no signer configured, set --private-key, --key-path or --mnemonic")]
    NoSigner,
    /// The transaction was mined with a failed status.
    #[error("transaction {0} reverted")]
    Reverted(B256),
    /// A deployment receipt carries no contract address.
    #[error("transaction {0} did not create a contract")]
    NoContractAddress(B256),
}

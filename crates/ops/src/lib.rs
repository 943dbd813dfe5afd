//! Contract invocation and proxy deployment helpers behind the X314
//! operational scripts.
//!
//! Two flows are exposed, each backing one binary:
//!
//! - [`liquidity`]: calls `addLiquidity` on the deployed X314 contract.
//! - [`staking`]: deploys the `Staking` contract behind an upgradeable proxy.
//!
//! Both talk to the chain through the [`ChainClient`] trait. [`RpcClient`] is
//! the production implementation, backed by an alloy provider with a local
//! wallet. Contract ABIs and bytecode come from compiled artifacts on disk,
//! see [`ArtifactStore`].

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod artifacts;
pub mod client;
pub mod config;
pub mod constants;
pub mod contract;
pub mod error;
pub mod liquidity;
pub mod logging;
pub mod manifest;
pub mod proxy;
pub mod report;
pub mod signer;
pub mod staking;

pub use artifacts::{Artifact, ArtifactStore};
pub use client::{ChainClient, Deployment, RpcClient};
pub use config::{ConnectionArgs, ScriptConfig};
pub use contract::{ContractFactory, ContractHandle};
pub use error::Error;
pub use proxy::{ProxyDeployment, ProxyKind};
pub use report::Status;
pub use signer::SignerConfig;

#[cfg(test)]
pub(crate) mod test_utils;

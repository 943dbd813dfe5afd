//! Deployment of the `Staking` contract behind an upgradeable proxy.

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use eyre::Result;
use std::{fmt, path::Path};
use tracing::{info, warn};

use crate::{
    artifacts::ArtifactStore,
    client::{ChainClient, RpcClient},
    config::ScriptConfig,
    constants::staking,
    contract::ContractFactory,
    manifest,
    proxy::{ProxyDeployment, ProxyKind, deploy_proxy},
};

/// Result line of a successful deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployed(pub Address);

impl fmt::Display for Deployed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deployed to {}", self.0)
    }
}

/// Resolve the staking and proxy artifacts and deploy the proxy, initialized
/// with the fixed token address.
pub async fn deploy<C: ChainClient + ?Sized>(
    client: &C,
    artifacts: &ArtifactStore,
    kind: ProxyKind,
) -> Result<ProxyDeployment> {
    let implementation = ContractFactory::new(artifacts.find(staking::CONTRACT)?)?;
    let proxy = ContractFactory::new(artifacts.find(kind.contract_name())?)?;

    info!(token = %staking::TOKEN, "Deploying...");
    deploy_proxy(
        client,
        &implementation,
        &proxy,
        kind,
        staking::INITIALIZER,
        &[DynSolValue::Address(staking::TOKEN)],
    )
    .await
}

/// Deploy, then record the deployment in the manifest.
///
/// The deployment is final once confirmed, so a failure to record it is only
/// logged.
pub async fn deploy_and_record<C: ChainClient + ?Sized>(
    client: &C,
    artifacts: &ArtifactStore,
    kind: ProxyKind,
    manifest_dir: &Path,
) -> Result<Deployed> {
    let deployment = deploy(client, artifacts, kind).await?;

    let recorded = client.chain_id().await.and_then(|chain_id| {
        manifest::record(manifest_dir, chain_id, staking::CONTRACT, deployment)
    });
    match recorded {
        Ok(path) => info!(path = %path.display(), "deployment recorded"),
        Err(err) => warn!(%err, "failed to record deployment"),
    }

    Ok(Deployed(deployment.proxy))
}

/// Connect with `config` and run [`deploy_and_record`].
pub async fn run(config: &ScriptConfig) -> Result<Deployed> {
    let artifacts = ArtifactStore::new(&config.artifacts_dir);
    let client = RpcClient::from_config(config).await?;
    deploy_and_record(&client, &artifacts, config.proxy_kind, &config.manifest_dir).await
}

//! Upgradeable proxy deployment.
//!
//! The implementation is deployed first. The proxy is then created pointing
//! at it, with the initializer calldata passed to the proxy constructor so
//! initialization happens in the same transaction as the proxy creation.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, B256, Bytes},
};
use clap::ValueEnum;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

use crate::{client::ChainClient, constants, contract::ContractFactory};

/// Proxy pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    /// `TransparentUpgradeableProxy`, administered by the deploying account.
    #[default]
    Transparent,
    /// `ERC1967Proxy`; upgrades are authorized by the implementation.
    Uups,
}

impl ProxyKind {
    /// Artifact name of the proxy contract.
    pub const fn contract_name(self) -> &'static str {
        match self {
            Self::Transparent => constants::proxy::TRANSPARENT,
            Self::Uups => constants::proxy::UUPS,
        }
    }

    /// Proxy constructor arguments.
    fn constructor_args(
        self,
        implementation: Address,
        owner: Address,
        data: Bytes,
    ) -> Vec<DynSolValue> {
        let implementation = DynSolValue::Address(implementation);
        let data = DynSolValue::Bytes(data.to_vec());
        match self {
            Self::Transparent => vec![implementation, DynSolValue::Address(owner), data],
            Self::Uups => vec![implementation, data],
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str("transparent"),
            Self::Uups => f.write_str("uups"),
        }
    }
}

/// Addresses and transactions of a proxy deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyDeployment {
    pub kind: ProxyKind,
    pub proxy: Address,
    pub implementation: Address,
    pub proxy_tx: B256,
    pub implementation_tx: B256,
}

/// Deploy `implementation` behind a proxy built from `proxy`, initialized
/// by calling `initializer(args)` through the proxy.
///
/// The initializer calldata and both creation codes are encoded before the
/// first transaction is sent, so resolution errors never leave a stray
/// implementation behind.
#[instrument(skip_all, fields(contract = implementation.name(), %kind))]
pub async fn deploy_proxy<C: ChainClient + ?Sized>(
    client: &C,
    implementation: &ContractFactory,
    proxy: &ContractFactory,
    kind: ProxyKind,
    initializer: &str,
    args: &[DynSolValue],
) -> Result<ProxyDeployment> {
    let init_data = implementation.encode_call(initializer, args)?;
    let implementation_code = implementation.deploy_code(&[])?;
    // Validates the proxy constructor against its ABI before anything is sent.
    proxy.deploy_code(&kind.constructor_args(Address::ZERO, client.sender(), init_data.clone()))?;

    let logic = client
        .deploy(implementation_code)
        .await
        .wrap_err_with(|| format!("failed to deploy {} implementation", implementation.name()))?;
    info!(address = %logic.address, tx = %logic.transaction_hash, "implementation deployed");

    let proxy_code =
        proxy.deploy_code(&kind.constructor_args(logic.address, client.sender(), init_data))?;
    let deployed = client
        .deploy(proxy_code)
        .await
        .wrap_err_with(|| format!("failed to deploy {}", proxy.name()))?;
    info!(address = %deployed.address, tx = %deployed.transaction_hash, "proxy deployed");

    Ok(ProxyDeployment {
        kind,
        proxy: deployed.address,
        implementation: logic.address,
        proxy_tx: deployed.transaction_hash,
        implementation_tx: logic.transaction_hash,
    })
}

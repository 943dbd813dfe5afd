//! `addLiquidity` invocation on the deployed X314 contract.

use alloy::{
    dyn_abi::DynSolValue,
    network::TransactionBuilder,
    primitives::{B256, U256},
    rpc::types::TransactionRequest,
};
use eyre::Result;
use tracing::{info, instrument};

use crate::{
    artifacts::ArtifactStore,
    client::{ChainClient, RpcClient},
    config::ScriptConfig,
    constants::{X314_ADDRESS, liquidity},
    contract::ContractHandle,
    error::Error,
};

/// Arguments of the `addLiquidity` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidity {
    /// First call argument.
    pub amount: U256,
    /// Native value attached to the transaction, in wei.
    pub value: U256,
}

impl AddLiquidity {
    /// The fixed call: `37324000` with 40 native units attached.
    pub fn fixed() -> Self {
        Self {
            amount: U256::from(liquidity::AMOUNT),
            value: native_units(liquidity::VALUE_UNITS),
        }
    }

    /// Build the transaction against `contract`.
    pub fn request(&self, contract: &ContractHandle) -> Result<TransactionRequest, Error> {
        let tx = contract.call(liquidity::METHOD, &[DynSolValue::Uint(self.amount, 256)])?;
        Ok(tx.with_value(self.value))
    }
}

/// Scale whole native units to wei.
pub fn native_units(units: u64) -> U256 {
    U256::from(units) * U256::from(10u64).pow(U256::from(liquidity::NATIVE_DECIMALS))
}

/// Resolve the X314 contract and submit the fixed `addLiquidity` call.
#[instrument(skip_all, fields(contract = %X314_ADDRESS))]
pub async fn invoke<C: ChainClient + ?Sized>(
    client: &C,
    artifacts: &ArtifactStore,
) -> Result<B256> {
    let contract = ContractHandle::new(artifacts.find(liquidity::CONTRACT)?, X314_ADDRESS);
    let call = AddLiquidity::fixed();
    let tx = call.request(&contract)?;

    info!(amount = %call.amount, value = %call.value, "submitting addLiquidity");
    client.submit(tx).await
}

/// Connect with `config` and run [`invoke`].
pub async fn run(config: &ScriptConfig) -> Result<B256> {
    let artifacts = ArtifactStore::new(&config.artifacts_dir);
    let client = RpcClient::from_config(config).await?;
    invoke(&client, &artifacts).await
}

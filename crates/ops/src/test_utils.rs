//! Artifact fixtures and a recording chain client for unit tests.

use alloy::{
    primitives::{Address, B256, Bytes},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use std::{path::Path, sync::Mutex};

use crate::client::{ChainClient, Deployment};

pub(crate) const X314_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "X314",
  "sourceName": "contracts/X314.sol",
  "abi": [
    {
      "type": "function",
      "name": "addLiquidity",
      "inputs": [{ "name": "_blockToUnlockLiquidity", "type": "uint32", "internalType": "uint32" }],
      "outputs": [],
      "stateMutability": "payable"
    },
    {
      "type": "function",
      "name": "balanceOf",
      "inputs": [{ "name": "account", "type": "address", "internalType": "address" }],
      "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }],
      "stateMutability": "view"
    }
  ],
  "bytecode": "0x6080604052",
  "deployedBytecode": "0x6080604052",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

pub(crate) const STAKING_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "Staking",
  "sourceName": "contracts/Staking.sol",
  "abi": [
    { "type": "constructor", "inputs": [], "stateMutability": "nonpayable" },
    {
      "type": "function",
      "name": "initialize",
      "inputs": [{ "name": "_token", "type": "address", "internalType": "address" }],
      "outputs": [],
      "stateMutability": "nonpayable"
    },
    {
      "type": "function",
      "name": "stake",
      "inputs": [{ "name": "amount", "type": "uint256", "internalType": "uint256" }],
      "outputs": [],
      "stateMutability": "nonpayable"
    },
    {
      "type": "function",
      "name": "stake",
      "inputs": [
        { "name": "amount", "type": "uint256", "internalType": "uint256" },
        { "name": "beneficiary", "type": "address", "internalType": "address" }
      ],
      "outputs": [],
      "stateMutability": "nonpayable"
    }
  ],
  "bytecode": "0x60a060405230",
  "deployedBytecode": "0x60a0604052",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

pub(crate) const TRANSPARENT_PROXY_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "TransparentUpgradeableProxy",
  "sourceName": "@openzeppelin/contracts/proxy/transparent/TransparentUpgradeableProxy.sol",
  "abi": [
    {
      "type": "constructor",
      "inputs": [
        { "name": "_logic", "type": "address", "internalType": "address" },
        { "name": "initialOwner", "type": "address", "internalType": "address" },
        { "name": "_data", "type": "bytes", "internalType": "bytes" }
      ],
      "stateMutability": "payable"
    }
  ],
  "bytecode": "0x60a0604052610c",
  "deployedBytecode": "0x6080",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

pub(crate) const UUPS_PROXY_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "ERC1967Proxy",
  "sourceName": "@openzeppelin/contracts/proxy/ERC1967/ERC1967Proxy.sol",
  "abi": [
    {
      "type": "constructor",
      "inputs": [
        { "name": "implementation", "type": "address", "internalType": "address" },
        { "name": "_data", "type": "bytes", "internalType": "bytes" }
      ],
      "stateMutability": "payable"
    }
  ],
  "bytecode": "0x608060405260",
  "deployedBytecode": "0x6080",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

pub(crate) const INTERFACE_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "IStaking",
  "sourceName": "contracts/IStaking.sol",
  "abi": [],
  "bytecode": "0x",
  "deployedBytecode": "0x",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

/// Write `content` to `<root>/<source>/<name>.json`.
pub(crate) fn write_artifact(root: &Path, source: &str, name: &str, content: &str) {
    let dir = root.join(source);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{name}.json")), content).unwrap();
}

/// Populate `root` with every fixture artifact.
pub(crate) fn write_all_artifacts(root: &Path) {
    write_artifact(root, "contracts/X314.sol", "X314", X314_ARTIFACT);
    write_artifact(root, "contracts/Staking.sol", "Staking", STAKING_ARTIFACT);
    write_artifact(root, "contracts/IStaking.sol", "IStaking", INTERFACE_ARTIFACT);
    write_artifact(
        root,
        "@openzeppelin/contracts/proxy/transparent/TransparentUpgradeableProxy.sol",
        "TransparentUpgradeableProxy",
        TRANSPARENT_PROXY_ARTIFACT,
    );
    write_artifact(
        root,
        "@openzeppelin/contracts/proxy/ERC1967/ERC1967Proxy.sol",
        "ERC1967Proxy",
        UUPS_PROXY_ARTIFACT,
    );
}

/// Chain client that records every request and answers from counters.
#[derive(Debug, Default)]
pub(crate) struct RecordingClient {
    pub(crate) submitted: Mutex<Vec<TransactionRequest>>,
    pub(crate) deployed: Mutex<Vec<Bytes>>,
    pub(crate) fail_deploy_at: Option<usize>,
}

impl RecordingClient {
    pub(crate) const SENDER: Address = Address::repeat_byte(0x5e);

    pub(crate) fn failing_deploy_at(index: usize) -> Self {
        Self {
            fail_deploy_at: Some(index),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChainClient for RecordingClient {
    fn sender(&self) -> Address {
        Self::SENDER
    }

    async fn chain_id(&self) -> eyre::Result<u64> {
        Ok(31337)
    }

    async fn submit(&self, tx: TransactionRequest) -> eyre::Result<B256> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(tx);
        Ok(B256::with_last_byte(submitted.len() as u8))
    }

    async fn deploy(&self, code: Bytes) -> eyre::Result<Deployment> {
        let mut deployed = self.deployed.lock().unwrap();
        if self.fail_deploy_at == Some(deployed.len()) {
            eyre::bail!("insufficient funds for gas * price + value");
        }
        deployed.push(code);
        let n = deployed.len() as u8;
        Ok(Deployment {
            address: Address::with_last_byte(n),
            transaction_hash: B256::with_last_byte(0xd0 + n),
        })
    }
}

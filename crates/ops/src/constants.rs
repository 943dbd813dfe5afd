//! Fixed values used by the operational scripts.

use alloy::primitives::{Address, address};

/// Deployed X314 contract. Also the token the staking contract is bound to.
pub const X314_ADDRESS: Address = address!("0x003144B41d9743D402c5bdF3f72Ca0f327aA0Bca");

/// Values of the `addLiquidity` call.
pub mod liquidity {
    /// Artifact name of the liquidity contract.
    pub const CONTRACT: &str = "X314";
    pub const METHOD: &str = "addLiquidity";
    /// First call argument, passed through unscaled.
    pub const AMOUNT: u64 = 37_324_000;
    /// Attached value in whole native units.
    pub const VALUE_UNITS: u64 = 40;
    /// Decimals of the native currency.
    pub const NATIVE_DECIMALS: u8 = 18;
}

/// Values of the staking deployment.
pub mod staking {
    use alloy::primitives::Address;

    /// Artifact name of the implementation contract.
    pub const CONTRACT: &str = "Staking";
    pub const INITIALIZER: &str = "initialize";
    /// Token address handed to the initializer.
    pub const TOKEN: Address = super::X314_ADDRESS;
}

/// Artifact names of the proxy contracts.
pub mod proxy {
    pub const TRANSPARENT: &str = "TransparentUpgradeableProxy";
    pub const UUPS: &str = "ERC1967Proxy";
}

/// Defaults applied when neither the CLI nor the config file set a value.
pub mod defaults {
    use std::path::PathBuf;

    /// Local development node.
    pub const RPC_URL: &str = "http://127.0.0.1:8545";
    pub const ARTIFACTS_DIR: &str = "artifacts";
    pub const MANIFEST_DIR: &str = ".deployments";
    pub const CONFIRMATIONS: u64 = 1;

    pub fn rpc_url() -> String {
        RPC_URL.to_string()
    }

    pub fn artifacts_dir() -> PathBuf {
        PathBuf::from(ARTIFACTS_DIR)
    }

    pub fn manifest_dir() -> PathBuf {
        PathBuf::from(MANIFEST_DIR)
    }

    pub const fn confirmations() -> u64 {
        CONFIRMATIONS
    }
}

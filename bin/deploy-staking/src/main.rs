//! Deploys the `Staking` contract behind an upgradeable proxy initialized
//! with the X314 token, and prints the proxy address.

use clap::Parser;
use std::{io, path::PathBuf, process::ExitCode};
use x314_ops::{ConnectionArgs, ProxyKind, logging, report, staking};

#[derive(Parser, Debug)]
#[command(name = "x314-deploy-staking", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Proxy pattern to deploy [default: transparent, or the config file value]
    #[arg(long, value_enum)]
    proxy_kind: Option<ProxyKind>,

    /// Directory receiving the per-chain deployment manifests.
    #[arg(long)]
    manifest_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli: Cli =
        match report::parse_args(std::env::args_os(), &mut io::stdout(), &mut io::stderr()) {
            Ok(cli) => cli,
            Err(status) => return status.into(),
        };
    logging::init();

    let flow = async {
        let mut config = cli.connection.resolve()?;
        if let Some(kind) = cli.proxy_kind {
            config.proxy_kind = kind;
        }
        if let Some(dir) = cli.manifest_dir {
            config.manifest_dir = dir;
        }
        tracing::debug!(?config, "resolved configuration");
        staking::run(&config).await
    };

    report::run(flow, &mut io::stdout(), &mut io::stderr())
        .await
        .into()
}

//! Calls `addLiquidity` on the deployed X314 contract and prints the
//! transaction hash.

use clap::Parser;
use std::{io, process::ExitCode};
use x314_ops::{ConnectionArgs, liquidity, logging, report};

#[derive(Parser, Debug)]
#[command(name = "x314-add-liquidity", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
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
        let config = cli.connection.resolve()?;
        tracing::debug!(?config, "resolved configuration");
        liquidity::run(&config).await
    };

    report::run(flow, &mut io::stdout(), &mut io::stderr())
        .await
        .into()
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use zkl2_logs::telemetry::{get_subscriber, init_subscriber};

use subcommands::{
    Alias, DecodeTx, DeployedContracts, HashBytecode, IsFinalized, TxStatus, WithdrawalParams,
};

pub mod errors;
pub mod subcommands;
pub mod utils;

#[derive(Debug, Parser)]
#[clap(author, about)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Subcommands>,
    #[clap(long = "version", short = 'V', help = "Print version info and exit")]
    version: bool,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    #[clap(about = "Compute the versioned hash of a contract bytecode")]
    HashBytecode(HashBytecode),
    #[clap(about = "Apply or undo the L1->L2 alias of an address")]
    Alias(Alias),
    #[clap(about = "Decode a raw signed transaction")]
    DecodeTx(DecodeTx),
    #[clap(about = "Show the status of an L2 transaction")]
    TxStatus(TxStatus),
    #[clap(about = "Resolve the parameters needed to finalize a withdrawal on L1")]
    WithdrawalParams(WithdrawalParams),
    #[clap(about = "Check whether a withdrawal was finalized on L1")]
    IsFinalized(IsFinalized),
    #[clap(about = "List contracts deployed by an L2 transaction")]
    DeployedContracts(DeployedContracts),
}

#[tokio::main]
async fn main() {
    let log_directory = utils::load_config()
        .ok()
        .and_then(|config| config.log_directory)
        .map(PathBuf::from);
    let (subscriber, _guard) = get_subscriber("zkl2".into(), "warn".into(), log_directory);
    if let Err(err) = init_subscriber(subscriber) {
        eprintln!("{}", format!("Warning: {err}").yellow());
    }

    if let Err(err) = run_command(Cli::parse()).await {
        eprintln!("{}", format!("Error: {err}").red());
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> Result<()> {
    match (cli.version, cli.command) {
        (false, None) => Ok(Cli::command().print_help()?),
        (true, _) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        (false, Some(command)) => match command {
            Subcommands::HashBytecode(cmd) => cmd.run(),
            Subcommands::Alias(cmd) => cmd.run(),
            Subcommands::DecodeTx(cmd) => cmd.run(),
            Subcommands::TxStatus(cmd) => cmd.run().await,
            Subcommands::WithdrawalParams(cmd) => cmd.run().await,
            Subcommands::IsFinalized(cmd) => cmd.run().await,
            Subcommands::DeployedContracts(cmd) => cmd.run().await,
        },
    }
}

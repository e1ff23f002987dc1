use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use zkl2_wallet_sdk::operation::priority_op::{get_transaction_status, TxStatus as Status};
use zkl2_web3_decl::namespaces::ZksNamespaceClient;

use crate::utils::{l2_client, load_config, parse_h256};

#[derive(Debug, Parser)]
pub struct TxStatus {
    #[clap(help = "Hash of the L2 transaction")]
    hash: String,
    #[clap(long, help = "Also print the details reported by the node")]
    details: bool,
}

impl TxStatus {
    pub async fn run(self) -> Result<()> {
        let hash = parse_h256(&self.hash)?;
        let config = load_config()?;
        let client = l2_client(&config)?;

        let status = get_transaction_status(&client, hash).await?;
        let label = format!("{status:?}");
        let label = match status {
            Status::NotFound => label.red(),
            Status::Processing => label.yellow(),
            Status::Committed | Status::Finalized => label.green(),
        };
        println!("{label}");

        if self.details {
            match client.get_transaction_details(hash).await? {
                Some(details) => println!("{}", serde_json::to_string_pretty(&details)?),
                None => println!("no details available"),
            }
        }
        Ok(())
    }
}

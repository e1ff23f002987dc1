use anyhow::Result;
use clap::Parser;
use zkl2_types::events::get_deployed_contracts;
use zkl2_web3_decl::namespaces::EthNamespaceClient;

use crate::utils::{l2_client, load_config, parse_h256};

#[derive(Debug, Parser)]
pub struct DeployedContracts {
    #[clap(help = "Hash of the L2 deployment transaction")]
    hash: String,
}

impl DeployedContracts {
    pub async fn run(self) -> Result<()> {
        let hash = parse_h256(&self.hash)?;
        let client = l2_client(&load_config()?)?;
        let receipt = client
            .get_transaction_receipt(hash)
            .await?
            .ok_or_else(|| anyhow::anyhow!("No receipt for transaction {hash:#x}"))?;

        let deployed = get_deployed_contracts(&receipt.logs);
        println!("{}", serde_json::to_string_pretty(&deployed)?);
        Ok(())
    }
}

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use zkl2_wallet_sdk::L1Ops;

use crate::utils::{load_config, parse_h256, wallet};

#[derive(Debug, Parser)]
pub struct WithdrawalParams {
    #[clap(help = "Hash of the L2 withdrawal transaction")]
    hash: String,
    #[clap(long, default_value_t = 0, help = "Which withdrawal of the transaction to resolve")]
    index: usize,
    #[clap(
        long,
        env = "ZKL2_PRIVATE_KEY",
        hide_env_values = true,
        help = "Key of the account to query as; not needed, nothing is signed"
    )]
    private_key: Option<String>,
}

impl WithdrawalParams {
    pub async fn run(self) -> Result<()> {
        let hash = parse_h256(&self.hash)?;
        let wallet = wallet(&load_config()?, self.private_key.as_deref()).await?;
        let params = wallet.finalize_withdrawal_params(hash, self.index).await?;
        println!("{}", serde_json::to_string_pretty(&params)?);
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct IsFinalized {
    #[clap(help = "Hash of the L2 withdrawal transaction")]
    hash: String,
    #[clap(long, default_value_t = 0, help = "Which withdrawal of the transaction to check")]
    index: usize,
    #[clap(
        long,
        env = "ZKL2_PRIVATE_KEY",
        hide_env_values = true,
        help = "Key of the account to query as; not needed, nothing is signed"
    )]
    private_key: Option<String>,
}

impl IsFinalized {
    pub async fn run(self) -> Result<()> {
        let hash = parse_h256(&self.hash)?;
        let wallet = wallet(&load_config()?, self.private_key.as_deref()).await?;
        if wallet.is_withdrawal_finalized(hash, self.index).await? {
            println!("{}", "finalized".green());
        } else {
            println!("{}", "not finalized".yellow());
        }
        Ok(())
    }
}

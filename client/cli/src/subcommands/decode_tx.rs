use anyhow::Result;
use clap::Parser;
use serde_json::json;
use zkl2_types::TransactionRequest;

use crate::utils::decode_hex;

#[derive(Debug, Parser)]
pub struct DecodeTx {
    #[clap(help = "Raw signed transaction, hex encoded")]
    raw: String,
}

impl DecodeTx {
    pub fn run(self) -> Result<()> {
        let bytes = decode_hex(&self.raw)?;
        let (tx, hash) = TransactionRequest::from_bytes(&bytes)?;
        let output = json!({
            "hash": hash,
            "transaction": tx,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use zkl2_utils::bytecode::{bytecode_len_in_words, hash_bytecode};

use crate::utils::decode_hex;

#[derive(Debug, Parser)]
pub struct HashBytecode {
    #[clap(long, value_name = "PATH", help = "File with the raw bytecode")]
    file: Option<PathBuf>,
    #[clap(long = "hex", value_name = "BYTECODE", help = "Bytecode as a hex string")]
    hex_code: Option<String>,
}

impl HashBytecode {
    pub fn run(self) -> Result<()> {
        let code = match (self.file, self.hex_code) {
            (Some(path), None) => std::fs::read(path)?,
            (None, Some(hex_code)) => decode_hex(&hex_code)?,
            _ => bail!("Exactly one of --file and --hex is required"),
        };
        let hash = hash_bytecode(&code)?;
        println!("hash:  {hash:#x}");
        println!("words: {}", bytecode_len_in_words(&hash));
        Ok(())
    }
}

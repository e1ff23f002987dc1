use anyhow::Result;
use clap::Parser;
use zkl2_utils::address_alias::{apply_l1_to_l2_alias, undo_l1_to_l2_alias};

use crate::utils::parse_address;

#[derive(Debug, Parser)]
pub struct Alias {
    #[clap(help = "Address to convert")]
    address: String,
    #[clap(long, help = "Turn an aliased L2 address back into the L1 one")]
    undo: bool,
}

impl Alias {
    pub fn run(self) -> Result<()> {
        let address = parse_address(&self.address)?;
        let converted = if self.undo {
            undo_l1_to_l2_alias(address)
        } else {
            apply_l1_to_l2_alias(address)
        };
        println!("{converted:#x}");
        Ok(())
    }
}

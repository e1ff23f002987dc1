//! Aliasing of L1 contract addresses.
//!
//! When a contract on L1 sends a priority operation, the L2 transaction is executed with
//! `msg.sender = apply_l1_to_l2_alias(contract)`, so that it can't be confused with an L2
//! account that happens to have the same address.

use zkl2_basic_types::{Address, U256};
use zkl2_config::constants::L1_TO_L2_ALIAS_OFFSET;

use crate::convert::{address_to_u256, u256_to_account_address};

fn address_modulo() -> U256 {
    U256::one() << 160
}

pub fn apply_l1_to_l2_alias(address: Address) -> Address {
    let sum = address_to_u256(&address) + address_to_u256(&L1_TO_L2_ALIAS_OFFSET);
    u256_to_account_address(&(sum % address_modulo()))
}

pub fn undo_l1_to_l2_alias(address: Address) -> Address {
    let aliased = address_to_u256(&address);
    let offset = address_to_u256(&L1_TO_L2_ALIAS_OFFSET);
    let original = if aliased < offset {
        aliased + address_modulo() - offset
    } else {
        aliased - offset
    };
    u256_to_account_address(&original)
}

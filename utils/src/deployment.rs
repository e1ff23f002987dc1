//! Addresses of contracts deployed through the contract deployer system contract.
//!
//! The rollup doesn't use the EVM's `CREATE`/`CREATE2` formulas: both schemes are prefixed
//! with a domain separator and `CREATE2` commits to the versioned bytecode hash.

use zkl2_basic_types::{Address, H256, U256};

use crate::{
    convert::{address_to_h256, h256_to_account_address, u256_to_h256},
    hash::keccak256,
};

const CREATE_PREFIX: &[u8] = b"zksyncCreate";
const CREATE2_PREFIX: &[u8] = b"zksyncCreate2";

pub fn create_address(sender: Address, deployment_nonce: U256) -> Address {
    let mut bytes = Vec::with_capacity(96);
    bytes.extend_from_slice(&keccak256(CREATE_PREFIX));
    bytes.extend_from_slice(address_to_h256(&sender).as_bytes());
    bytes.extend_from_slice(u256_to_h256(deployment_nonce).as_bytes());
    h256_to_account_address(&H256(keccak256(&bytes)))
}

pub fn create2_address(
    sender: Address,
    bytecode_hash: H256,
    salt: H256,
    constructor_input: &[u8],
) -> Address {
    let mut bytes = Vec::with_capacity(160);
    bytes.extend_from_slice(&keccak256(CREATE2_PREFIX));
    bytes.extend_from_slice(address_to_h256(&sender).as_bytes());
    bytes.extend_from_slice(salt.as_bytes());
    bytes.extend_from_slice(bytecode_hash.as_bytes());
    bytes.extend_from_slice(&keccak256(constructor_input));
    h256_to_account_address(&H256(keccak256(&bytes)))
}

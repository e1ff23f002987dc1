//! Log fixtures shared by the tests of this crate and of the crates built on top of it.

use ethabi::{encode, Token};
use zkl2_basic_types::{Address, Bytes, H256, U256};
use zkl2_contracts::new_priority_request_event;

use crate::api::Log;

/// `NewPriorityRequest` event of the main contract for an operation with the given id and
/// L2 hash.
pub fn priority_request_log(address: Address, id: u64, tx_hash: H256) -> Log {
    let transaction = Token::Tuple(vec![
        Token::Uint(U256::from(255)),
        Token::Uint(U256::from(1)),
        Token::Uint(U256::from(2)),
        Token::Uint(U256::from(300_000)),
        Token::Uint(U256::from(800)),
        Token::Uint(U256::zero()),
        Token::Uint(U256::zero()),
        Token::Uint(U256::zero()),
        Token::Uint(U256::from(id)),
        Token::Uint(U256::from(1000)),
        Token::FixedArray(vec![Token::Uint(U256::zero()); 4]),
        Token::Bytes(vec![]),
        Token::Bytes(vec![]),
        Token::Array(vec![]),
        Token::Bytes(vec![]),
        Token::Bytes(vec![]),
    ]);
    let data = encode(&[
        Token::Uint(U256::from(id)),
        Token::FixedBytes(tx_hash.as_bytes().to_vec()),
        Token::Uint(U256::from(1_700_000_000u64)),
        transaction,
        Token::Array(vec![Token::Bytes(vec![0u8; 32])]),
    ]);
    let topic = new_priority_request_event()
        .expect("embedded main contract ABI")
        .signature();
    Log {
        address,
        topics: vec![topic],
        data: Bytes(data),
        ..Default::default()
    }
}

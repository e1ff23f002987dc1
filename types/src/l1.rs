//! Priority operations, i.e. L2 transactions requested on L1.

use ethabi::{RawLog, Token};
use zkl2_basic_types::{Address, PriorityOpId, H256};
use zkl2_contracts::new_priority_request_event;

use crate::api::Log;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PriorityRequestDecodeError {
    #[error("log is not a `NewPriorityRequest` event: {0}")]
    Abi(String),
    #[error("event field `{0}` is missing or has an unexpected type")]
    UnexpectedField(&'static str),
}

/// Decoded `NewPriorityRequest` event of the main contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPriorityRequest {
    pub id: PriorityOpId,
    /// Hash the L2 transaction will have once executed.
    pub tx_hash: H256,
    pub expiration_timestamp: u64,
    pub factory_deps: Vec<Vec<u8>>,
}

impl TryFrom<&Log> for NewPriorityRequest {
    type Error = PriorityRequestDecodeError;

    fn try_from(log: &Log) -> Result<Self, Self::Error> {
        let raw_log = RawLog {
            topics: log.topics.clone(),
            data: log.data.0.clone(),
        };
        let parsed = new_priority_request_event()
            .and_then(|event| event.parse_log(raw_log))
            .map_err(|err| PriorityRequestDecodeError::Abi(err.to_string()))?;
        let param = |name: &'static str| {
            parsed
                .params
                .iter()
                .find(|param| param.name == name)
                .map(|param| param.value.clone())
                .ok_or(PriorityRequestDecodeError::UnexpectedField(name))
        };

        let id = param("txId")?
            .into_uint()
            .ok_or(PriorityRequestDecodeError::UnexpectedField("txId"))?;
        let tx_hash = param("txHash")?
            .into_fixed_bytes()
            .filter(|bytes| bytes.len() == 32)
            .ok_or(PriorityRequestDecodeError::UnexpectedField("txHash"))?;
        let expiration_timestamp = param("expirationTimestamp")?
            .into_uint()
            .ok_or(PriorityRequestDecodeError::UnexpectedField("expirationTimestamp"))?;
        let factory_deps = param("factoryDeps")?
            .into_array()
            .ok_or(PriorityRequestDecodeError::UnexpectedField("factoryDeps"))?
            .into_iter()
            .map(Token::into_bytes)
            .collect::<Option<Vec<_>>>()
            .ok_or(PriorityRequestDecodeError::UnexpectedField("factoryDeps"))?;

        Ok(Self {
            id: PriorityOpId(id.low_u64()),
            tx_hash: H256::from_slice(&tx_hash),
            expiration_timestamp: expiration_timestamp.low_u64(),
            factory_deps,
        })
    }
}

/// Finds the L2 hash of the priority operation requested by an L1 transaction.
///
/// Only logs emitted by `main_contract` are considered; if several of them decode, the last one
/// wins.
pub fn get_l2_hash_from_priority_op(logs: &[Log], main_contract: Address) -> Option<H256> {
    logs.iter()
        .filter(|log| log.address == main_contract)
        .filter_map(|log| NewPriorityRequest::try_from(log).ok())
        .last()
        .map(|request| request.tx_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testonly::priority_request_log;

    #[test]
    fn decodes_priority_request() {
        let log = priority_request_log(Address::repeat_byte(1), 42, H256::repeat_byte(7));
        let request = NewPriorityRequest::try_from(&log).unwrap();
        assert_eq!(request.id, PriorityOpId(42));
        assert_eq!(request.tx_hash, H256::repeat_byte(7));
        assert_eq!(request.expiration_timestamp, 1_700_000_000);
        assert_eq!(request.factory_deps, vec![vec![0u8; 32]]);
    }

    #[test]
    fn foreign_event_is_rejected() {
        let mut log = priority_request_log(Address::repeat_byte(1), 1, H256::repeat_byte(7));
        log.topics = vec![H256::repeat_byte(0xee)];
        assert!(matches!(
            NewPriorityRequest::try_from(&log),
            Err(PriorityRequestDecodeError::Abi(_))
        ));
    }

    #[test]
    fn last_log_of_main_contract_wins() {
        let main_contract = Address::repeat_byte(1);
        let logs = vec![
            priority_request_log(main_contract, 1, H256::repeat_byte(1)),
            Log {
                address: main_contract,
                topics: vec![H256::repeat_byte(0xee)],
                ..Default::default()
            },
            priority_request_log(main_contract, 2, H256::repeat_byte(2)),
            priority_request_log(Address::repeat_byte(9), 3, H256::repeat_byte(3)),
        ];
        assert_eq!(
            get_l2_hash_from_priority_op(&logs, main_contract),
            Some(H256::repeat_byte(2))
        );
        assert_eq!(get_l2_hash_from_priority_op(&logs[1..2], main_contract), None);
    }
}

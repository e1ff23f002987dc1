use serde::{Deserialize, Serialize};
use zkl2_basic_types::{Address, H256, U256, U64};

/// Log sent from L2 to L1, as returned within an L2 transaction receipt.
///
/// Logs have no identity of their own: they are addressed by their position in the receipt
/// and in the L1 batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct L2ToL1Log {
    pub block_hash: Option<H256>,
    pub block_number: U64,
    pub l1_batch_number: Option<U64>,
    pub log_index: U256,
    pub transaction_index: U64,
    pub transaction_hash: H256,
    pub transaction_log_index: U256,
    #[serde(default)]
    pub tx_index_in_l1_batch: Option<U64>,
    pub shard_id: U64,
    pub is_service: bool,
    pub sender: Address,
    pub key: H256,
    pub value: H256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_node_response() {
        let json = r#"{
            "blockHash": "0x0000000000000000000000000000000000000000000000000000000000000001",
            "blockNumber": "0x10",
            "l1BatchNumber": "0x2",
            "logIndex": "0x0",
            "transactionIndex": "0x1",
            "transactionHash": "0x0000000000000000000000000000000000000000000000000000000000000002",
            "transactionLogIndex": "0x0",
            "shardId": "0x0",
            "isService": true,
            "sender": "0x0000000000000000000000000000000000008008",
            "key": "0x0000000000000000000000000000000000000000000000000000000000000003",
            "value": "0x0000000000000000000000000000000000000000000000000000000000000004"
        }"#;
        let log: L2ToL1Log = serde_json::from_str(json).unwrap();
        assert_eq!(log.l1_batch_number, Some(2.into()));
        assert_eq!(log.tx_index_in_l1_batch, None);
        assert!(log.is_service);
        assert_eq!(log.sender.to_low_u64_be(), 0x8008);
    }
}

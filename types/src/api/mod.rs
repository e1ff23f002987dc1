//! Types returned by the `eth` and `zks` JSON-RPC namespaces.
//!
//! Both layers are queried through the same types: L1 nodes simply omit the rollup-specific
//! fields, which are optional here.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use strum::Display;
use zkl2_basic_types::{Address, Bytes, H256, U256, U64};

pub use crate::l2_to_l1_log::L2ToL1Log;
pub use crate::transaction_request::CallRequest;

/// Block tag accepted by `eth_getBlockByNumber` and friends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display)]
pub enum BlockNumber {
    /// Last block included into a batch committed on L1.
    Committed,
    /// Last block that was finalized on L1.
    Finalized,
    /// Latest sealed block
    #[default]
    Latest,
    /// Earliest block (genesis)
    Earliest,
    /// Latest block (may be the block that is currently open).
    Pending,
    /// Block by number from canon chain
    Number(U64),
}

impl<T: Into<U64>> From<T> for BlockNumber {
    fn from(num: T) -> Self {
        BlockNumber::Number(num.into())
    }
}

impl Serialize for BlockNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            BlockNumber::Number(ref x) => serializer.serialize_str(&format!("0x{:x}", x)),
            BlockNumber::Committed => serializer.serialize_str("committed"),
            BlockNumber::Finalized => serializer.serialize_str("finalized"),
            BlockNumber::Latest => serializer.serialize_str("latest"),
            BlockNumber::Earliest => serializer.serialize_str("earliest"),
            BlockNumber::Pending => serializer.serialize_str("pending"),
        }
    }
}

impl<'de> Deserialize<'de> for BlockNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = BlockNumber;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("A block number or one of the supported aliases")
            }
            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                let result = match value {
                    "committed" => BlockNumber::Committed,
                    "finalized" => BlockNumber::Finalized,
                    "latest" => BlockNumber::Latest,
                    "earliest" => BlockNumber::Earliest,
                    "pending" => BlockNumber::Pending,
                    num => {
                        let number =
                            U64::deserialize(de::value::BorrowedStrDeserializer::new(num))?;
                        BlockNumber::Number(number)
                    }
                };

                Ok(result)
            }
        }
        deserializer.deserialize_str(V)
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<H256>,
    pub data: Bytes,
    pub block_hash: Option<H256>,
    pub block_number: Option<U64>,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    pub transaction_hash: Option<H256>,
    pub transaction_index: Option<U64>,
    pub log_index: Option<U256>,
    #[serde(default)]
    pub transaction_log_index: Option<U256>,
    #[serde(default)]
    pub log_type: Option<String>,
    #[serde(default)]
    pub removed: Option<bool>,
}

impl Log {
    pub fn is_removed(&self) -> bool {
        self.removed == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: H256,
    pub transaction_index: U64,
    pub block_hash: Option<H256>,
    pub block_number: Option<U64>,
    /// Index of the transaction within its L1 batch. Only set by the rollup.
    #[serde(default)]
    pub l1_batch_tx_index: Option<U64>,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    pub from: Address,
    pub to: Option<Address>,
    #[serde(default)]
    pub cumulative_gas_used: U256,
    pub gas_used: Option<U256>,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
    #[serde(default)]
    pub l2_to_l1_logs: Vec<L2ToL1Log>,
    pub status: Option<U64>,
    #[serde(default)]
    pub effective_gas_price: Option<U256>,
    #[serde(rename = "type", default)]
    pub transaction_type: Option<U64>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == Some(U64::one())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: H256,
    pub nonce: U256,
    pub block_hash: Option<H256>,
    pub block_number: Option<U64>,
    pub transaction_index: Option<U64>,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    #[serde(default)]
    pub gas_price: Option<U256>,
    pub gas: U256,
    pub input: Bytes,
    #[serde(default)]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub chain_id: Option<U256>,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    #[serde(default)]
    pub l1_batch_tx_index: Option<U64>,
    #[serde(rename = "type", default)]
    pub transaction_type: Option<U64>,
}

/// Block header as returned by `eth_getBlockByNumber` without full transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub hash: Option<H256>,
    pub parent_hash: H256,
    pub number: Option<U64>,
    pub timestamp: U256,
    #[serde(default)]
    pub base_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub l1_batch_number: Option<U64>,
    #[serde(default)]
    pub transactions: Vec<H256>,
}

/// Merkle inclusion proof of an L2->L1 log in the tree of its L1 batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2ToL1LogProof {
    pub proof: Vec<H256>,
    /// Position of the log in the tree, i.e. the message index used on L1.
    pub id: u32,
    pub root: H256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BridgeAddresses {
    pub l1_erc20_default_bridge: Address,
    pub l2_erc20_default_bridge: Address,
    #[serde(default)]
    pub l1_weth_bridge: Option<Address>,
    #[serde(default)]
    pub l2_weth_bridge: Option<Address>,
}

/// Processing stage reported by `zks_getTransactionDetails`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TransactionStatus {
    Pending,
    Included,
    Verified,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub is_l1_originated: bool,
    pub status: TransactionStatus,
    pub fee: U256,
    #[serde(default)]
    pub gas_per_pubdata: Option<U256>,
    pub initiator_address: Address,
    pub received_at: String,
    pub eth_commit_tx_hash: Option<H256>,
    pub eth_prove_tx_hash: Option<H256>,
    pub eth_execute_tx_hash: Option<H256>,
}

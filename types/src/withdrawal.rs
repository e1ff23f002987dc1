use serde::{Deserialize, Serialize};
use zkl2_basic_types::{Address, H256, U64};

/// Everything needed to finalize a withdrawal on L1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeWithdrawalParams {
    pub l1_batch_number: U64,
    /// Position of the withdrawal message in the L2->L1 log tree of the batch.
    pub l2_message_index: u32,
    pub l2_tx_number_in_block: u16,
    pub message: Vec<u8>,
    /// Contract that sent the message, either the L2 ETH token or an L2 bridge.
    pub sender: Address,
    pub proof: Vec<H256>,
}

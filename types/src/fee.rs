use serde::{Deserialize, Serialize};
use zkl2_basic_types::U256;

/// Every fee a deposit costs, both on L1 and on L2.
///
/// Either `gas_price` or both EIP-1559 fields are set, depending on what the L1 node supports.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullDepositFee {
    /// Value that has to be paid on L1 for the L2 part of the deposit.
    pub base_cost: U256,
    pub l1_gas_limit: U256,
    pub l2_gas_limit: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
}

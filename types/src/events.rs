use ethabi::{long_signature, ParamType};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use zkl2_basic_types::{Address, H256};
use zkl2_config::constants::{CONTRACT_DEPLOYER_ADDRESS, L1_MESSENGER_ADDRESS};
use zkl2_utils::h256_to_account_address;

use crate::api::Log;

pub static DEPLOY_EVENT_SIGNATURE: Lazy<H256> = Lazy::new(|| {
    long_signature(
        "ContractDeployed",
        &[ParamType::Address, ParamType::FixedBytes(32), ParamType::Address],
    )
});

pub static L1_MESSAGE_EVENT_SIGNATURE: Lazy<H256> = Lazy::new(|| {
    long_signature(
        "L1MessageSent",
        &[ParamType::Address, ParamType::FixedBytes(32), ParamType::Bytes],
    )
});

/// Contract created by a transaction, as reported by the contract deployer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub sender: Address,
    pub bytecode_hash: H256,
    pub deployed_address: Address,
}

/// All contracts deployed by a transaction, in the order of the receipt logs.
pub fn get_deployed_contracts(logs: &[Log]) -> Vec<DeploymentInfo> {
    logs.iter()
        .filter(|log| {
            log.address == CONTRACT_DEPLOYER_ADDRESS
                && log.topics.len() == 4
                && log.topics[0] == *DEPLOY_EVENT_SIGNATURE
        })
        .map(|log| DeploymentInfo {
            sender: h256_to_account_address(&log.topics[1]),
            bytecode_hash: log.topics[2],
            deployed_address: h256_to_account_address(&log.topics[3]),
        })
        .collect()
}

/// Whether the log is an `L1MessageSent` event of the L1 messenger.
pub fn is_l1_message_log(log: &Log) -> bool {
    log.address == L1_MESSENGER_ADDRESS
        && log.topics.first() == Some(&*L1_MESSAGE_EVENT_SIGNATURE)
}

//! ABIs of the contracts the client talks to.
//!
//! The interfaces are embedded into the binary. A malformed ABI file or a missing entry is
//! reported as an [`ethabi::Error`] by the accessors; the tests below check that none is.

use std::borrow::Cow;

use ethabi::{Contract, Error, Event, Function};
use once_cell::sync::Lazy;

type LoadedContract = Result<Contract, String>;

fn load_contract(name: &str, abi: &str) -> LoadedContract {
    Contract::load(abi.as_bytes())
        .map_err(|err| format!("Failed to parse embedded ABI of {name}: {err}"))
}

fn loaded(contract: &'static LoadedContract) -> Result<&'static Contract, Error> {
    contract
        .as_ref()
        .map_err(|message| Error::Other(Cow::Owned(message.clone())))
}

macro_rules! embedded_contract {
    ($static_name:ident, $getter:ident, $file:literal) => {
        static $static_name: Lazy<LoadedContract> =
            Lazy::new(|| load_contract($file, include_str!(concat!("../abi/", $file, ".json"))));

        pub fn $getter() -> Result<&'static Contract, Error> {
            loaded(&$static_name)
        }
    };
}

embedded_contract!(ZKSYNC_CONTRACT, zksync_contract, "IZkSync");
embedded_contract!(L1_BRIDGE_CONTRACT, l1_bridge_contract, "IL1Bridge");
embedded_contract!(L2_BRIDGE_CONTRACT, l2_bridge_contract, "IL2Bridge");
embedded_contract!(L2_ETH_TOKEN_CONTRACT, l2_eth_token_contract, "IEthToken");
embedded_contract!(L1_MESSENGER_CONTRACT, l1_messenger_contract, "IL1Messenger");
embedded_contract!(CONTRACT_DEPLOYER_CONTRACT, contract_deployer_contract, "IContractDeployer");
embedded_contract!(ERC20_CONTRACT, erc20_contract, "IERC20");

fn function(
    contract: Result<&'static Contract, Error>,
    name: &str,
) -> Result<&'static Function, Error> {
    contract?.function(name)
}

fn event(contract: Result<&'static Contract, Error>, name: &str) -> Result<&'static Event, Error> {
    contract?.event(name)
}

/// Emitted by the main contract for every enqueued L1->L2 transaction.
pub fn new_priority_request_event() -> Result<&'static Event, Error> {
    event(zksync_contract(), "NewPriorityRequest")
}

/// Emitted by the L1 messenger for every message sent to L1, withdrawals included.
pub fn l1_message_sent_event() -> Result<&'static Event, Error> {
    event(l1_messenger_contract(), "L1MessageSent")
}

pub fn contract_deployed_event() -> Result<&'static Event, Error> {
    event(contract_deployer_contract(), "ContractDeployed")
}

pub fn request_l2_transaction_function() -> Result<&'static Function, Error> {
    function(zksync_contract(), "requestL2Transaction")
}

pub fn l2_transaction_base_cost_function() -> Result<&'static Function, Error> {
    function(zksync_contract(), "l2TransactionBaseCost")
}

pub fn finalize_eth_withdrawal_function() -> Result<&'static Function, Error> {
    function(zksync_contract(), "finalizeEthWithdrawal")
}

pub fn is_eth_withdrawal_finalized_function() -> Result<&'static Function, Error> {
    function(zksync_contract(), "isEthWithdrawalFinalized")
}

pub fn l1_bridge_deposit_function() -> Result<&'static Function, Error> {
    function(l1_bridge_contract(), "deposit")
}

pub fn l1_bridge_l2_bridge_function() -> Result<&'static Function, Error> {
    function(l1_bridge_contract(), "l2Bridge")
}

pub fn claim_failed_deposit_function() -> Result<&'static Function, Error> {
    function(l1_bridge_contract(), "claimFailedDeposit")
}

pub fn finalize_withdrawal_function() -> Result<&'static Function, Error> {
    function(l1_bridge_contract(), "finalizeWithdrawal")
}

pub fn is_withdrawal_finalized_function() -> Result<&'static Function, Error> {
    function(l1_bridge_contract(), "isWithdrawalFinalized")
}

pub fn l2_bridge_withdraw_function() -> Result<&'static Function, Error> {
    function(l2_bridge_contract(), "withdraw")
}

pub fn finalize_deposit_function() -> Result<&'static Function, Error> {
    function(l2_bridge_contract(), "finalizeDeposit")
}

pub fn l2_bridge_l1_bridge_function() -> Result<&'static Function, Error> {
    function(l2_bridge_contract(), "l1Bridge")
}

pub fn l2_eth_withdraw_function() -> Result<&'static Function, Error> {
    function(l2_eth_token_contract(), "withdraw")
}

pub fn erc20_allowance_function() -> Result<&'static Function, Error> {
    function(erc20_contract(), "allowance")
}

pub fn erc20_approve_function() -> Result<&'static Function, Error> {
    function(erc20_contract(), "approve")
}

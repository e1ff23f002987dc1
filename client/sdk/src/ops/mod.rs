//! What a wallet can do on each layer.

use async_trait::async_trait;
use zkl2_types::{
    api::{BridgeAddresses, TransactionDetails},
    events::DeploymentInfo,
    fee::FullDepositFee,
    withdrawal::FinalizeWithdrawalParams,
    Address, H256, U256,
};

use crate::{
    errors::ClientError,
    operation::{
        deposit::{DepositRequest, ExecuteRequest},
        priority_op::{PriorityOpHandle, TxStatus},
        withdrawal::WithdrawRequest,
        Overrides, SyncTransactionHandle,
    },
};

mod l1;
mod l2;

/// Operations submitted to or checked on L1: priority operations and withdrawal finalization.
#[async_trait]
pub trait L1Ops {
    type Provider: Send + Sync;

    async fn main_contract_address(&self) -> Result<Address, ClientError>;

    async fn bridge_contracts(&self) -> Result<BridgeAddresses, ClientError>;

    /// Value to pay on L1 for the L2 part of a priority operation.
    async fn base_cost(
        &self,
        l2_gas_limit: U256,
        gas_per_pubdata_byte: U256,
        gas_price: U256,
    ) -> Result<U256, ClientError>;

    async fn l1_allowance(&self, token: Address, spender: Address) -> Result<U256, ClientError>;

    /// Every fee the deposit costs. Fails early if the wallet can't afford it.
    async fn full_required_deposit_fee(
        &self,
        request: DepositRequest,
    ) -> Result<FullDepositFee, ClientError>;

    async fn deposit(
        &self,
        request: DepositRequest,
    ) -> Result<PriorityOpHandle<Self::Provider>, ClientError>;

    async fn request_execute(
        &self,
        request: ExecuteRequest,
    ) -> Result<PriorityOpHandle<Self::Provider>, ClientError>;

    /// Parameters of the `index`-th withdrawal made by an L2 transaction.
    async fn finalize_withdrawal_params(
        &self,
        l2_tx_hash: H256,
        index: usize,
    ) -> Result<FinalizeWithdrawalParams, ClientError>;

    async fn finalize_withdrawal(
        &self,
        params: FinalizeWithdrawalParams,
        overrides: Overrides,
    ) -> Result<H256, ClientError>;

    async fn is_withdrawal_finalized(
        &self,
        l2_tx_hash: H256,
        index: usize,
    ) -> Result<bool, ClientError>;

    /// Returns the tokens of a deposit that failed on L2 to the depositor.
    async fn claim_failed_deposit(
        &self,
        deposit_hash: H256,
        overrides: Overrides,
    ) -> Result<H256, ClientError>;
}

/// Operations of the wallet on L2.
#[async_trait]
pub trait L2Ops {
    type Provider: Send + Sync;

    async fn withdraw(
        &self,
        request: WithdrawRequest,
    ) -> Result<SyncTransactionHandle<Self::Provider>, ClientError>;

    async fn transaction_status(&self, hash: H256) -> Result<TxStatus, ClientError>;

    async fn transaction_details(
        &self,
        hash: H256,
    ) -> Result<Option<TransactionDetails>, ClientError>;

    async fn deployed_contracts(&self, hash: H256) -> Result<Vec<DeploymentInfo>, ClientError>;
}

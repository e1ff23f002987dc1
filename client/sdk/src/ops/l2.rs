use async_trait::async_trait;
use zkl2_logs::debug;
use zkl2_types::{
    api::TransactionDetails,
    events::{get_deployed_contracts, DeploymentInfo},
    H256,
};
use zkl2_web3_decl::namespaces::{EthNamespaceClient, ZksNamespaceClient};

use super::L2Ops;
use crate::{
    errors::ClientError,
    operation::{
        priority_op::{get_transaction_status, TxStatus},
        withdrawal::{withdraw_call, WithdrawRequest},
        SyncTransactionHandle,
    },
    wallet::Wallet,
    EthereumSigner,
};

#[async_trait]
impl<S, P> L2Ops for Wallet<S, P>
where
    S: EthereumSigner,
    P: EthNamespaceClient + ZksNamespaceClient + Clone + Send + Sync,
{
    type Provider = P;

    async fn withdraw(
        &self,
        request: WithdrawRequest,
    ) -> Result<SyncTransactionHandle<P>, ClientError> {
        let bridges = self.contract_addresses().await?.bridges;
        let call = withdraw_call(&request, self.address(), bridges.l2_erc20_default_bridge)?;
        debug!(
            "Withdrawing {} of {:?} through {:?}",
            request.amount, request.token, call.contract
        );

        self.start_execute_contract()
            .contract_address(call.contract)
            .calldata(call.calldata)
            .value(call.value)
            .send()
            .await
    }

    async fn transaction_status(&self, hash: H256) -> Result<TxStatus, ClientError> {
        get_transaction_status(&self.l2, hash).await
    }

    async fn transaction_details(
        &self,
        hash: H256,
    ) -> Result<Option<TransactionDetails>, ClientError> {
        Ok(self.l2.get_transaction_details(hash).await?)
    }

    async fn deployed_contracts(&self, hash: H256) -> Result<Vec<DeploymentInfo>, ClientError> {
        let receipt = self
            .l2
            .get_transaction_receipt(hash)
            .await?
            .ok_or(ClientError::TransactionNotFound(hash))?;
        Ok(get_deployed_contracts(&receipt.logs))
    }
}

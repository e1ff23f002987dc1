//! Tracking of priority operations, i.e. L2 transactions requested on L1.

use std::time::Duration;

use zkl2_logs::{debug, info};
use zkl2_types::{
    api::{Transaction, TransactionReceipt},
    l1::get_l2_hash_from_priority_op as l2_hash_from_logs,
    Address, H256, U64,
};
use zkl2_web3_decl::namespaces::EthNamespaceClient;

use super::{finalized_block_number, poll, PollingConfig, SyncTransactionHandle};
use crate::errors::ClientError;

/// Lifecycle stage of a transaction as seen by the rollup node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    NotFound,
    Processing,
    Committed,
    Finalized,
}

pub fn tx_status(tx: Option<&Transaction>, finalized_block: Option<U64>) -> TxStatus {
    let Some(tx) = tx else {
        return TxStatus::NotFound;
    };
    match (tx.block_number, finalized_block) {
        (None, _) => TxStatus::Processing,
        (Some(block), Some(finalized)) if block <= finalized => TxStatus::Finalized,
        (Some(_), _) => TxStatus::Committed,
    }
}

pub async fn get_transaction_status<P>(provider: &P, hash: H256) -> Result<TxStatus, ClientError>
where
    P: EthNamespaceClient + Sync,
{
    let tx = provider.get_transaction_by_hash(hash).await?;
    let finalized = match tx.as_ref().and_then(|tx| tx.block_number) {
        Some(_) => finalized_block_number(provider).await?,
        None => None,
    };
    Ok(tx_status(tx.as_ref(), finalized))
}

/// Waits until the node knows about the transaction, whatever its stage.
pub async fn wait_for_l2_visibility<P>(
    provider: &P,
    hash: H256,
    interval: Duration,
    timeout: Option<Duration>,
) -> Result<TxStatus, ClientError>
where
    P: EthNamespaceClient + Sync,
{
    poll(interval, timeout, || async move {
        let status = get_transaction_status(provider, hash).await?;
        Ok((status != TxStatus::NotFound).then_some(status))
    })
    .await
}

/// Hash of the L2 transaction requested by an L1 transaction.
pub fn get_l2_hash_from_priority_op(
    l1_receipt: &TransactionReceipt,
    main_contract: Address,
) -> Result<H256, ClientError> {
    l2_hash_from_logs(&l1_receipt.logs, main_contract)
        .ok_or(ClientError::PriorityOpLogNotFound)
}

/// Handle of an L1 transaction that requested an L2 transaction.
#[derive(Debug)]
pub struct PriorityOpHandle<P> {
    l1_tx_hash: H256,
    l1: P,
    l2: P,
    main_contract: Address,
    polling: PollingConfig,
}

impl<P> PriorityOpHandle<P>
where
    P: EthNamespaceClient + Clone + Sync,
{
    pub fn new(l1_tx_hash: H256, l1: P, l2: P, main_contract: Address, polling: PollingConfig) -> Self {
        Self {
            l1_tx_hash,
            l1,
            l2,
            main_contract,
            polling,
        }
    }

    pub fn l1_tx_hash(&self) -> H256 {
        self.l1_tx_hash
    }

    /// Waits for the L1 receipt of the request.
    pub async fn wait_l1_commit(&self) -> Result<TransactionReceipt, ClientError> {
        let l1 = &self.l1;
        let hash = self.l1_tx_hash;
        poll(self.polling.interval, self.polling.commit_timeout, || async move {
            let receipt = l1.get_transaction_receipt(hash).await?;
            Ok(receipt.filter(|receipt| receipt.block_number.is_some()))
        })
        .await
    }

    pub async fn l2_tx_hash(&self) -> Result<H256, ClientError> {
        let receipt = self.wait_l1_commit().await?;
        let l2_hash = get_l2_hash_from_priority_op(&receipt, self.main_contract)?;
        debug!("Priority op {:?} requested L2 tx {:?}", self.l1_tx_hash, l2_hash);
        Ok(l2_hash)
    }

    async fn l2_handle(&self) -> Result<SyncTransactionHandle<P>, ClientError> {
        let l2_hash = self.l2_tx_hash().await?;
        wait_for_l2_visibility(
            &self.l2,
            l2_hash,
            self.polling.interval,
            self.polling.commit_timeout,
        )
        .await?;
        Ok(SyncTransactionHandle::new(l2_hash, self.l2.clone(), self.polling))
    }

    /// Waits until the requested transaction is included into an L2 block.
    pub async fn wait(&self) -> Result<TransactionReceipt, ClientError> {
        let receipt = self.l2_handle().await?.wait_for_commit().await?;
        info!(
            "Priority op {:?} executed on L2 in block {:?}",
            self.l1_tx_hash, receipt.block_number
        );
        Ok(receipt)
    }

    /// Waits until the requested transaction is finalized on L1.
    pub async fn wait_finalize(&self) -> Result<TransactionReceipt, ClientError> {
        self.l2_handle().await?.wait_finalize().await
    }
}

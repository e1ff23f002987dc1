use std::{future::Future, time::Duration};

use tokio::time::Instant;
use zkl2_config::ClientConfig;
use zkl2_logs::trace;
use zkl2_types::{
    api::{BlockNumber, TransactionReceipt},
    H256, U256, U64,
};
use zkl2_web3_decl::namespaces::EthNamespaceClient;

use crate::errors::ClientError;

pub mod deposit;
pub mod execute_contract;
pub mod priority_op;
pub mod withdrawal;

/// How often the handles poll the nodes and how long they keep doing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub interval: Duration,
    /// `None` waits forever.
    pub commit_timeout: Option<Duration>,
    pub finalize_timeout: Option<Duration>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            commit_timeout: Some(Duration::from_secs(600)),
            finalize_timeout: Some(Duration::from_secs(24 * 60 * 60)),
        }
    }
}

impl From<&ClientConfig> for PollingConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            interval: config.polling_interval(),
            commit_timeout: config.commit_timeout(),
            finalize_timeout: config.finalize_timeout(),
        }
    }
}

/// Caller-provided fields of an L1 transaction. Unset fields are filled from the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub nonce: Option<U256>,
    pub value: Option<U256>,
    pub gas_limit: Option<U256>,
    pub gas_price: Option<U256>,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
}

impl Overrides {
    pub fn has_fees(&self) -> bool {
        self.gas_price.is_some() || self.max_fee_per_gas.is_some()
    }

    /// Same overrides with explicit fees removed, so that an estimation can't fail because
    /// the fees the caller is willing to pay exceed the balance.
    pub fn without_fees(&self) -> Self {
        Self {
            gas_price: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            ..self.clone()
        }
    }
}

/// Calls `query` every `interval` until it yields a value or `timeout` elapses.
pub(crate) async fn poll<T, F, Fut>(
    interval: Duration,
    timeout: Option<Duration>,
    mut query: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, ClientError>>,
{
    let started_at = Instant::now();
    loop {
        if let Some(value) = query().await? {
            return Ok(value);
        }
        if let Some(timeout) = timeout {
            if started_at.elapsed() >= timeout {
                return Err(ClientError::OperationTimeout(timeout));
            }
        }
        tokio::time::sleep(interval).await;
    }
}

/// Number of the last L2 block whose batch was executed on L1.
pub(crate) async fn finalized_block_number<P>(provider: &P) -> Result<Option<U64>, ClientError>
where
    P: EthNamespaceClient + Sync,
{
    let block = provider
        .get_block_by_number(BlockNumber::Finalized, false)
        .await?;
    Ok(block.and_then(|block| block.number))
}

/// Handle of a transaction sent to L2.
#[derive(Debug)]
pub struct SyncTransactionHandle<P> {
    hash: H256,
    provider: P,
    polling_interval: Duration,
    commit_timeout: Option<Duration>,
    finalize_timeout: Option<Duration>,
}

impl<P> SyncTransactionHandle<P>
where
    P: EthNamespaceClient + Sync,
{
    pub fn new(hash: H256, provider: P, polling: PollingConfig) -> Self {
        Self {
            hash,
            provider,
            polling_interval: polling.interval,
            commit_timeout: polling.commit_timeout,
            finalize_timeout: polling.finalize_timeout,
        }
    }

    pub fn hash(&self) -> H256 {
        self.hash
    }

    /// Waits until the transaction is included into a block.
    pub async fn wait_for_commit(&self) -> Result<TransactionReceipt, ClientError> {
        let provider = &self.provider;
        let hash = self.hash;
        poll(self.polling_interval, self.commit_timeout, || async move {
            let receipt = provider.get_transaction_receipt(hash).await?;
            trace!("Receipt of {:?}: {:?}", hash, receipt.is_some());
            Ok(receipt.filter(|receipt| receipt.block_number.is_some()))
        })
        .await
    }

    /// Waits until the block containing the transaction is finalized on L1.
    pub async fn wait_finalize(&self) -> Result<TransactionReceipt, ClientError> {
        let receipt = self.wait_for_commit().await?;
        let block_number = receipt
            .block_number
            .ok_or_else(|| ClientError::MissingRequiredField("blockNumber".into()))?;

        let provider = &self.provider;
        poll(self.polling_interval, self.finalize_timeout, || async move {
            let finalized = finalized_block_number(provider).await?;
            Ok(finalized.filter(|finalized| *finalized >= block_number).map(|_| ()))
        })
        .await?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn poll_returns_first_available_value() {
        let attempts = AtomicUsize::new(0);
        let counter = &attempts;
        let value = poll(Duration::from_millis(1), None, || async move {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            Ok((attempt == 3).then_some(attempt))
        })
        .await
        .unwrap();
        assert_eq!(value, 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn poll_gives_up_after_timeout() {
        let timeout = Duration::from_millis(20);
        let result: Result<(), _> =
            poll(Duration::from_millis(5), Some(timeout), || async { Ok(None) }).await;
        assert!(matches!(result, Err(ClientError::OperationTimeout(t)) if t == timeout));
    }

    #[tokio::test]
    async fn poll_propagates_errors() {
        let result: Result<(), _> = poll(Duration::from_millis(1), None, || async {
            Err(ClientError::ProofNotFound)
        })
        .await;
        assert!(matches!(result, Err(ClientError::ProofNotFound)));
    }

    #[test]
    fn fees_are_stripped_for_estimation() {
        let overrides = Overrides {
            nonce: Some(1.into()),
            value: Some(2.into()),
            gas_price: Some(3.into()),
            max_fee_per_gas: Some(4.into()),
            max_priority_fee_per_gas: Some(5.into()),
            ..Default::default()
        };
        assert!(overrides.has_fees());

        let stripped = overrides.without_fees();
        assert!(!stripped.has_fees());
        assert_eq!(stripped.max_priority_fee_per_gas, None);
        assert_eq!(stripped.nonce, overrides.nonce);
        assert_eq!(stripped.value, overrides.value);
    }

    #[test]
    fn polling_follows_client_config() {
        let config = ClientConfig {
            l1_rpc_url: "http://localhost:8545".into(),
            l2_rpc_url: "http://localhost:3050".into(),
            polling_interval_ms: 250,
            commit_timeout_sec: None,
            finalize_timeout_sec: Some(10),
            log_directory: None,
        };
        let polling = PollingConfig::from(&config);
        assert_eq!(polling.interval, Duration::from_millis(250));
        assert_eq!(polling.commit_timeout, None);
        assert_eq!(polling.finalize_timeout, Some(Duration::from_secs(10)));
    }
}

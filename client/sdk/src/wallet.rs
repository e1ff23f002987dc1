use tokio::sync::RwLock;
use zkl2_config::ClientConfig;
use zkl2_logs::{debug, info};
use zkl2_types::{
    api::{BlockNumber, BridgeAddresses},
    Address, Bytes, CallRequest, Nonce, TransactionRequest, H256, U256,
};
use zkl2_web3_decl::{
    jsonrpsee::http_client::{HttpClient, HttpClientBuilder},
    namespaces::{EthNamespaceClient, ZksNamespaceClient},
};

use crate::{
    errors::ClientError,
    operation::{
        deposit::{L1Call, L1FeeParams},
        execute_contract::ExecuteContractBuilder,
        priority_op::PriorityOpHandle,
        Overrides, PollingConfig, SyncTransactionHandle,
    },
    signer::Signer,
    utils::scale_gas_limit,
    EthereumSigner,
};

/// Addresses of the protocol contracts, as reported by the L2 node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAddresses {
    pub main_contract: Address,
    pub bridges: BridgeAddresses,
}

/// Account holding funds on both layers. The same key signs transactions on L1 and L2.
#[derive(Debug)]
pub struct Wallet<S: EthereumSigner, P> {
    pub l1: P,
    pub l2: P,
    pub signer: Signer<S>,
    polling: PollingConfig,
    addresses: RwLock<Option<ContractAddresses>>,
}

impl<S> Wallet<S, HttpClient>
where
    S: EthereumSigner,
{
    pub fn with_http_clients(
        config: &ClientConfig,
        signer: Signer<S>,
    ) -> Result<Wallet<S, HttpClient>, ClientError> {
        let l1 = HttpClientBuilder::default().build(&config.l1_rpc_url)?;
        let l2 = HttpClientBuilder::default().build(&config.l2_rpc_url)?;

        Ok(Wallet::new(l1, l2, signer).with_polling(PollingConfig::from(config)))
    }
}

impl<S, P> Wallet<S, P>
where
    S: EthereumSigner,
    P: EthNamespaceClient + ZksNamespaceClient + Clone + Sync,
{
    pub fn new(l1: P, l2: P, signer: Signer<S>) -> Self {
        Self {
            l1,
            l2,
            signer,
            polling: PollingConfig::default(),
            addresses: RwLock::new(None),
        }
    }

    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    pub fn address(&self) -> Address {
        self.signer.address
    }

    pub fn polling(&self) -> PollingConfig {
        self.polling
    }

    /// Protocol contract addresses, fetched once and cached afterwards.
    pub async fn contract_addresses(&self) -> Result<ContractAddresses, ClientError> {
        let cached = self.addresses.read().await.clone();
        if let Some(addresses) = cached {
            return Ok(addresses);
        }

        let addresses = ContractAddresses {
            main_contract: self.l2.get_main_contract().await?,
            bridges: self.l2.get_bridge_contracts().await?,
        };
        debug!("Fetched protocol contract addresses: {:?}", addresses);
        *self.addresses.write().await = Some(addresses.clone());
        Ok(addresses)
    }

    pub async fn get_nonce(&self) -> Result<Nonce, ClientError> {
        let nonce = self
            .l2
            .get_transaction_count(self.address(), BlockNumber::Committed)
            .await?;
        u32::try_from(nonce)
            .map(Nonce)
            .map_err(|_| ClientError::MalformedResponse(format!("nonce {nonce} is too big")))
    }

    pub fn start_execute_contract(&self) -> ExecuteContractBuilder<'_, S, P> {
        ExecuteContractBuilder::new(self)
    }

    /// Signs and submits an L2 transaction.
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<SyncTransactionHandle<P>, ClientError> {
        let bytes = self.signer.sign_transaction(&tx).await?;
        let tx_hash = self.l2.send_raw_transaction(Bytes(bytes)).await?;
        info!("Sent L2 transaction {:?} to {:?}", tx_hash, tx.to);

        Ok(SyncTransactionHandle::new(tx_hash, self.l2.clone(), self.polling))
    }

    pub fn priority_op_handle(
        &self,
        l1_tx_hash: H256,
        main_contract: Address,
    ) -> PriorityOpHandle<P> {
        PriorityOpHandle::new(
            l1_tx_hash,
            self.l1.clone(),
            self.l2.clone(),
            main_contract,
            self.polling,
        )
    }

    /// Fees of an L1 transaction: the caller's ones if set, the node's suggestion otherwise.
    pub(crate) async fn l1_fee_params(
        &self,
        overrides: &Overrides,
    ) -> Result<L1FeeParams, ClientError> {
        if let Some(fees) = L1FeeParams::from_overrides(overrides) {
            return Ok(fees);
        }
        let base_fee = self
            .l1
            .get_block_by_number(BlockNumber::Latest, false)
            .await?
            .and_then(|block| block.base_fee_per_gas);
        let fees = match base_fee {
            Some(_) => {
                let max_priority_fee = self.l1.max_priority_fee_per_gas().await?;
                L1FeeParams::from_fee_data(base_fee, max_priority_fee, U256::zero())
            }
            None => L1FeeParams::from_fee_data(None, U256::zero(), self.l1.gas_price().await?),
        };
        debug!("Suggested L1 fees: {:?}", fees);
        Ok(fees)
    }

    /// Unsigned L1 transaction executing `call`. Without an explicit gas limit the estimation
    /// is used, optionally scaled up.
    pub(crate) async fn populate_l1_transaction(
        &self,
        call: &L1Call,
        overrides: &Overrides,
        fees: &L1FeeParams,
        scale_estimation: bool,
    ) -> Result<TransactionRequest, ClientError> {
        let from = self.address();
        let nonce = match overrides.nonce {
            Some(nonce) => nonce,
            None => {
                self.l1
                    .get_transaction_count(from, BlockNumber::Pending)
                    .await?
            }
        };
        let chain_id = self.l1.chain_id().await?;

        let mut tx = TransactionRequest {
            nonce,
            from: Some(from),
            to: Some(call.to),
            value: call.value,
            input: Bytes(call.calldata.clone()),
            chain_id: Some(chain_id.as_u64()),
            ..Default::default()
        };
        fees.apply(&mut tx);

        tx.gas = match overrides.gas_limit {
            Some(gas_limit) => gas_limit,
            None => {
                let estimation = self.estimate_l1_gas(call).await?;
                if scale_estimation {
                    scale_gas_limit(estimation)
                } else {
                    estimation
                }
            }
        };
        Ok(tx)
    }

    pub(crate) async fn estimate_l1_gas(&self, call: &L1Call) -> Result<U256, ClientError> {
        let request = CallRequest::builder()
            .from(self.address())
            .to(call.to)
            .value(call.value)
            .data(Bytes(call.calldata.clone()))
            .build();
        Ok(self.l1.estimate_gas(request).await?)
    }

    pub(crate) async fn send_l1_transaction(
        &self,
        tx: &TransactionRequest,
    ) -> Result<H256, ClientError> {
        let bytes = self.signer.sign_transaction(tx).await?;
        let tx_hash = self.l1.send_raw_transaction(Bytes(bytes)).await?;
        info!(
            "Sent L1 transaction {:?} to {:?} with nonce {}",
            tx_hash, tx.to, tx.nonce
        );
        Ok(tx_hash)
    }

    /// Populates, signs and submits an L1 transaction in one go.
    pub(crate) async fn execute_l1_call(
        &self,
        call: &L1Call,
        overrides: &Overrides,
    ) -> Result<H256, ClientError> {
        let fees = self.l1_fee_params(overrides).await?;
        let tx = self
            .populate_l1_transaction(call, overrides, &fees, false)
            .await?;
        self.send_l1_transaction(&tx).await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use zkl2_types::{L2ChainId, U64};

    use super::*;
    use crate::{
        operation::{deposit::DepositRequest, withdrawal::WithdrawRequest},
        private_key_signer::PrivateKeySigner,
        L1Ops, L2Ops,
    };

    fn local_wallet() -> Wallet<PrivateKeySigner, HttpClient> {
        let eth_signer = PrivateKeySigner::new(
            H256::from_str("0x7726827caac94a7f9e1b160f7ea819f172f7b6f9d2a97f992c38edeab82d4110")
                .unwrap(),
        )
        .unwrap();
        let signer = Signer::new(eth_signer.clone(), eth_signer.address(), L2ChainId(270));
        let config = ClientConfig {
            l1_rpc_url: "http://localhost:8545".into(),
            l2_rpc_url: "http://localhost:3050".into(),
            polling_interval_ms: 100,
            commit_timeout_sec: Some(120),
            finalize_timeout_sec: Some(600),
            log_directory: None,
        };
        Wallet::with_http_clients(&config, signer).unwrap()
    }

    #[tokio::test]
    #[ignore = "needs local L1 and L2 nodes"]
    async fn deposit_and_withdraw_eth() {
        let wallet = local_wallet();
        let amount = U256::from(10).pow(15.into());

        let fee = wallet
            .full_required_deposit_fee(DepositRequest::new(Address::zero(), amount))
            .await
            .unwrap();
        assert!(!fee.base_cost.is_zero());

        let deposit = wallet
            .deposit(DepositRequest::new(Address::zero(), amount))
            .await
            .unwrap();
        let receipt = deposit.wait().await.unwrap();
        assert_eq!(receipt.status, Some(U64::one()));

        let withdrawal = wallet
            .withdraw(WithdrawRequest {
                token: Address::zero(),
                amount,
                ..Default::default()
            })
            .await
            .unwrap();
        let receipt = withdrawal.wait_finalize().await.unwrap();
        assert!(!wallet
            .is_withdrawal_finalized(receipt.transaction_hash, 0)
            .await
            .unwrap());

        let params = wallet
            .finalize_withdrawal_params(receipt.transaction_hash, 0)
            .await
            .unwrap();
        assert_eq!(params.sender, zkl2_config::constants::L2_ETH_TOKEN_ADDRESS);
        let finalize_hash = wallet
            .finalize_withdrawal(params, Overrides::default())
            .await
            .unwrap();
        assert_ne!(finalize_hash, H256::zero());
    }

    #[tokio::test]
    #[ignore = "needs a local L2 node"]
    async fn contract_addresses_are_cached() {
        let wallet = local_wallet();
        let first = wallet.contract_addresses().await.unwrap();
        let second = wallet.contract_addresses().await.unwrap();
        assert_eq!(first, second);
        assert_ne!(first.main_contract, Address::zero());
    }
}

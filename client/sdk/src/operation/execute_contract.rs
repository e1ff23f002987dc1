use zkl2_types::{Address, CallRequest, Nonce, PaymasterParams, TransactionRequest, U256};
use zkl2_web3_decl::namespaces::{EthNamespaceClient, ZksNamespaceClient};

use super::SyncTransactionHandle;
use crate::{errors::ClientError, signer::L2TransactionFields, wallet::Wallet, EthereumSigner};

pub struct ExecuteContractBuilder<'a, S: EthereumSigner, P> {
    wallet: &'a Wallet<S, P>,
    contract_address: Option<Address>,
    calldata: Option<Vec<u8>>,
    value: Option<U256>,
    nonce: Option<Nonce>,
    gas_limit: Option<U256>,
    max_fee_per_gas: Option<U256>,
    factory_deps: Option<Vec<Vec<u8>>>,
    paymaster_params: Option<PaymasterParams>,
}

impl<'a, S, P> ExecuteContractBuilder<'a, S, P>
where
    S: EthereumSigner,
    P: EthNamespaceClient + ZksNamespaceClient + Clone + Sync,
{
    pub fn new(wallet: &'a Wallet<S, P>) -> Self {
        Self {
            wallet,
            contract_address: None,
            calldata: None,
            value: None,
            nonce: None,
            gas_limit: None,
            max_fee_per_gas: None,
            factory_deps: None,
            paymaster_params: None,
        }
    }

    /// Unsigned transaction with every unset field filled from the L2 node.
    pub async fn tx(self) -> Result<TransactionRequest, ClientError> {
        let contract = self
            .contract_address
            .ok_or_else(|| ClientError::MissingRequiredField("contract_address".into()))?;
        let calldata = self
            .calldata
            .ok_or_else(|| ClientError::MissingRequiredField("calldata".into()))?;

        let nonce = match self.nonce {
            Some(nonce) => nonce,
            None => self.wallet.get_nonce().await?,
        };
        let max_fee_per_gas = match self.max_fee_per_gas {
            Some(fee) => fee,
            None => self.wallet.l2.gas_price().await?,
        };

        let mut tx = self.wallet.signer.l2_transaction(L2TransactionFields {
            contract,
            calldata,
            value: self.value.unwrap_or_default(),
            nonce,
            gas_limit: self.gas_limit.unwrap_or_default(),
            max_fee_per_gas,
            max_priority_fee_per_gas: U256::zero(),
            gas_per_pubdata: None,
            factory_deps: self.factory_deps,
            paymaster_params: self.paymaster_params,
        });
        if self.gas_limit.is_none() {
            tx.gas = self
                .wallet
                .l2
                .estimate_gas(CallRequest::from(&tx))
                .await?;
        }
        Ok(tx)
    }

    pub async fn send(self) -> Result<SyncTransactionHandle<P>, ClientError> {
        let wallet = self.wallet;
        let tx = self.tx().await?;
        wallet.send_transaction(tx).await
    }

    pub fn contract_address(mut self, address: Address) -> Self {
        self.contract_address = Some(address);
        self
    }

    pub fn calldata(mut self, calldata: Vec<u8>) -> Self {
        self.calldata = Some(calldata);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn gas_limit(mut self, gas_limit: U256) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn max_fee_per_gas(mut self, max_fee_per_gas: U256) -> Self {
        self.max_fee_per_gas = Some(max_fee_per_gas);
        self
    }

    pub fn factory_deps(mut self, factory_deps: Vec<Vec<u8>>) -> Self {
        self.factory_deps = Some(factory_deps);
        self
    }

    pub fn paymaster_params(mut self, paymaster_params: PaymasterParams) -> Self {
        self.paymaster_params = Some(paymaster_params);
        self
    }
}

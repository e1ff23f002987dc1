use zkl2_config::constants::EIP_712_TX_TYPE;
use zkl2_types::{
    Address, Bytes, Eip712Meta, L2ChainId, Nonce, PaymasterParams, TransactionRequest, U256,
};

use crate::{errors::SignerError, EthereumSigner};

/// Account of the wallet together with the chain its rollup transactions are signed for.
#[derive(Debug)]
pub struct Signer<S> {
    pub(crate) eth_signer: S,
    pub(crate) address: Address,
    pub(crate) chain_id: L2ChainId,
}

/// Fields of a rollup transaction that vary between calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct L2TransactionFields {
    pub contract: Address,
    pub calldata: Vec<u8>,
    pub value: U256,
    pub nonce: Nonce,
    pub gas_limit: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub gas_per_pubdata: Option<U256>,
    pub factory_deps: Option<Vec<Vec<u8>>>,
    pub paymaster_params: Option<PaymasterParams>,
}

impl<S: EthereumSigner> Signer<S> {
    pub fn new(eth_signer: S, address: Address, chain_id: L2ChainId) -> Self {
        Self {
            eth_signer,
            address,
            chain_id,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> L2ChainId {
        self.chain_id
    }

    /// Unsigned EIP-712 transaction sent from this account.
    pub fn l2_transaction(&self, fields: L2TransactionFields) -> TransactionRequest {
        let mut meta = Eip712Meta {
            factory_deps: fields.factory_deps,
            paymaster_params: fields.paymaster_params,
            ..Default::default()
        };
        if let Some(gas_per_pubdata) = fields.gas_per_pubdata {
            meta.gas_per_pubdata = gas_per_pubdata;
        }

        TransactionRequest {
            nonce: fields.nonce.0.into(),
            from: Some(self.address),
            to: Some(fields.contract),
            value: fields.value,
            gas: fields.gas_limit,
            max_fee_per_gas: Some(fields.max_fee_per_gas),
            max_priority_fee_per_gas: Some(fields.max_priority_fee_per_gas),
            input: Bytes(fields.calldata),
            transaction_type: Some(EIP_712_TX_TYPE.into()),
            eip712_meta: Some(meta),
            chain_id: Some(self.chain_id.0),
            ..Default::default()
        }
    }

    pub async fn sign_transaction(&self, tx: &TransactionRequest) -> Result<Vec<u8>, SignerError> {
        self.eth_signer.sign_transaction(tx).await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use zkl2_types::H256;

    use super::*;
    use crate::PrivateKeySigner;

    #[tokio::test]
    async fn l2_transaction_is_signed_for_the_configured_chain() {
        let eth_signer = PrivateKeySigner::new(
            H256::from_str("0x7726827caac94a7f9e1b160f7ea819f172f7b6f9d2a97f992c38edeab82d4110")
                .unwrap(),
        )
        .unwrap();
        let signer = Signer::new(eth_signer.clone(), eth_signer.address(), L2ChainId(270));

        let tx = signer.l2_transaction(L2TransactionFields {
            contract: Address::repeat_byte(0x05),
            calldata: vec![0xde, 0xad],
            nonce: Nonce(4),
            gas_limit: U256::from(1_000_000),
            max_fee_per_gas: U256::from(250_000_000),
            ..Default::default()
        });
        assert!(tx.is_eip712_tx());
        assert_eq!(tx.chain_id, Some(270));
        assert_eq!(tx.from, Some(eth_signer.address()));
        assert_eq!(
            tx.eip712_meta.as_ref().unwrap().gas_per_pubdata,
            Eip712Meta::default().gas_per_pubdata
        );

        let bytes = signer.sign_transaction(&tx).await.unwrap();
        let (decoded, _) = TransactionRequest::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.nonce, U256::from(4));
        assert_eq!(decoded.to, Some(Address::repeat_byte(0x05)));
    }
}

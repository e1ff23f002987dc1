use zkl2_types::tx::primitives::{EIP712TypedStructure, Eip712Domain, PackedEthSignature};
use zkl2_types::{Address, TransactionRequest, H256};

use crate::{errors::SignerError, EthereumSigner};

fn signing_failed_error(err: impl ToString) -> SignerError {
    SignerError::SigningFailed(err.to_string())
}

#[derive(Clone)]
pub struct PrivateKeySigner {
    private_key: H256,
    address: Address,
}

impl std::fmt::Debug for PrivateKeySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKeySigner({:?})", self.address)
    }
}

impl PrivateKeySigner {
    pub fn new(private_key: H256) -> Result<Self, SignerError> {
        let address = PackedEthSignature::address_from_private_key(&private_key)
            .map_err(|err| SignerError::InvalidPrivateKey(err.to_string()))?;
        Ok(Self {
            private_key,
            address,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait::async_trait]
impl EthereumSigner for PrivateKeySigner {
    async fn sign_message(&self, message: &[u8]) -> Result<PackedEthSignature, SignerError> {
        PackedEthSignature::sign(&self.private_key, message).map_err(signing_failed_error)
    }

    async fn sign_typed_data<S: EIP712TypedStructure + Sync>(
        &self,
        domain: &Eip712Domain,
        typed_struct: &S,
    ) -> Result<PackedEthSignature, SignerError> {
        PackedEthSignature::sign_typed_data(&self.private_key, domain, typed_struct)
            .map_err(signing_failed_error)
    }

    async fn sign_transaction(&self, tx: &TransactionRequest) -> Result<Vec<u8>, SignerError> {
        let digest = tx.get_signed_digest().map_err(signing_failed_error)?;
        let signature =
            PackedEthSignature::sign_raw(&self.private_key, &digest).map_err(signing_failed_error)?;
        tx.get_signed_bytes(Some(&signature))
            .map_err(signing_failed_error)
    }

    async fn get_address(&self) -> Result<Address, SignerError> {
        Ok(self.address)
    }
}

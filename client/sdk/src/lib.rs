//! Client of the rollup: signs L2 transactions, submits priority operations to L1 and follows
//! deposits and withdrawals through their whole lifecycle.

use async_trait::async_trait;
use errors::SignerError;
use zkl2_types::tx::primitives::{EIP712TypedStructure, Eip712Domain};
use zkl2_types::{Address, PackedEthSignature, TransactionRequest};

pub use zkl2_types as types;
pub use zkl2_web3_decl as web3;

pub mod errors;
pub mod operation;
pub mod ops;
pub mod private_key_signer;
pub mod signer;
pub mod utils;
pub mod wallet;

#[cfg(test)]
mod testonly;

pub use ops::{L1Ops, L2Ops};
pub use private_key_signer::PrivateKeySigner;
pub use wallet::Wallet;

#[async_trait]
pub trait EthereumSigner: Send + Sync + Clone {
    async fn sign_message(&self, message: &[u8]) -> Result<PackedEthSignature, SignerError>;
    async fn sign_typed_data<S: EIP712TypedStructure + Sync>(
        &self,
        domain: &Eip712Domain,
        typed_struct: &S,
    ) -> Result<PackedEthSignature, SignerError>;
    /// Signs the transaction and returns its wire encoding, ready for `eth_sendRawTransaction`.
    async fn sign_transaction(&self, tx: &TransactionRequest) -> Result<Vec<u8>, SignerError>;
    async fn get_address(&self) -> Result<Address, SignerError>;
}

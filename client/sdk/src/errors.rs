use std::time::Duration;

pub use zkl2_web3_decl::RpcError;
use thiserror::Error;
use zkl2_types::{SerializationTransactionError, H256, U256};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Missing required field for a transaction: {0}")]
    MissingRequiredField(String),
    #[error("Signing error: {0}")]
    SigningError(#[from] SignerError),
    #[error("RPC error: {0:?}")]
    RpcError(#[from] RpcError),
    #[error("ABI error: {0}")]
    AbiError(#[from] ethabi::Error),
    #[error("Transaction serialization failed: {0}")]
    SerializationError(#[from] SerializationTransactionError),
    #[error("Malformed node response: {0}")]
    MalformedResponse(String),
    #[error("Transaction {0:?} not found")]
    TransactionNotFound(H256),
    #[error("Log proof not found")]
    ProofNotFound,
    #[error("Receipt contains no NewPriorityRequest log of the main contract")]
    PriorityOpLogNotFound,
    #[error("Withdrawal log with index {0} not found")]
    WithdrawalLogNotFound(usize),
    #[error("The base cost of performing the priority operation is higher than the provided value parameter for the transaction: baseCost: {base_cost}, provided value: {value}")]
    InsufficientValue { base_cost: U256, value: U256 },
    #[error("Not enough balance for deposit. Under the provided gas price, the recommended balance to perform a deposit is {recommended} ETH")]
    InsufficientBalance { recommended: String },
    #[error("Not enough allowance to cover the deposit: allowance {allowance}, required {required}")]
    InsufficientAllowance { allowance: U256, required: U256 },
    #[error("Cannot claim successful deposit")]
    NotAClaimableDeposit,
    #[error("Operation timed out after {0:?}")]
    OperationTimeout(Duration),
}

mod alias;
mod decode_tx;
mod deployed_contracts;
mod hash_bytecode;
mod tx_status;
mod withdrawal;

pub use alias::Alias;
pub use decode_tx::DecodeTx;
pub use deployed_contracts::DeployedContracts;
pub use hash_bytecode::HashBytecode;
pub use tx_status::TxStatus;
pub use withdrawal::{IsFinalized, WithdrawalParams};

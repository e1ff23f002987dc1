//! Protocol data types of the rollup client: the transaction codec, RPC response types and
//! decoders of the events the bridging protocol relies on.

pub use zkl2_basic_types::*;

pub mod api;
pub mod events;
pub mod fee;
pub mod l1;
pub mod l2_to_l1_log;
pub mod paymaster;
#[cfg(any(test, feature = "testonly"))]
pub mod testonly;
pub mod transaction_request;
pub mod tx;
pub mod withdrawal;

pub use transaction_request::{
    CallRequest, Eip712Meta, PaymasterParams, SerializationTransactionError, TransactionRequest,
};
pub use tx::primitives::PackedEthSignature;

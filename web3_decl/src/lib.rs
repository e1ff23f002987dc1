//! Typed declarations of the JSON-RPC methods the client calls.
//!
//! The `eth` namespace is served by both layers, the `zks` namespace only by the rollup.

pub use jsonrpsee;

pub mod namespaces;

#[cfg(feature = "client")]
pub use namespaces::RpcError;

#[cfg(feature = "client")]
pub use jsonrpsee::core::ClientError as RpcError;

pub mod eth;
pub mod zks;

#[cfg(feature = "client")]
pub use self::{eth::EthNamespaceClient, zks::ZksNamespaceClient};
#[cfg(feature = "server")]
pub use self::{eth::EthNamespaceServer, zks::ZksNamespaceServer};

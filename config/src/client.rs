use std::time::Duration;

use serde::Deserialize;

use crate::{envy_load, envy_try_load, load_config};

/// Settings of the wallet SDK and the CLI built on top of it.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the settlement layer node.
    pub l1_rpc_url: String,
    /// JSON-RPC endpoint of the rollup node.
    pub l2_rpc_url: String,
    /// Delay between two consecutive status queries while waiting for a transaction.
    pub polling_interval_ms: u64,
    /// Upper bound for waiting until a transaction gets a receipt. Unbounded if not set.
    pub commit_timeout_sec: Option<u64>,
    /// Upper bound for waiting until a transaction is finalized. Unbounded if not set.
    pub finalize_timeout_sec: Option<u64>,
    /// Where to put log files; logs go to stdout if not set.
    pub log_directory: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        envy_load("client", "ZKL2_CLIENT_")
    }

    pub fn try_from_env() -> Result<Self, envy::Error> {
        envy_try_load("ZKL2_CLIENT_")
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    pub fn commit_timeout(&self) -> Option<Duration> {
        self.commit_timeout_sec.map(Duration::from_secs)
    }

    pub fn finalize_timeout(&self) -> Option<Duration> {
        self.finalize_timeout_sec.map(Duration::from_secs)
    }
}

pub fn load_client_config() -> Result<ClientConfig, config::ConfigError> {
    load_config("configuration/client", "ZKL2_CLIENT")
}

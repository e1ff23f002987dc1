use std::path::{Path, PathBuf};

use environment::Environment;
use serde::de::DeserializeOwned;

pub mod client;
pub mod constants;
pub mod environment;

pub use client::{load_client_config, ClientConfig};

pub fn envy_load<T: DeserializeOwned>(name: &str, prefix: &str) -> T {
    envy_try_load(prefix).unwrap_or_else(|err| {
        panic!("Cannot load config <{}>: {}: {}", name, prefix, err);
    })
}

pub fn envy_try_load<T: DeserializeOwned>(prefix: &str) -> Result<T, envy::Error> {
    envy::prefixed(prefix).from_env()
}

pub fn load_config<P: AsRef<Path>, T: DeserializeOwned>(
    path: P,
    prefix: &str,
) -> Result<T, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let configuration_directory = base_path.join(path);
    // Read the "default" configuration file
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;
    // Detect the running environment, `local` if unspecified.
    let environment: Environment = std::env::var("ZKL2_APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    // Layer on the environment-specific values.
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;
    // E.g. `ZKL2_CLIENT_POLLING_INTERVAL_MS=250` sets `polling_interval_ms`.
    settings.merge(config::Environment::with_prefix(prefix).separator("__"))?;
    settings.try_into()
}

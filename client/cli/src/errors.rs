use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid hex value `{0}`")]
    InvalidHex(String),
    #[error("Invalid address `{0}`")]
    InvalidAddress(String),
    #[error("Invalid hash `{0}`")]
    InvalidHash(String),
    #[error("No client configuration found: {0}")]
    MissingConfig(String),
}

pub mod client;
pub mod config;
pub mod oracle;
pub mod types;

use thiserror::Error;

/// Every failure the reader can hit. None of them are recovered from; the
/// binary logs the error and exits with [`OracleError::exit_code`].
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("invalid contract address: {0}")]
    AddressFormat(String),
    #[error("remote call failed: {0}")]
    RemoteCall(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl OracleError {
    pub fn exit_code(&self) -> u8 {
        match self {
            OracleError::Configuration(_) => 2,
            OracleError::Connection(_) => 3,
            OracleError::AddressFormat(_) => 4,
            OracleError::RemoteCall(_) => 5,
            OracleError::Decode(_) => 6,
        }
    }
}

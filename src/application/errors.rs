//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Escrow API error: {0}")]
    Api(#[from] ApiError),

    #[error("Payment code error: {0}")]
    Qr(#[from] QrError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Escrow API client errors - one variant per failure mode the state
/// machine branches on
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Payment code rendering errors
#[derive(Error, Debug)]
pub enum QrError {
    #[error("empty payload")]
    EmptyPayload,

    #[error("encoding failed: {0}")]
    Encode(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

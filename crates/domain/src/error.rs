/// Shared error type used across all Delilah crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("{endpoint} returned {status}")]
    Status { endpoint: String, status: u16 },

    #[error("provider {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("memory store {store}: {message}")]
    Memory { store: String, message: String },

    #[error("config: {0}")]
    Config(String),

    #[error("utterance must not be empty")]
    EmptyUtterance,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

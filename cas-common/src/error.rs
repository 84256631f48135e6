use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CasError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Http(#[from] Arc<reqwest::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Config File Error in {0}: {1}")]
    Toml(String, String),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Validation Error: {0}")]
    Validation(String),
}

impl CasError {
    /// Status code of a non-success response, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CasError::HttpStatus { status, .. } => Some(*status),
            CasError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<std::io::Error> for CasError {
    fn from(err: std::io::Error) -> Self {
        CasError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for CasError {
    fn from(err: reqwest::Error) -> Self {
        CasError::Http(Arc::new(err))
    }
}

impl From<serde_json::Error> for CasError {
    fn from(err: serde_json::Error) -> Self {
        CasError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CasError>;

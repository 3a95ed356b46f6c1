use std::fmt;

use crate::domain::{ParameterMap, ParameterPath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    AccessDenied(String),
    QueryFailed(String),
    WriteFailed(String),
    InvalidPath(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessDenied(msg) => write!(f, "Access denied: {}", msg),
            Self::QueryFailed(msg) => write!(f, "Query failed: {}", msg),
            Self::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Read side of a hierarchical parameter store.
#[async_trait::async_trait]
pub trait ParameterSource: Send + Sync {
    /// Every parameter nested under `path`, decrypted, keyed by full name.
    async fn fetch(&self, path: &ParameterPath) -> Result<ParameterMap, StoreError>;
}

/// Write side, used to seed parameters from a JSON document.
#[async_trait::async_trait]
pub trait ParameterSink: Send + Sync {
    async fn put(&self, name: &str, value: &str) -> Result<(), StoreError>;
}

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tracing::debug;

use crate::domain::{ParameterMap, ParameterPath};
use crate::store::repository::{ParameterSink, ParameterSource, StoreError};

/// In-memory parameter store keyed by full parameter name.
#[derive(Clone, Default)]
pub struct LocalParameterStore {
    parameters: Arc<RwLock<IndexMap<String, String>>>,
    denied_paths: Arc<RwLock<HashSet<String>>>,
    fetch_log: Arc<RwLock<Vec<String>>>,
}

impl LocalParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters<K, V>(parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut stored) = store.parameters.write() {
            for (name, value) in parameters {
                stored.insert(name.into(), value.into());
            }
        }
        store
    }

    /// Makes every later fetch of `path` fail with `AccessDenied`.
    pub fn deny(&self, path: &str) {
        if let Ok(mut denied) = self.denied_paths.write() {
            denied.insert(path.to_string());
        }
    }

    /// Paths fetched so far, in call order.
    pub fn fetch_log(&self) -> Vec<String> {
        self.fetch_log
            .read()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.parameters
            .read()
            .ok()
            .and_then(|stored| stored.get(name).cloned())
    }

    fn lock_error<T>(_: T) -> StoreError {
        StoreError::QueryFailed("local parameter store lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl ParameterSource for LocalParameterStore {
    async fn fetch(&self, path: &ParameterPath) -> Result<ParameterMap, StoreError> {
        self.fetch_log
            .write()
            .map_err(Self::lock_error)?
            .push(path.as_str().to_string());

        if self
            .denied_paths
            .read()
            .map_err(Self::lock_error)?
            .contains(path.as_str())
        {
            return Err(StoreError::AccessDenied(format!(
                "not authorized to read '{}'",
                path
            )));
        }

        let stored = self.parameters.read().map_err(Self::lock_error)?;
        let found: ParameterMap = stored
            .iter()
            .filter(|(name, _)| path.relative_name(name).is_some())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        debug!(path = path.as_str(), count = found.len(), "Fetched from local store");
        Ok(found)
    }
}

#[async_trait::async_trait]
impl ParameterSink for LocalParameterStore {
    async fn put(&self, name: &str, value: &str) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidPath(
                "parameter name must not be empty".to_string(),
            ));
        }
        self.parameters
            .write()
            .map_err(Self::lock_error)?
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

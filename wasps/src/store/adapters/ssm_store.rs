use aws_sdk_ssm::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata},
    types::ParameterType,
};
use aws_types::SdkConfig;
use tracing::debug;

use crate::{
    domain::{ParameterMap, ParameterPath},
    store::repository::{ParameterSink, ParameterSource, StoreError},
};

const ACCESS_DENIED_CODES: [&str; 2] = ["AccessDeniedException", "UnrecognizedClientException"];
const INVALID_PATH_CODES: [&str; 2] = ["ValidationException", "InvalidFilterValue"];

#[derive(Clone)]
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub fn new(config: &SdkConfig, endpoint_url: Option<&str>) -> Self {
        let mut builder = aws_sdk_ssm::config::Builder::from(config);
        if let Some(endpoint_url) = endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        Self::with_client(Client::from_conf(builder.build()))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for SsmParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmParameterStore")
            .field("region", &self.client.config().region())
            .finish()
    }
}

fn classify<E>(
    err: &aws_sdk_ssm::error::SdkError<E>,
    fallback: fn(String) -> StoreError,
) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = DisplayErrorContext(err).to_string();
    match err.as_service_error().and_then(|e| e.code()) {
        Some(code) if ACCESS_DENIED_CODES.contains(&code) => StoreError::AccessDenied(message),
        Some(code) if INVALID_PATH_CODES.contains(&code) => StoreError::InvalidPath(message),
        _ => fallback(message),
    }
}

#[async_trait::async_trait]
impl ParameterSource for SsmParameterStore {
    async fn fetch(&self, path: &ParameterPath) -> Result<ParameterMap, StoreError> {
        debug!(path = path.as_str(), "Querying parameters by path in SSM");

        let mut pages = self
            .client
            .get_parameters_by_path()
            .path(path.as_str())
            .recursive(true)
            .with_decryption(true)
            .into_paginator()
            .send();

        let mut found = ParameterMap::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| classify(&err, StoreError::QueryFailed))?;
            for parameter in page.parameters() {
                if let (Some(name), Some(value)) = (parameter.name(), parameter.value()) {
                    found.insert(name, value);
                }
            }
        }

        debug!(path = path.as_str(), count = found.len(), "Fetched from SSM");
        Ok(found)
    }
}

#[async_trait::async_trait]
impl ParameterSink for SsmParameterStore {
    async fn put(&self, name: &str, value: &str) -> Result<(), StoreError> {
        debug!(name, "Putting parameter in SSM");

        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::String)
            .overwrite(true)
            .send()
            .await
            .map_err(|err| classify(&err, StoreError::WriteFailed))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::config::{BehaviorVersion, Credentials, Region, retry::RetryConfig};

    /// Client pointed at a closed local port, so every call fails to dispatch.
    fn unreachable_store() -> SsmParameterStore {
        let conf = aws_sdk_ssm::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .endpoint_url("http://127.0.0.1:1")
            .retry_config(RetryConfig::disabled())
            .build();
        SsmParameterStore::with_client(Client::from_conf(conf))
    }

    #[tokio::test]
    async fn test_fetch_dispatch_failure_is_query_failed() {
        let path = ParameterPath::parse("/dev/app").unwrap();
        let result = unreachable_store().fetch(&path).await;
        assert!(matches!(result, Err(StoreError::QueryFailed(_))));
    }

    #[tokio::test]
    async fn test_put_dispatch_failure_is_write_failed() {
        let result = unreachable_store().put("/dev/app/HOST", "a").await;
        assert!(matches!(result, Err(StoreError::WriteFailed(_))));
    }

    #[test]
    fn test_debug_shows_region_only() {
        let printed = format!("{:?}", unreachable_store());
        assert!(printed.contains("eu-west-1"));
        assert!(!printed.contains("secret"));
    }
}

use aws_config::BehaviorVersion;
use aws_credential_types::{Credentials, provider::ProvideCredentials};
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_types::{SdkConfig, region::Region};
use std::fmt;
use tracing::{debug, info};

use crate::error::WaspsError;

const CREDENTIALS_PROVIDER_NAME: &str = "wasps-cli";
const REDACTED: &str = "<redacted>";

#[derive(Clone, PartialEq, Eq)]
pub struct ExplicitCredentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
    pub region: String,
}

impl fmt::Debug for ExplicitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &REDACTED)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| REDACTED),
            )
            .field("region", &self.region)
            .finish()
    }
}

/// How the AWS session is authenticated. Selected once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStrategy {
    Explicit(ExplicitCredentials),
    Profile {
        name: String,
        region: Option<String>,
    },
    /// Environment, default profile, container or instance role.
    Ambient { region: Option<String> },
}

impl CredentialStrategy {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Explicit(_) => "explicit",
            Self::Profile { .. } => "profile",
            Self::Ambient { .. } => "ambient",
        }
    }
}

/// Builds an authenticated SDK configuration for `strategy`.
///
/// Fails before any remote call when no region resolves or the credential
/// chain yields nothing.
pub async fn resolve(strategy: &CredentialStrategy) -> Result<SdkConfig, WaspsError> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    match strategy {
        CredentialStrategy::Explicit(creds) => {
            loader = loader
                .credentials_provider(Credentials::new(
                    creds.access_key.clone(),
                    creds.secret_key.clone(),
                    creds.session_token.clone(),
                    None,
                    CREDENTIALS_PROVIDER_NAME,
                ))
                .region(Region::new(creds.region.clone()));
        }
        CredentialStrategy::Profile { name, region } => {
            loader = loader.profile_name(name);
            if let Some(region) = region.clone() {
                loader = loader.region(Region::new(region));
            }
        }
        CredentialStrategy::Ambient { region } => {
            if let Some(region) = region.clone() {
                loader = loader.region(Region::new(region));
            }
        }
    }

    let config = loader.load().await;

    let region = config
        .region()
        .map(|r| r.as_ref().to_string())
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| {
            WaspsError::Configuration(format!(
                "No AWS region resolved for {} credentials; pass --region",
                strategy.kind()
            ))
        })?;

    verify_credentials(&config).await?;

    info!(strategy = strategy.kind(), region = region.as_str(), "AWS session resolved");
    Ok(config)
}

async fn verify_credentials(config: &SdkConfig) -> Result<(), WaspsError> {
    let provider = config.credentials_provider().ok_or_else(|| {
        WaspsError::Authentication("No credentials provider configured".to_string())
    })?;

    let credentials = provider
        .provide_credentials()
        .await
        .map_err(|e| WaspsError::Authentication(DisplayErrorContext(&e).to_string()))?;

    debug!(access_key = credentials.access_key_id(), "Credentials loaded");
    Ok(())
}

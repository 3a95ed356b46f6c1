pub mod loaders;

pub use loaders::SeedSource;

use tracing::warn;

use crate::{
    cli::Args,
    credentials::{CredentialStrategy, ExplicitCredentials},
    domain::{KeyPolicy, ParameterPath},
    error::WaspsError,
    render::{OutputFormat, OutputTarget, RenderOptions},
};

/// Everything one invocation needs, validated once from the command line.
#[derive(Debug, Clone)]
pub struct WaspsConfig {
    pub credentials: CredentialStrategy,
    pub paths: Vec<ParameterPath>,
    pub key_policy: KeyPolicy,
    pub outputs: Vec<OutputTarget>,
    pub render_options: RenderOptions,
    pub suppress: bool,
    pub seed: Option<SeedSource>,
    pub endpoint_url: Option<String>,
    pub verbose: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn credential_strategy(args: &Args) -> Result<CredentialStrategy, WaspsError> {
    let region = non_blank(args.region.clone());

    if let Some(access_key) = non_blank(args.access_key.clone()) {
        let secret_key = non_blank(args.secret_key.clone()).ok_or_else(|| {
            WaspsError::Authentication("--secret-key is required with --access-key".to_string())
        })?;
        let region = region.ok_or_else(|| {
            WaspsError::Configuration("--region is required with --access-key".to_string())
        })?;
        if args.profile.is_some() {
            warn!("--profile is ignored when --access-key is given");
        }

        return Ok(CredentialStrategy::Explicit(ExplicitCredentials {
            access_key,
            secret_key,
            session_token: non_blank(args.session_token.clone()),
            region,
        }));
    }

    if args.secret_key.is_some() || args.session_token.is_some() {
        return Err(WaspsError::Authentication(
            "--secret-key and --session require --access-key".to_string(),
        ));
    }

    match non_blank(args.profile.clone()) {
        Some(name) => Ok(CredentialStrategy::Profile { name, region }),
        None => Ok(CredentialStrategy::Ambient { region }),
    }
}

fn output_targets(args: &Args) -> Vec<OutputTarget> {
    [
        (OutputFormat::Json, &args.json),
        (OutputFormat::Ini, &args.ini),
        (OutputFormat::Properties, &args.properties),
    ]
    .into_iter()
    .filter_map(|(format, path)| {
        path.clone().map(|path| OutputTarget { format, path })
    })
    .collect()
}

impl TryFrom<Args> for WaspsConfig {
    type Error = WaspsError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let credentials = credential_strategy(&args)?;

        let paths = args
            .parameter_path
            .iter()
            .map(|p| ParameterPath::parse(p.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let seed = match (args.config.clone(), args.config_json.clone()) {
            (Some(path), _) => Some(SeedSource::File(path)),
            (None, Some(json)) => Some(SeedSource::Inline(json)),
            (None, None) => None,
        };

        if paths.is_empty() && seed.is_none() {
            return Err(WaspsError::Configuration(
                "Nothing to do: pass --parameter-path and/or --config/--config-json".to_string(),
            ));
        }

        let outputs = output_targets(&args);
        if paths.is_empty() && !outputs.is_empty() {
            return Err(WaspsError::Configuration(
                "Output files need at least one --parameter-path".to_string(),
            ));
        }
        if args.nested && args.json.is_none() {
            warn!("--nested only affects --json output");
        }

        Ok(Self {
            credentials,
            paths,
            key_policy: args.key_policy,
            outputs,
            render_options: RenderOptions {
                nested_json: args.nested,
                ini_section: non_blank(args.ini_section),
            },
            suppress: args.suppress,
            seed,
            endpoint_url: non_blank(args.endpoint_url),
            verbose: args.verbose,
        })
    }
}

use std::io::Write;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    configs::WaspsConfig,
    credentials,
    domain::ParameterMap,
    error::WaspsError,
    merge::merge_parameters,
    render::{print_parameters, write_outputs},
    seed::{load_seed, write_parameters},
    store::{ParameterSink, ParameterSource, SsmParameterStore},
};

const DEFAULT_LOG_FILTER: &str = "wasps=info,warn";
const VERBOSE_LOG_FILTER: &str = "wasps=debug,info";

/// Logs go to stderr so stdout only ever carries parameter output.
pub fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        // reads RUST_LOG
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();
}

/// Resolves an AWS session and runs the pipeline against Parameter Store.
pub async fn run<W: Write>(config: WaspsConfig, out: &mut W) -> Result<(), WaspsError> {
    debug!("CONFIGS: {:?}", &config);

    let sdk_config = credentials::resolve(&config.credentials).await?;
    let store = SsmParameterStore::new(&sdk_config, config.endpoint_url.as_deref());

    execute(&config, &store, &store, out).await.map(|_| ())
}

/// Seeds, merges, renders and prints, in that order.
///
/// Returns the merged map, or `None` when the invocation only seeded.
pub async fn execute<W: Write>(
    config: &WaspsConfig,
    source: &dyn ParameterSource,
    sink: &dyn ParameterSink,
    out: &mut W,
) -> Result<Option<ParameterMap>, WaspsError> {
    if let Some(seed) = &config.seed {
        let parameters = load_seed(seed)?;
        write_parameters(sink, &parameters).await?;
    }

    if config.paths.is_empty() {
        return Ok(None);
    }

    let merged = merge_parameters(source, &config.paths, config.key_policy).await?;
    info!(
        paths = config.paths.len(),
        count = merged.len(),
        policy = %config.key_policy,
        "Merged parameters"
    );

    write_outputs(&merged, &config.outputs, &config.render_options)?;
    print_parameters(out, &merged, config.suppress)?;

    Ok(Some(merged))
}

use tracing::{debug, info};

use crate::{
    domain::{KeyPolicy, ParameterMap, ParameterPath},
    error::WaspsError,
    store::ParameterSource,
};

/// Fetches every path in order and folds the results into one map.
///
/// Later paths overwrite earlier ones on key collision. A key keeps the
/// position where it was first inserted. Any fetch failure aborts the whole
/// merge.
pub async fn merge_parameters(
    source: &dyn ParameterSource,
    paths: &[ParameterPath],
    policy: KeyPolicy,
) -> Result<ParameterMap, WaspsError> {
    if paths.is_empty() {
        return Err(WaspsError::Configuration(
            "At least one parameter path is required".to_string(),
        ));
    }

    let mut merged = ParameterMap::new();
    for path in paths {
        let fetched = source
            .fetch(path)
            .await
            .map_err(|err| WaspsError::fetch(path.as_str(), err.to_string()))?;

        info!(path = path.as_str(), count = fetched.len(), "Fetched parameters");

        for (name, value) in fetched {
            let key = policy.key_for(path, &name);
            if merged.insert(key.as_str(), value).is_some() {
                debug!(
                    key = key.as_str(),
                    path = path.as_str(),
                    "Parameter overwritten by later path"
                );
            }
        }
    }

    Ok(merged)
}

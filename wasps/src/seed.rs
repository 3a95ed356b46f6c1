use serde_json::Value;
use tracing::info;

use crate::{
    configs::{SeedSource, loaders},
    domain::ParameterMap,
    error::WaspsError,
    store::ParameterSink,
};

/// Parses a seed document: a JSON object of parameter name to value.
///
/// Numbers and booleans are stored as their JSON text. Nested values and
/// nulls are rejected.
pub fn parse_seed(content: &str) -> Result<ParameterMap, WaspsError> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| WaspsError::Configuration(format!("Seed document is not valid JSON: {}", e)))?;

    let Value::Object(entries) = document else {
        return Err(WaspsError::Configuration(
            "Seed document must be a JSON object of name to value".to_string(),
        ));
    };

    let mut parameters = ParameterMap::new();
    for (name, value) in entries {
        if name.trim().is_empty() {
            return Err(WaspsError::Configuration(
                "Seed document contains an empty parameter name".to_string(),
            ));
        }
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(WaspsError::Configuration(format!(
                    "Seed value for '{}' must be a string, number or boolean, got {}",
                    name, other
                )));
            }
        };
        parameters.insert(name, value);
    }

    Ok(parameters)
}

pub fn load_seed(source: &SeedSource) -> Result<ParameterMap, WaspsError> {
    let content = loaders::load(source).map_err(WaspsError::Configuration)?;
    parse_seed(&content)
}

/// Writes every seed entry in document order, stopping at the first failure.
pub async fn write_parameters(
    sink: &dyn ParameterSink,
    parameters: &ParameterMap,
) -> Result<(), WaspsError> {
    for (name, value) in parameters.iter() {
        sink.put(name, value).await.map_err(|err| WaspsError::Write {
            name: name.to_string(),
            message: err.to_string(),
        })?;
    }

    info!(count = parameters.len(), "Wrote seed parameters to the store");
    Ok(())
}

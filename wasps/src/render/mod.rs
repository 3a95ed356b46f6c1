pub mod ini;
pub mod json;
pub mod properties;

use std::{
    fmt,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{domain::ParameterMap, error::WaspsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Ini,
    Properties,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Ini => write!(f, "ini"),
            Self::Properties => write!(f, "properties"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub nested_json: bool,
    pub ini_section: Option<String>,
}

pub fn render(
    parameters: &ParameterMap,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, WaspsError> {
    match format {
        OutputFormat::Json => json::render(parameters, options.nested_json),
        OutputFormat::Ini => ini::render(parameters, options.ini_section.as_deref()),
        OutputFormat::Properties => Ok(properties::render(parameters)),
    }
}

/// Renders every target in memory, then writes them one by one.
///
/// Nothing touches the filesystem unless all targets render. Each file is
/// replaced atomically, so a failed write leaves the previous content intact.
pub fn write_outputs(
    parameters: &ParameterMap,
    targets: &[OutputTarget],
    options: &RenderOptions,
) -> Result<(), WaspsError> {
    let rendered = targets
        .iter()
        .map(|target| {
            render(parameters, target.format, options)
                .map(|content| (target, content))
                .map_err(|e| e.for_file(&target.path))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (target, content) in rendered {
        write_atomically(&target.path, &content).map_err(|e| e.for_file(&target.path))?;
        info!(
            format = %target.format,
            file = %target.path.display(),
            count = parameters.len(),
            "Wrote parameters"
        );
    }

    Ok(())
}

fn write_atomically(path: &Path, content: &str) -> Result<(), WaspsError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        WaspsError::render(format!(
            "cannot create file in '{}': {}",
            dir.display(),
            e
        ))
    })?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| WaspsError::render(e.to_string()))?;
    file.persist(path)
        .map_err(|e| WaspsError::render(e.error.to_string()))?;

    Ok(())
}

/// Prints the merged map as pretty JSON unless `suppress` is set.
pub fn print_parameters<W: Write>(
    out: &mut W,
    parameters: &ParameterMap,
    suppress: bool,
) -> Result<(), WaspsError> {
    if suppress {
        return Ok(());
    }

    let content = json::render(parameters, false)?;
    out.write_all(content.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| WaspsError::render(format!("cannot write to stdout: {}", e)))
}

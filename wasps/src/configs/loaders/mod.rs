pub mod file;
pub mod string;

use std::{fmt, path::PathBuf};

/// Where a seed document of parameters to write comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SeedSource {
    File(PathBuf),
    Inline(String),
}

/// Inline documents carry parameter values, so only their size is printed.
impl fmt::Debug for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Inline(content) => write!(f, "Inline(<{} bytes>)", content.len()),
        }
    }
}

pub fn load(source: &SeedSource) -> Result<String, String> {
    match source {
        SeedSource::File(path) => file::load(path),
        SeedSource::Inline(content) => string::load(content),
    }
}

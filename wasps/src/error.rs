use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaspsError {
    Authentication(String),
    Configuration(String),
    Fetch {
        path: String,
        message: String,
    },
    Write {
        name: String,
        message: String,
    },
    Render {
        file: Option<PathBuf>,
        message: String,
    },
}

impl WaspsError {
    pub fn fetch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            file: None,
            message: message.into(),
        }
    }

    /// Attaches the output file to a render error that does not name one yet.
    pub fn for_file(self, target: impl Into<PathBuf>) -> Self {
        match self {
            Self::Render {
                file: None,
                message,
            } => Self::Render {
                file: Some(target.into()),
                message,
            },
            other => other,
        }
    }
}

impl fmt::Display for WaspsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Self::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::Fetch { path, message } => {
                write!(f, "Failed to fetch parameters under '{}': {}", path, message)
            }
            Self::Write { name, message } => {
                write!(f, "Failed to write parameter '{}': {}", name, message)
            }
            Self::Render {
                file: Some(file),
                message,
            } => write!(f, "Failed to render '{}': {}", file.display(), message),
            Self::Render {
                file: None,
                message,
            } => write!(f, "Failed to render output: {}", message),
        }
    }
}

impl std::error::Error for WaspsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_names_path() {
        let err = WaspsError::fetch("/dev/app", "AccessDeniedException");
        assert_eq!(
            err.to_string(),
            "Failed to fetch parameters under '/dev/app': AccessDeniedException"
        );
    }

    #[test]
    fn test_for_file_attaches_once() {
        let err = WaspsError::render("bad key")
            .for_file("/tmp/a.json")
            .for_file("/tmp/b.json");
        assert_eq!(err.to_string(), "Failed to render '/tmp/a.json': bad key");
    }

    #[test]
    fn test_for_file_ignores_other_kinds() {
        let err = WaspsError::Configuration("no region".to_string()).for_file("/tmp/a.json");
        assert_eq!(err, WaspsError::Configuration("no region".to_string()));
    }
}

use indexmap::IndexMap;
use serde_derive::Serialize;
use std::fmt;

use crate::error::WaspsError;

const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterPath(String);

impl ParameterPath {
    pub fn parse(path: impl Into<String>) -> Result<Self, WaspsError> {
        let path = path.into();
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(WaspsError::Configuration(
                "Parameter path must not be empty".to_string(),
            ));
        }

        let normalized = match trimmed.trim_end_matches(PATH_SEPARATOR) {
            "" => PATH_SEPARATOR.to_string(),
            rest => rest.to_string(),
        };

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of `full_name` below this path, if it lives under it.
    pub fn relative_name<'a>(&self, full_name: &'a str) -> Option<&'a str> {
        if self.0 == "/" {
            return full_name.strip_prefix(PATH_SEPARATOR);
        }
        full_name
            .strip_prefix(self.0.as_str())
            .and_then(|rest| rest.strip_prefix(PATH_SEPARATOR))
            .filter(|rest| !rest.is_empty())
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How fetched parameter names become keys of the merged map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// `/dev/app/db/HOST` stays `/dev/app/db/HOST`.
    Full,
    /// `/dev/app/db/HOST` fetched under `/dev/app` becomes `db/HOST`.
    #[default]
    Relative,
    /// `/dev/app/db/HOST` becomes `HOST`.
    Name,
}

impl KeyPolicy {
    pub fn key_for(&self, path: &ParameterPath, full_name: &str) -> String {
        match self {
            Self::Full => full_name.to_string(),
            Self::Relative => path
                .relative_name(full_name)
                .unwrap_or(full_name)
                .to_string(),
            Self::Name => full_name
                .rsplit(PATH_SEPARATOR)
                .find(|segment| !segment.is_empty())
                .unwrap_or(full_name)
                .to_string(),
        }
    }
}

impl fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Relative => write!(f, "relative"),
            Self::Name => write!(f, "name"),
        }
    }
}

impl std::str::FromStr for KeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "relative" => Ok(Self::Relative),
            "name" => Ok(Self::Name),
            _ => Err(format!("Invalid key policy: {}", s)),
        }
    }
}

/// Insertion-ordered parameter mapping.
///
/// Re-inserting an existing key replaces its value but keeps the position
/// where the key was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ParameterMap(IndexMap<String, String>);

impl ParameterMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Returns the replaced value when `key` was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

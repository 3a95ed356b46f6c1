use serde_json::{Map, Value};

use crate::{domain::ParameterMap, error::WaspsError};

const NEST_SEPARATOR: char = '/';

pub fn render(parameters: &ParameterMap, nested: bool) -> Result<String, WaspsError> {
    let value = if nested {
        nest(parameters)?
    } else {
        serde_json::to_value(parameters).map_err(|e| WaspsError::render(e.to_string()))?
    };

    let mut out =
        serde_json::to_string_pretty(&value).map_err(|e| WaspsError::render(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Splits keys on `/` into nested objects. `db/HOST` becomes `{"db": {"HOST": ..}}`.
fn nest(parameters: &ParameterMap) -> Result<Value, WaspsError> {
    let mut root = Map::new();

    for (key, value) in parameters.iter() {
        let segments: Vec<&str> = key
            .split(NEST_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(WaspsError::render(format!("Cannot nest empty key '{}'", key)));
        };

        let mut node = &mut root;
        for parent in parents {
            let child = node
                .entry(parent.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match child {
                Value::Object(map) => map,
                _ => {
                    return Err(WaspsError::render(format!(
                        "Key '{}' nests under '{}', which already holds a value",
                        key, parent
                    )));
                }
            };
        }

        if let Some(Value::Object(_)) = node.get(*leaf) {
            return Err(WaspsError::render(format!(
                "Key '{}' collides with a nested group of the same name",
                key
            )));
        }
        node.insert(leaf.to_string(), Value::String(value.to_string()));
    }

    Ok(Value::Object(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(entries: &[(&str, &str)]) -> ParameterMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_flat_keeps_order() {
        let out = render(&map(&[("PORT", "1"), ("HOST", "a")]), false).unwrap();
        assert_eq!(out, "{\n  \"PORT\": \"1\",\n  \"HOST\": \"a\"\n}\n");
    }

    #[test]
    fn test_flat_keeps_slashes() {
        let out = render(&map(&[("db/HOST", "h")]), false).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!({"db/HOST": "h"}));
    }

    #[test]
    fn test_nested() {
        let out = render(
            &map(&[("HOST", "a"), ("db/HOST", "h"), ("db/PORT", "5432")]),
            true,
        )
        .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            json!({"HOST": "a", "db": {"HOST": "h", "PORT": "5432"}})
        );
    }

    #[test]
    fn test_nested_full_paths_ignore_leading_separator() {
        let out = render(&map(&[("/dev/app/HOST", "a")]), true).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!({"dev": {"app": {"HOST": "a"}}}));
    }

    #[test]
    fn test_nested_leaf_parent_conflict() {
        assert!(render(&map(&[("db", "x"), ("db/HOST", "h")]), true).is_err());
        assert!(render(&map(&[("db/HOST", "h"), ("db", "x")]), true).is_err());
    }
}

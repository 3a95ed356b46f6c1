use crate::{domain::ParameterMap, error::WaspsError};

pub fn render(parameters: &ParameterMap, section: Option<&str>) -> Result<String, WaspsError> {
    let mut out = String::new();

    if let Some(section) = section {
        if section.is_empty() || section.contains([']', '\n', '\r']) {
            return Err(WaspsError::render(format!("Invalid INI section name '{}'", section)));
        }
        out.push_str(&format!("[{}]\n", section));
    }

    for (key, value) in parameters.iter() {
        if !is_representable_key(key) {
            return Err(WaspsError::render(format!(
                "Key '{}' cannot be represented in INI",
                key
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(WaspsError::render(format!(
                "Value of '{}' spans multiple lines, which INI cannot represent",
                key
            )));
        }
        out.push_str(&format!("{} = {}\n", key, value));
    }

    Ok(out)
}

/// Readers split on the first `=` or `:` and trim around it.
fn is_representable_key(key: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.contains(['=', ':', '\n', '\r'])
        && !key.starts_with(['[', ';', '#'])
}

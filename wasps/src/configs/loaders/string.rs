pub fn load(content: &str) -> Result<String, String> {
    if content.trim().is_empty() {
        return Err("Inline JSON configuration is empty".to_string());
    }
    Ok(content.to_string())
}

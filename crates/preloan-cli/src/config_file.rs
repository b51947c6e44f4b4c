use std::path::Path;

use tracing::debug;

use preloan_core::config::EngineConfig;

use crate::input;

/// Load the engine configuration, or built-in defaults when no path is given.
///
/// Files ending in .yaml/.yml parse as YAML, everything else as JSON. Partial
/// files are fine; omitted fields keep their defaults.
pub fn load(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let contents = input::file::read_to_string(path)?;
    let config = parse(path, &contents)?;
    debug!(path, "loaded engine configuration");
    Ok(config)
}

fn parse(path: &str, contents: &str) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config: EngineConfig = if is_yaml(path) {
        serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path, e))?
    } else {
        serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path, e))?
    };
    Ok(config)
}

fn is_yaml(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One analysis run: the brand to look for and the pages to read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsFile {
    pub brand: String,
    /// Overrides `BRANDLENS_REQUIRE_MENTION` when present.
    #[serde(default)]
    pub require_mention: Option<bool>,
    pub urls: Vec<String>,
    /// Substrings; any URL containing one is skipped without fetching.
    #[serde(default)]
    pub denylist: Vec<String>,
}

/// Load and validate the targets file from YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<TargetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_targets(&content)
}

/// Parse and validate targets from a YAML string.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_targets(yaml: &str) -> Result<TargetsFile, ConfigError> {
    let mut targets: TargetsFile = serde_yaml::from_str(yaml)?;

    targets.brand = targets.brand.trim().to_string();
    for url in &mut targets.urls {
        *url = url.trim().to_string();
    }

    validate_targets(&targets)?;

    Ok(targets)
}

fn validate_targets(targets: &TargetsFile) -> Result<(), ConfigError> {
    if targets.brand.is_empty() {
        return Err(ConfigError::Validation(
            "brand name must be non-empty".to_string(),
        ));
    }

    if targets.urls.is_empty() {
        return Err(ConfigError::Validation(format!(
            "no urls listed for brand '{}'",
            targets.brand
        )));
    }

    let mut seen = HashSet::new();
    for (idx, url) in targets.urls.iter().enumerate() {
        if url.is_empty() {
            return Err(ConfigError::Validation(format!(
                "url #{} is empty",
                idx + 1
            )));
        }
        if !seen.insert(url.as_str()) {
            return Err(ConfigError::Validation(format!("duplicate url: '{url}'")));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "targets_test.rs"]
mod tests;

//! Configuration loading and parsing

use anyhow::{Context, Result};
use px4_events::ScanConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// Source files or directories to scan
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    /// Scanner settings (`extensions`), defaulting to the library's
    #[serde(flatten)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Path of the generated JSON file
    pub file: Option<PathBuf>,
}

/// Load configuration from a TOML file
///
/// Relative paths in the file are resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let Some(base) = path.parent() {
        config.resolve_relative_to(base);
    }

    // "hpp" and ".hpp" mean the same suffix
    let extensions = std::mem::take(&mut config.input.scan.extensions);
    config.input.scan = ScanConfig::new().with_extensions(extensions);

    Ok(config)
}

impl AppConfig {
    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        self.input.paths.iter_mut().for_each(resolve);
        if let Some(file) = self.output.file.as_mut() {
            resolve(file);
        }
    }
}

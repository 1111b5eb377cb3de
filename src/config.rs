use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

/// Runtime configuration for shelfmark
///
/// Only the CLI consults this; the storage layer always takes its database
/// path explicitly.
pub struct ShelfmarkConfig {
    /// Path to the directory holding shelfmark's database file
    pub data_dir: String,
}

const EMPTY_CONFIG: &str = r#"### shelfmark configuration file

### directory for the bookmark database
# data_dir = "~/.shelfmark"
"#;

impl Default for ShelfmarkConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.shelfmark", home_dir),
        }
    }
}

impl ShelfmarkConfig {
    /// Create and initialize a new configuration
    ///
    /// Reads the TOML file at `path` when given, otherwise
    /// `$HOME/.shelfmark/shelfmark.toml`; either file is created with a
    /// commented template if absent. `SHELFMARK_*` environment variables
    /// override file settings.
    pub fn new(path: &Option<String>) -> Result<ShelfmarkConfig> {
        let mut builder = Config::builder();

        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let shelfmark_dir = format!("{}/.shelfmark", home_dir.as_str());

        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(shelfmark_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create shelfmark directory: {}", e))?;
                let p = format!("{}/shelfmark.toml", shelfmark_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Settings from the environment, e.g. SHELFMARK_DATA_DIR=/tmp/marks
        builder = builder.add_source(config::Environment::with_prefix("SHELFMARK"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let data_dir = match config.get("data_dir") {
            Some(p) => p.trim_end_matches('/').to_string(),
            None => {
                std::fs::create_dir_all(shelfmark_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create data directory: {}", e))?;
                shelfmark_dir
            }
        };

        Ok(ShelfmarkConfig { data_dir })
    }

    /// Path to the SQLite database file
    pub fn db_path(&self) -> String {
        let data_dir = self.data_dir.trim_end_matches('/');
        format!("{}/shelfmark.sqlite3", data_dir)
    }

    /// Path to the configuration file
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.shelfmark/shelfmark.toml", home_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShelfmarkConfig::default();
        assert!(config.data_dir.ends_with(".shelfmark"));
    }

    #[test]
    fn test_db_path() {
        let config = ShelfmarkConfig {
            data_dir: "/test/dir/".to_string(),
        };
        assert_eq!(config.db_path(), "/test/dir/shelfmark.sqlite3");
    }
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_DATA_FILE: &str = "currencies.txt";
pub const DEFAULT_SAVE_FILE: &str = "currencies.dat";

fn default_seed_base() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// File loaded at startup; text or binary by extension.
    pub data_path: Option<String>,
    /// File that mutating commands write back to.
    pub save_path: Option<String>,
    /// Seed `USD 1.0 US Dollar` when nothing could be loaded.
    #[serde(default = "default_seed_base")]
    pub seed_base: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: None,
            save_path: None,
            seed_base: default_seed_base(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(self.data_path.as_deref().unwrap_or(DEFAULT_DATA_FILE))
    }

    /// Where mutations are written. Falls back to `currencies.dat` next to the data file.
    pub fn save_path(&self) -> PathBuf {
        if let Some(custom_path) = &self.save_path {
            return PathBuf::from(custom_path);
        }
        self.data_path().with_file_name(DEFAULT_SAVE_FILE)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
data_path: "/tmp/rates/currencies.txt"
save_path: "/tmp/rates/out.dat"
seed_base: false
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.data_path(), Path::new("/tmp/rates/currencies.txt"));
        assert_eq!(config.save_path(), Path::new("/tmp/rates/out.dat"));
        assert!(!config.seed_base);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: rates/seed.txt").unwrap();
        assert!(config.seed_base);
        assert_eq!(config.save_path(), Path::new("rates/currencies.dat"));

        let config = AppConfig::default();
        assert_eq!(config.data_path(), Path::new(DEFAULT_DATA_FILE));
        assert_eq!(config.save_path(), Path::new(DEFAULT_SAVE_FILE));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/definitely/not/here/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}

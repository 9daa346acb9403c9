//! Application configuration loaded from TOML.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "SOWSMART_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sowsmart.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub models: ModelsConfig,
    pub insights: InsightsConfig,
}

/// Where the trained models live and under which names they are shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub dir: PathBuf,
    pub entries: Vec<ModelEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Display name, e.g. "Random Forest".
    pub name: String,
    /// File name relative to `dir`.
    pub file: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        let entry = |name: &str, file: &str| ModelEntry {
            name: name.to_string(),
            file: PathBuf::from(file),
        };
        Self {
            dir: PathBuf::from("models"),
            entries: vec![
                entry("Random Forest", "crop_random_model.json"),
                entry("Decision Tree", "crop_tree_model.json"),
                entry("KNN", "crop_knn_model.json"),
            ],
        }
    }
}

impl ModelsConfig {
    /// Full path of an entry's artifact.
    pub fn path_of(&self, entry: &ModelEntry) -> PathBuf {
        self.dir.join(&entry.file)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    pub histogram_bins: usize,
    pub preview_rows: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            preview_rows: 10,
        }
    }
}

impl AppConfig {
    /// Parses and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: AppConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads `$SOWSMART_CONFIG`, else `./sowsmart.toml`, else the defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        Self::discover_from(std::env::var_os(CONFIG_ENV), Path::new("."))
    }

    /// Discovery with the environment value and working directory passed in.
    /// An explicit path must load; it never falls back.
    pub fn discover_from(env: Option<OsString>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = env {
            tracing::info!("loading config from ${CONFIG_ENV}");
            return Self::load(PathBuf::from(path));
        }
        let local = cwd.join(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            tracing::info!("loading config from {}", local.display());
            return Self::load(local);
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.models.entries.is_empty() {
            return Err(ConfigError::Invalid("models.entries is empty".into()));
        }
        let mut names: Vec<&str> = self.models.entries.iter().map(|e| e.name.as_str()).collect();
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Invalid("model name must not be empty".into()));
        }
        names.sort_unstable();
        if let Some(w) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(ConfigError::Invalid(format!("duplicate model name {}", w[0])));
        }
        if self.insights.histogram_bins == 0 {
            return Err(ConfigError::Invalid("insights.histogram_bins must be > 0".into()));
        }
        if self.insights.preview_rows == 0 {
            return Err(ConfigError::Invalid("insights.preview_rows must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_dashboard() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        let names: Vec<_> = cfg.models.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Random Forest", "Decision Tree", "KNN"]);
        assert_eq!(
            cfg.models.path_of(&cfg.models.entries[1]),
            PathBuf::from("models/crop_tree_model.json")
        );
        assert_eq!(cfg.insights.histogram_bins, 30);
        assert_eq!(cfg.insights.preview_rows, 10);
    }

    #[test]
    fn partial_file_keeps_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sowsmart.toml");
        fs::write(&path, "[insights]\nhistogram_bins = 12\n")?;
        let cfg = AppConfig::load(&path)?;
        assert_eq!(cfg.insights.histogram_bins, 12);
        assert_eq!(cfg.insights.preview_rows, 10);
        assert_eq!(cfg.models, ModelsConfig::default());
        Ok(())
    }

    #[test]
    fn custom_model_entries() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("cfg.toml");
        fs::write(
            &path,
            r#"
[models]
dir = "/srv/models"

[[models.entries]]
name = "Forest"
file = "forest.bin"
"#,
        )?;
        let cfg = AppConfig::load(&path)?;
        assert_eq!(cfg.models.entries.len(), 1);
        assert_eq!(
            cfg.models.path_of(&cfg.models.entries[0]),
            PathBuf::from("/srv/models/forest.bin")
        );
        Ok(())
    }

    #[test]
    fn discovery_prefers_the_environment_path() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[insights]\npreview_rows = 5\n")?;
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[insights]\npreview_rows = 7\n")?;

        let cfg = AppConfig::discover_from(Some(explicit.into_os_string()), dir.path())?;
        assert_eq!(cfg.insights.preview_rows, 7);
        Ok(())
    }

    #[test]
    fn discovery_falls_back_to_the_working_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[insights]\npreview_rows = 5\n")?;
        let cfg = AppConfig::discover_from(None, dir.path())?;
        assert_eq!(cfg.insights.preview_rows, 5);
        Ok(())
    }

    #[test]
    fn discovery_without_files_uses_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        assert_eq!(AppConfig::discover_from(None, dir.path())?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn missing_environment_path_is_an_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "")?;
        let missing = dir.path().join("nope.toml").into_os_string();
        assert!(matches!(
            AppConfig::discover_from(Some(missing), dir.path()),
            Err(ConfigError::Io { .. })
        ));
        Ok(())
    }

    #[test]
    fn invalid_values_are_reported() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("cfg.toml");
        fs::write(&path, "[insights]\nhistogram_bins = 0\n")?;
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));

        fs::write(&path, "[insights\n")?;
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse { .. })));

        fs::write(
            &path,
            "[[models.entries]]\nname = \"A\"\nfile = \"a.json\"\n[[models.entries]]\nname = \"A\"\nfile = \"b.json\"\n",
        )?;
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));

        assert!(matches!(
            AppConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
        Ok(())
    }
}

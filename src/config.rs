/// Server configuration.
///
/// Settings come from one TOML file, looked up in this order:
///   1. the path given with `--config`
///   2. `.enumswitch.toml` in the workspace root
///   3. `enumswitch/config.toml` in the user's config directory
///
/// When the client sends `initializationOptions`, those replace whatever
/// was read from disk.  Every field has a default, so a partial file or
/// partial options object is fine.
use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

/// File name looked up in the workspace root.
pub const WORKSPACE_CONFIG_FILE: &str = ".enumswitch.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid initializationOptions: {0}")]
    Options(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Language ids treated as C++.
    pub language_ids: Vec<String>,
    /// File extensions treated as C++ when the language id is unknown.
    pub file_extensions: Vec<String>,
    /// Upper bound on definition queries issued while sweeping one range.
    pub max_sweep_positions: usize,
    /// Title of the offered quick-fix.
    pub action_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_ids: vec!["cpp".to_string()],
            file_extensions: ["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h", "inl"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_sweep_positions: 512,
            action_title: "Generate Switch For Enums".to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML file.  A missing file yields `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse the client's `initializationOptions`.
    pub fn from_options(options: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(options)?)
    }

    /// The per-user config file, if a home directory can be determined.
    pub fn user_config_path() -> Option<PathBuf> {
        let strategy = choose_base_strategy().ok()?;
        Some(strategy.config_dir().join("enumswitch").join("config.toml"))
    }

    /// Load configuration from the first file that exists.
    ///
    /// An explicit path that does not exist is skipped like any other
    /// candidate.  A file that exists but cannot be parsed is an error; it
    /// is never silently replaced by the next candidate.
    pub fn discover(
        explicit: Option<&Path>,
        workspace_root: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let candidates = explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(workspace_root.map(|root| root.join(WORKSPACE_CONFIG_FILE)))
            .chain(Self::user_config_path());

        for path in candidates {
            if let Some(config) = Self::from_file(&path)? {
                return Ok(config);
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_cover_cpp() {
        let config = Config::default();
        assert_eq!(config.language_ids, vec!["cpp".to_string()]);
        assert!(config.file_extensions.iter().any(|e| e == "hpp"));
        assert_eq!(config.max_sweep_positions, 512);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let result = Config::from_file(&dir.path().join("nope.toml")).expect("should not fail");
        assert!(result.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(WORKSPACE_CONFIG_FILE);
        fs::write(&path, "maxSweepPositions = 40\n").expect("failed to write config");

        let config = Config::from_file(&path)
            .expect("should parse")
            .expect("should exist");
        assert_eq!(config.max_sweep_positions, 40);
        assert_eq!(config.action_title, "Generate Switch For Enums");
    }

    #[test]
    fn test_workspace_file_beats_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            "languageIds = [\"cpp\", \"cuda-cpp\"]\n",
        )
        .expect("failed to write config");

        let config = Config::discover(None, Some(dir.path())).expect("should load");
        assert_eq!(
            config.language_ids,
            vec!["cpp".to_string(), "cuda-cpp".to_string()]
        );
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join(WORKSPACE_CONFIG_FILE), "maxSweepPositions = 1\n")
            .expect("failed to write config");
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "maxSweepPositions = 2\n").expect("failed to write config");

        let config = Config::discover(Some(&explicit), Some(dir.path())).expect("should load");
        assert_eq!(config.max_sweep_positions, 2);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join(WORKSPACE_CONFIG_FILE), "maxSweepPositions = \"many\"\n")
            .expect("failed to write config");

        let result = Config::discover(None, Some(dir.path()));
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn test_initialization_options() {
        let options = serde_json::json!({ "actionTitle": "Fill enum cases" });
        let config = Config::from_options(options).expect("should parse");
        assert_eq!(config.action_title, "Fill enum cases");
        assert_eq!(config.language_ids, vec!["cpp".to_string()]);
    }
}

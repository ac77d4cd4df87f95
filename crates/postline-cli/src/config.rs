//! Configuration loading from TOML files

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for postline
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub lookup: LookupConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory of identifier CSV files.
    pub ids_dir: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            ids_dir: PathBuf::from("./ids"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./corpus"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub token: Option<String>,
    pub chunk_concurrency: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com/2/posts/lookup".to_string(),
            token: std::env::var("POSTLINE_API_TOKEN").ok(),
            chunk_concurrency: postline_hydrate::DEFAULT_CHUNK_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub size: usize,
    pub round_limit: Option<u32>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: postline_hydrate::DEFAULT_BATCH_SIZE,
            round_limit: None,
        }
    }
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load ./postline.toml if present, defaults otherwise.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("postline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.input.ids_dir, PathBuf::from("./ids"));
        assert_eq!(config.batch.size, postline_hydrate::DEFAULT_BATCH_SIZE);
        assert!(config.batch.round_limit.is_none());
    }

    #[test]
    fn expand_env_var_simple() {
        std::env::set_var("POSTLINE_TEST_VAR", "secret");
        assert_eq!(
            expand_env_var("${POSTLINE_TEST_VAR}"),
            Some("secret".to_string())
        );
        std::env::remove_var("POSTLINE_TEST_VAR");
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_12345}"), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[input]
ids_dir = "/data/ids"

[output]
dir = "/data/corpus"

[lookup]
base_url = "https://lookup.test/posts"
chunk_concurrency = 2

[batch]
size = 1000
round_limit = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.ids_dir, PathBuf::from("/data/ids"));
        assert_eq!(config.output.dir, PathBuf::from("/data/corpus"));
        assert_eq!(config.lookup.base_url, "https://lookup.test/posts");
        assert_eq!(config.lookup.chunk_concurrency, 2);
        assert_eq!(config.batch.size, 1000);
        assert_eq!(config.batch.round_limit, Some(3));
    }
}

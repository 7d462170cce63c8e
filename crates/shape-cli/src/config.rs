//! CLI configuration file

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How validation results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `valid`, or the error code and message
    #[default]
    Text,
    /// One JSON object per run
    Json,
}

/// Settings read from `--config`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Directories searched when a schema is referenced by name
    pub schema_paths: Vec<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Output format when `--format` is not given
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            schema_paths: Vec::new(),
            log_filter: "warn".to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl CliConfig {
    /// Read a config file, YAML for `.yaml`/`.yml` and JSON otherwise
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        };
        Ok(config)
    }

    /// Search paths with command-line directories ahead of configured ones
    pub fn search_paths(&self, extra: &[PathBuf]) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = extra.iter().chain(&self.schema_paths).cloned().collect();
        if paths.is_empty() {
            paths.push(PathBuf::from("."));
        }
        paths
    }
}

pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.schema_paths.is_empty());
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: CliConfig = serde_yaml::from_str("format: json\n").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_full_json() {
        let config: CliConfig = serde_json::from_str(
            r#"{"schema_paths": ["schemas", "/etc/shape"], "log_filter": "debug", "format": "text"}"#,
        )
        .unwrap();
        assert_eq!(
            config.schema_paths,
            [PathBuf::from("schemas"), PathBuf::from("/etc/shape")]
        );
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(serde_yaml::from_str::<CliConfig>("fail_fast: false\n").is_err());
    }

    #[test]
    fn test_search_paths() {
        let config = CliConfig::default();
        assert_eq!(config.search_paths(&[]), [PathBuf::from(".")]);

        let config = CliConfig {
            schema_paths: vec![PathBuf::from("configured")],
            ..CliConfig::default()
        };
        assert_eq!(
            config.search_paths(&[PathBuf::from("flag")]),
            [PathBuf::from("flag"), PathBuf::from("configured")]
        );
    }

    #[test]
    fn test_yaml_extension() {
        assert!(is_yaml(Path::new("user.yaml")));
        assert!(is_yaml(Path::new("user.yml")));
        assert!(!is_yaml(Path::new("user.json")));
        assert!(!is_yaml(Path::new("user")));
    }
}

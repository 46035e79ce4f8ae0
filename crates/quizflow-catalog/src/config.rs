//! Catalog configuration and resolver factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizflow_core::traits::QuizResolver;

use crate::file::FileCatalog;
use crate::http::HttpCatalog;

/// Where quiz content comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogSource {
    /// A catalog file or directory on disk.
    File { path: PathBuf },
    /// An HTTP catalog service.
    Http { base_url: String },
}

/// Top-level quizflow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizflowConfig {
    /// The catalog source to resolve quizzes from.
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSource,
    /// Directory where attempt reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Optional override of every quiz's time budget, in seconds.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

fn default_catalog() -> CatalogSource {
    CatalogSource::File {
        path: PathBuf::from("catalog"),
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./attempts")
}

impl Default for QuizflowConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            output_dir: default_output_dir(),
            time_limit_secs: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source(source: &CatalogSource) -> CatalogSource {
    match source {
        CatalogSource::File { path } => CatalogSource::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        CatalogSource::Http { base_url } => CatalogSource::Http {
            base_url: resolve_env_vars(base_url),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizflow.toml` in the current directory
/// 2. `~/.config/quizflow/config.toml`
///
/// The `QUIZFLOW_CATALOG` environment variable overrides the catalog source:
/// values starting with `http://` or `https://` select the HTTP catalog,
/// anything else is treated as a file path.
pub fn load_config() -> Result<QuizflowConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizflowConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizflow.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizflowConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizflowConfig::default(),
    };

    // Apply env var override
    if let Ok(source) = std::env::var("QUIZFLOW_CATALOG") {
        config.catalog = if source.starts_with("http://") || source.starts_with("https://") {
            CatalogSource::Http { base_url: source }
        } else {
            CatalogSource::File {
                path: PathBuf::from(source),
            }
        };
    }

    config.catalog = resolve_source(&config.catalog);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizflow"))
}

/// Create a resolver instance from the configured catalog source.
pub fn create_resolver(source: &CatalogSource) -> Result<Box<dyn QuizResolver>> {
    match source {
        CatalogSource::File { path } => {
            let catalog = FileCatalog::load(path)
                .with_context(|| format!("failed to load catalog from {}", path.display()))?;
            Ok(Box::new(catalog))
        }
        CatalogSource::Http { base_url } => Ok(Box::new(HttpCatalog::new(base_url))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZFLOW_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZFLOW_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZFLOW_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZFLOW_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizflowConfig::default();
        assert!(matches!(config.catalog, CatalogSource::File { .. }));
        assert_eq!(config.output_dir, PathBuf::from("./attempts"));
        assert!(config.time_limit_secs.is_none());
    }

    #[test]
    fn parse_file_source_config() {
        let toml_str = r#"
output_dir = "runs"
time_limit_secs = 300

[catalog]
type = "file"
path = "catalogs/prod"
"#;
        let config: QuizflowConfig = toml::from_str(toml_str).unwrap();
        assert!(
            matches!(&config.catalog, CatalogSource::File { path } if path == Path::new("catalogs/prod"))
        );
        assert_eq!(config.time_limit_secs, Some(300));
    }

    #[test]
    fn parse_http_source_config() {
        let toml_str = r#"
[catalog]
type = "http"
base_url = "https://lms.example.com/api"
"#;
        let config: QuizflowConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.catalog, CatalogSource::Http { .. }));
    }

    #[test]
    fn explicit_missing_config_path_fails() {
        let err = load_config_from(Some(Path::new("no/such/quizflow.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizflow.toml");
        std::fs::write(
            &path,
            r#"
[catalog]
type = "http"
base_url = "http://localhost:9000"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(
            matches!(&config.catalog, CatalogSource::Http { base_url } if base_url == "http://localhost:9000")
        );
    }
}

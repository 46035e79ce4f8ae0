pub mod init;
pub mod list;
pub mod review;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizflow_catalog::{create_resolver, load_config_from, FileCatalog, QuizflowConfig};
use quizflow_core::traits::QuizResolver;

/// Build the resolver from an explicit catalog path or the configured
/// source.
pub fn resolver_for(
    catalog: Option<&PathBuf>,
    config: &QuizflowConfig,
) -> Result<Box<dyn QuizResolver>> {
    match catalog {
        Some(path) => {
            let resolver = FileCatalog::load(path)
                .with_context(|| format!("failed to load catalog from {}", path.display()))?;
            Ok(Box::new(resolver))
        }
        None => create_resolver(&config.catalog),
    }
}

/// Load the CLI configuration, defaulting when no file exists.
pub fn config_for(config_path: Option<&PathBuf>) -> Result<QuizflowConfig> {
    load_config_from(config_path.map(|p| p.as_path()))
}

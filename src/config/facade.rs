//! Loading entry points that assemble the sources in precedence order.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::OutreachConfig;
use crate::error::OutreachError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Assembles [`OutreachConfig`] from defaults, files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with the full precedence chain:
    /// defaults, global file, workspace files, environment.
    pub fn load(workspace_root: &Path) -> Result<OutreachConfig, OutreachError> {
        Self::load_with_global(workspace_root, global_file::global_config_path())
    }

    /// Same as [`ConfigLoader::load`] with an explicit global config path.
    pub fn load_with_global(
        workspace_root: &Path,
        global_path: Option<PathBuf>,
    ) -> Result<OutreachConfig, OutreachError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global_path.as_deref());
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);

        let config: OutreachConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config.resolve_secrets())
    }

    /// Load from a single file on top of defaults; environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<OutreachConfig, OutreachError> {
        if !path.exists() {
            return Err(OutreachError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);

        let config: OutreachConfig = builder.build()?.try_deserialize()?;
        Ok(config.resolve_secrets())
    }

    /// Built-in defaults only.
    pub fn default() -> OutreachConfig {
        OutreachConfig::default()
    }
}

//! Global config file source: $XDG_CONFIG_HOME/outreach/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the global config file, if a home directory can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "outreach").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    let Some(path) = path else {
        return builder;
    };
    if path.exists() {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        debug!(config_path = %path.display(), "Loading global configuration");
        builder.add_source(File::from(path).required(false))
    } else {
        debug!(
            config_path = %path.display(),
            "No global configuration file, using defaults"
        );
        builder
    }
}

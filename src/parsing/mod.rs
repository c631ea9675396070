pub mod cameras;
pub mod config;
mod meshes;

pub use meshes::{load_mesh, parse_mesh};

use crate::error::{ConfigError, Error};
use config::{RenderSettings, TOMLConfig};

use std::fs;
use std::path::Path;

pub fn get_settings(filepath: &Path) -> Result<TOMLConfig, ConfigError> {
    let input = fs::read_to_string(filepath).map_err(|source| ConfigError::Read {
        path: filepath.to_path_buf(),
        source,
    })?;
    toml::from_str(&input).map_err(|source| ConfigError::Parse {
        path: filepath.to_path_buf(),
        source,
    })
}

/// Layers `overrides` on top of the optional config file and validates the result.
pub fn load_settings(
    config_file: Option<&Path>,
    overrides: TOMLConfig,
) -> Result<RenderSettings, Error> {
    let file_config = match config_file {
        Some(path) => get_settings(path)?,
        None => TOMLConfig::default(),
    };
    Ok(RenderSettings::try_from(file_config.merge(overrides))?)
}

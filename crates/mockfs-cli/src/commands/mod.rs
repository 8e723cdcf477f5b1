pub mod config;
pub mod routes;

use anyhow::Result;
use mockfs::Options;
use std::path::Path;

/// Options from `path`, or from ./mockfs.toml when no path is given
pub fn load_options(path: Option<&Path>) -> Result<Options> {
    match path {
        Some(path) => {
            anyhow::ensure!(path.exists(), "Config file not found: {:?}", path);
            Options::load(path)
        }
        None => Options::load_default(),
    }
}

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::core::RoadwatchConfig;
use crate::errors::{Error, Result};

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = ".roadwatch.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<RoadwatchConfig> {
    let config = toml::from_str::<RoadwatchConfig>(contents)?;

    if let (Some(min), Some(max)) = (config.iri_min(), config.iri_max()) {
        if min > max {
            return Err(Error::configuration(format!(
                "filter.iri_min {} is greater than filter.iri_max {}",
                min, max
            )));
        }
    }

    if let Some(format) = config.default_format() {
        if !matches!(format, "terminal" | "markdown" | "json") {
            return Err(Error::configuration(format!(
                "unknown output.default_format '{}'",
                format
            )));
        }
    }

    Ok(config)
}

/// Load the config at `config_path`; `None` when missing or invalid
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<RoadwatchConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("Invalid {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its ancestors, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file
pub fn load_config_from(start: PathBuf) -> RoadwatchConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RoadwatchConfig::default()
        })
}

pub fn load_config() -> RoadwatchConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            RoadwatchConfig::default()
        }
    }
}

mod core;
mod loader;

pub use self::core::{DataConfig, FilterConfig, OutputConfig, RoadwatchConfig, DEFAULT_DATA_PATH};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Roadwatch Configuration

[data]
# Segment table loaded when no path is given
path = "dummy_data_yogyakarta.csv"

[filter]
# Inclusive IRI range (m/km)
iri_min = 0.0
iri_max = 10.0
# Roughness conditions to keep; "all" keeps every condition
conditions = ["all"]

[output]
# terminal, markdown or json
default_format = "terminal"
"#;

/// Write the default configuration into `dir`
pub fn init_config_at(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    init_config_at(Path::new("."), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.data_path(), "dummy_data_yogyakarta.csv");
        assert_eq!(config.default_format(), Some("terminal"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        init_config_at(temp_dir.path(), false).unwrap();
        assert!(init_config_at(temp_dir.path(), false).is_err());
        assert!(init_config_at(temp_dir.path(), true).is_ok());
    }
}

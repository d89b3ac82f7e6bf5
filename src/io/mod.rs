pub mod csv;
pub mod output;

pub use self::csv::{export_csv, load_segments, read_segments, write_segments};
pub use output::{create_writer, JsonWriter, MarkdownWriter, OutputWriter, ReportContext, TerminalWriter};

use crate::errors::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Create the directory that will hold `path`, if any
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("out.txt");

        write_file(&nested, "hello").unwrap();

        assert_eq!(fs::read_to_string(&nested).unwrap(), "hello");
    }

    #[test]
    fn ensure_parent_dir_accepts_bare_file_names() {
        assert!(ensure_parent_dir(Path::new("report.md")).is_ok());
    }
}

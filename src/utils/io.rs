//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("env");

        write_file(&path, "APP_VERSION=1.0.0\n", "write env").unwrap();
        assert_eq!(read_file(&path, "read env").unwrap(), "APP_VERSION=1.0.0\n");
    }

    #[test]
    fn read_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = read_file(&dir.path().join("absent"), "read env");
        assert!(result.is_err());
    }
}

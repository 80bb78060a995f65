//! File-based commands (`GITHUB_OUTPUT`, `GITHUB_ENV`).
//!
//! Each record is appended as a heredoc block with a random delimiter so
//! multi-line values survive intact.

use crate::error::{ActionError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Format one `key<<DELIM` record.
///
/// Fails when the delimiter would appear inside the key or value, which would
/// let the value terminate the record early.
pub fn prepare_key_value_message(key: &str, value: &str) -> Result<String> {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());

    if key.contains(&delimiter) {
        return Err(ActionError::Output {
            key: key.to_string(),
            reason: format!("name should not contain the delimiter \"{delimiter}\""),
        });
    }
    if value.contains(&delimiter) {
        return Err(ActionError::Output {
            key: key.to_string(),
            reason: format!("value should not contain the delimiter \"{delimiter}\""),
        });
    }

    Ok(format!("{key}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// Append a record to a command file.
pub fn issue_file_command(path: &Path, message: &str) -> Result<()> {
    if !path.exists() {
        return Err(ActionError::FileCommand {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing file at path"),
        });
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|source| ActionError::FileCommand {
            path: path.to_path_buf(),
            source,
        })?;

    file.write_all(message.as_bytes())
        .map_err(|source| ActionError::FileCommand {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("Appended {} bytes to {}", message.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_shape() {
        let record = prepare_key_value_message("package_url", "https://x.test/p").unwrap();
        let lines: Vec<&str> = record.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("package_url<<ghadelimiter_"));
        assert_eq!(lines[1], "https://x.test/p");
        assert_eq!(lines[0].split_once("<<").unwrap().1, lines[2]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = issue_file_command(&dir.path().join("nope"), "x").unwrap_err();
        assert!(matches!(err, ActionError::FileCommand { .. }));
    }

    #[test]
    fn records_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        issue_file_command(&path, "a<<D\nb\nD\n").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "existing=1\na<<D\nb\nD\n");
    }
}

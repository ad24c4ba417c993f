//! File reading and writing helpers.
//!
//! Report files and prompt templates are small text files, so everything
//! here reads straight into memory.

use crate::error::{IoError, Result};
use std::path::Path;

/// Maximum file size to read into memory (16MB).
const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Extensions accepted as plain-text reports.
pub const TEXT_EXTENSIONS: [&str; 3] = ["txt", "md", "text"];

/// Reads a UTF-8 file to string.
///
/// # Errors
///
/// Returns an error if the file does not exist, is too large, or is not
/// valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use healthfaq::io::read_file;
///
/// let content = read_file("report.txt").unwrap();
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let metadata = std::fs::metadata(path_ref).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(IoError::ReadFailed {
            path: path_str,
            reason: format!(
                "file too large: {} bytes (max: {MAX_FILE_SIZE} bytes)",
                metadata.len()
            ),
        }
        .into());
    }

    std::fs::read_to_string(path_ref).map_err(|e| {
        IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Reads a plain-text report.
///
/// Only `txt`, `md` and `text` files are accepted; binary document formats
/// need a text extractor this crate does not ship.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for other extensions, or any
/// error from [`read_file`].
pub fn read_report_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let supported = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()));

    if !supported {
        return Err(IoError::UnsupportedFormat {
            path: path_ref.to_string_lossy().to_string(),
        }
        .into());
    }

    read_file(path_ref)
}

/// Writes content to a file, creating parent directories if needed.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    // Create parent directories
    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
            path: parent.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    }

    std::fs::write(path_ref, content).map_err(|e| IoError::WriteFailed {
        path: path_str,
        reason: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let result = read_file("/definitely/not/here.txt");
        assert!(matches!(
            result,
            Err(Error::Io(IoError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("report.txt");
        write_file(&path, "Hemoglobin 11.2 g/dL").unwrap();
        assert_eq!(read_file(&path).unwrap(), "Hemoglobin 11.2 g/dL");
    }

    #[test]
    fn test_read_report_text_accepts_text_formats() {
        let temp = TempDir::new().unwrap();
        for name in ["a.txt", "b.MD", "c.text"] {
            let path = temp.path().join(name);
            write_file(&path, "ok").unwrap();
            assert_eq!(read_report_text(&path).unwrap(), "ok");
        }
    }

    #[test]
    fn test_read_report_text_rejects_binary_formats() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scan.pdf");
        write_file(&path, "%PDF-1.7").unwrap();
        assert!(matches!(
            read_report_text(&path),
            Err(Error::Io(IoError::UnsupportedFormat { .. }))
        ));
    }
}

//! Lock-free scans of the record file
//!
//! Readers take no lock and see whatever bytes are on disk at call time.
//! A line that does not decode (invalid UTF-8, wrong field count, bad
//! timestamp, a final line still being written) is skipped rather than
//! failing the scan.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::errors::{StorageError, StorageResult};
use super::record;
use crate::account::Account;

/// Reads account records from a single file
#[derive(Debug, Clone)]
pub struct RecordReader {
    path: PathBuf,
}

impl RecordReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, or `None` if the file does not exist yet.
    fn load(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read_failed("Cannot read file", e)
                .with_details(self.path.display().to_string())),
        }
    }

    /// Every well-formed record, in file order.
    pub fn read_all(&self) -> StorageResult<Vec<Account>> {
        let Some(contents) = self.load()? else {
            return Ok(Vec::new());
        };

        let accounts = decode_lines(&contents).collect();
        Ok(accounts)
    }

    /// First well-formed record whose email equals `email` exactly.
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        let Some(contents) = self.load()? else {
            return Ok(None);
        };

        let found = decode_lines(&contents).find(|account| account.email() == email);
        Ok(found)
    }
}

fn decode_lines(contents: &[u8]) -> impl Iterator<Item = Account> + '_ {
    contents
        .split(|&b| b == b'\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let Ok(line) = std::str::from_utf8(raw) else {
                debug!(line = idx + 1, "Skipping record with invalid UTF-8");
                return None;
            };
            if line.trim().is_empty() {
                return None;
            }

            let decoded = record::decode(line);
            if decoded.is_none() {
                debug!(line = idx + 1, "Skipping malformed record");
            }
            decoded
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("users.txt");
        fs::write(&path, contents).unwrap();
        path
    }

    fn line(name: &str, email: &str) -> String {
        record::encode(&Account::new(name, email, "hash", Utc::now()))
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let reader = RecordReader::new(temp_dir.path().join("users.txt"));

        assert_eq!(reader.find_by_email("a@example.com").unwrap(), None);
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_find_first_match() {
        let temp_dir = TempDir::new().unwrap();
        let contents = format!(
            "{}\n{}\n{}\n",
            line("Ann One", "ann@example.com"),
            line("Bob", "bob@example.com"),
            line("Ann Two", "ann@example.com"),
        );
        let reader = RecordReader::new(write_file(&temp_dir, &contents));

        let found = reader.find_by_email("ann@example.com").unwrap().unwrap();
        assert_eq!(found.name(), "Ann One");
    }

    #[test]
    fn test_email_comparison_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let contents = format!("{}\n", line("Ann", "ann@example.com"));
        let reader = RecordReader::new(write_file(&temp_dir, &contents));

        assert!(reader.find_by_email("ANN@example.com").unwrap().is_none());
    }

    #[test]
    fn test_blank_and_corrupt_lines_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let contents = format!(
            "\n   \nbroken|line\n{}\nx|y|z|not-a-date\n",
            line("Bob", "bob@example.com")
        );
        let reader = RecordReader::new(write_file(&temp_dir, &contents));

        let all = reader.read_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email(), "bob@example.com");
        assert!(reader.find_by_email("y").unwrap().is_none());
    }

    #[test]
    fn test_partial_final_line_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let complete = line("Bob", "bob@example.com");
        let partial = line("Carol", "carol@example.com");
        let contents = format!("{}\n{}", complete, &partial[..partial.len() - 5]);
        let reader = RecordReader::new(write_file(&temp_dir, &contents));

        assert!(reader.find_by_email("bob@example.com").unwrap().is_some());
        assert!(reader.find_by_email("carol@example.com").unwrap().is_none());
    }

    #[test]
    fn test_crlf_terminators_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let contents = format!("{}\r\n", line("Bob", "bob@example.com"));
        let reader = RecordReader::new(write_file(&temp_dir, &contents));

        assert!(reader.find_by_email("bob@example.com").unwrap().is_some());
    }

    #[test]
    fn test_invalid_utf8_does_not_fail_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.txt");
        let mut bytes = format!("{}\n", line("Bob", "bob@example.com")).into_bytes();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        fs::write(&path, bytes).unwrap();

        let reader = RecordReader::new(&path);
        assert_eq!(reader.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_record_with_invalid_utf8_field_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.txt");
        let mut bytes = b"Bo\xffb|bob@example.com|hash|2024-01-15 08:30:00\n".to_vec();
        bytes.extend_from_slice(format!("{}\n", line("Ann", "ann@example.com")).as_bytes());
        fs::write(&path, bytes).unwrap();

        let reader = RecordReader::new(&path);
        let all = reader.read_all().unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email(), "ann@example.com");
        assert!(reader.find_by_email("bob@example.com").unwrap().is_none());
    }
}

//! Line access to file contents

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes inspected when sniffing for binary content
const BINARY_SNIFF_LEN: usize = 8192;

/// Returns a file's content as an ordered sequence of lines
pub trait DocumentSource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Reads documents from disk. Binary, non-UTF-8 and oversized files are
/// reported as `InvalidData` so the scanner can skip them.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    max_file_bytes: u64,
}

impl FsDocumentSource {
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }
}

impl Default for FsDocumentSource {
    fn default() -> Self {
        Self::new(20 * 1024 * 1024)
    }
}

fn is_likely_binary(content: &[u8]) -> bool {
    content.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

impl DocumentSource for FsDocumentSource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();
        if size > self.max_file_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file too large ({} bytes)", size),
            ));
        }

        let mut bytes = Vec::with_capacity(size as usize);
        file.read_to_end(&mut bytes)?;

        if is_likely_binary(&bytes) {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "binary file"));
        }

        let text = String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        Ok(text.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_lines_without_terminators() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "first\r\nsecond\nthird").unwrap();

        let lines = FsDocumentSource::default().read_lines(&path).unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}hello").unwrap();

        let lines = FsDocumentSource::default().read_lines(&path).unwrap();
        assert_eq!(lines, vec!["hello"]);
    }

    #[test]
    fn test_rejects_binary_and_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let binary = dir.path().join("blob.bin");
        fs::write(&binary, [0x66, 0x00, 0x6f]).unwrap();
        let latin1 = dir.path().join("latin1.txt");
        fs::write(&latin1, [0x63, 0x61, 0x66, 0xe9]).unwrap();

        let source = FsDocumentSource::default();
        assert_eq!(
            source.read_lines(&binary).unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
        assert_eq!(
            source.read_lines(&latin1).unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
    }

    #[test]
    fn test_rejects_oversized_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "0123456789").unwrap();

        let err = FsDocumentSource::new(4).read_lines(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = FsDocumentSource::default()
            .read_lines(&dir.path().join("missing.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

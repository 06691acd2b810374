//! Re-readable inputs.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// An input that can be read from the start any number of times.
///
/// Column discovery and assembly each scan the input from byte 0, so every
/// call to [`DataSource::open`] must return a fresh reader.
pub trait DataSource {
    /// Name used in diagnostics (usually the file name).
    fn name(&self) -> &str;

    /// Opens a reader positioned at the start of the input.
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

/// Opens `source` and rejects UTF-16 input by its byte-order mark.
///
/// The mark is only peeked, so the reader still starts at byte 0.
pub(crate) fn open_utf8(source: &dyn DataSource) -> Result<Box<dyn BufRead + '_>> {
    let mut reader = source
        .open()
        .map_err(|err| IngestError::io(source.name(), err))?;
    let head = reader
        .fill_buf()
        .map_err(|err| IngestError::io(source.name(), err))?;
    let encoding = match head {
        [0xFF, 0xFE, ..] => Some("UTF-16 LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16 BE"),
        _ => None,
    };
    if let Some(encoding) = encoding {
        return Err(IngestError::UnsupportedEncoding {
            path: source.name().to_string(),
            line: 1,
            encoding,
        });
    }
    Ok(reader)
}

/// A file on disk, reopened for every pass.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// In-memory contents.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl DataSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(self.data.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn memory_source_rewinds_on_open() {
        let source = MemorySource::new("mem", "a,b\n1,2\n");
        for _ in 0..2 {
            let mut text = String::new();
            source.open().unwrap().read_to_string(&mut text).unwrap();
            assert_eq!(text, "a,b\n1,2\n");
        }
    }

    #[test]
    fn file_source_uses_file_name() {
        let source = FileSource::new("/tmp/some/dir/data.txt");
        assert_eq!(source.name(), "data.txt");
        assert!(source.open().is_err());
    }
}

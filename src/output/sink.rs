//! Destinations for encoded documents.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Permission bits of written documents (rw-r--r--)
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Persisting a document failed
#[derive(Debug, thiserror::Error)]
#[error("Failed to write {name}: {source}")]
pub struct WriteError {
    pub name: String,
    #[source]
    pub source: std::io::Error,
}

/// Accepts a named payload and stores it, replacing any previous content
pub trait Sink {
    fn write(&mut self, name: &str, payload: &[u8]) -> Result<(), WriteError>;
}

/// Writes each document as a file inside a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSink { dir: dir.into() }
    }

    /// Full path a document named `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Sink for FileSink {
    fn write(&mut self, name: &str, payload: &[u8]) -> Result<(), WriteError> {
        let path = self.path_for(name);
        let to_error = |source| WriteError {
            name: path.display().to_string(),
            source,
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(OUTPUT_FILE_MODE);
        }

        let mut file = options.open(&path).map_err(to_error)?;
        file.write_all(payload).map_err(to_error)?;
        file.flush().map_err(to_error)?;
        Ok(())
    }
}

/// Keeps documents in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    documents: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.documents.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, name: &str, payload: &[u8]) -> Result<(), WriteError> {
        self.documents.insert(name.to_string(), payload.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_writes_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(dir.path());

        sink.write("pools.yaml", b"first version, longer").unwrap();
        sink.write("pools.yaml", b"second").unwrap();

        let content = std::fs::read(dir.path().join("pools.yaml")).unwrap();
        assert_eq!(content, b"second");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_sink_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(dir.path());
        sink.write("pools.yaml", b"x").unwrap();

        let mode = std::fs::metadata(dir.path().join("pools.yaml"))
            .unwrap()
            .permissions()
            .mode();
        // The process umask may clear bits but never adds any
        assert_eq!(mode & 0o777 & !OUTPUT_FILE_MODE, 0);
        assert_ne!(mode & 0o600, 0);
    }

    #[test]
    fn test_file_sink_missing_directory() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(dir.path().join("does-not-exist"));

        let err = sink.write("pools.yaml", b"x").unwrap_err();
        assert!(err.name.ends_with("pools.yaml"));
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.write("b.yaml", b"2").unwrap();
        sink.write("a.yaml", b"1").unwrap();
        sink.write("a.yaml", b"3").unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("a.yaml"), Some(&b"3"[..]));
        assert_eq!(sink.names().collect::<Vec<_>>(), vec!["a.yaml", "b.yaml"]);
    }
}

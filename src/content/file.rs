use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use mime::Mime;
use tracing::trace;

use crate::content::{HttpContent, LengthCache};

/// Content backed by a file on disk.
///
/// The file is opened on every write, so the content is replayable. The
/// length comes from filesystem metadata, never from reading the file.
/// Caching assumes the file does not change while the request is in flight.
#[derive(Debug)]
pub struct FileContent {
    path: PathBuf,
    content_type: Option<Mime>,
    cache: LengthCache,
}

impl FileContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), content_type: None, cache: LengthCache::new() }
    }

    /// Sets the media type reported by this content.
    #[must_use]
    pub fn with_content_type(mut self, content_type: Mime) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HttpContent for FileContent {
    fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        let mut file = File::open(&self.path)?;
        let written = io::copy(&mut file, sink)?;
        trace!(path = %self.path.display(), written, "streamed file content");
        Ok(())
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    fn compute_length(&mut self) -> io::Result<Option<u64>> {
        Ok(Some(fs::metadata(&self.path)?.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_from_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file payload").unwrap();

        let mut content = FileContent::new(file.path());
        assert_eq!(content.length().unwrap(), Some(12));
    }

    #[test]
    fn test_write_replays_file_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"replay me").unwrap();

        let mut content = FileContent::new(file.path());
        assert!(content.retry_supported());

        let mut first = Vec::new();
        content.write_to(&mut first).unwrap();
        let mut second = Vec::new();
        content.write_to(&mut second).unwrap();

        assert_eq!(first, b"replay me");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = FileContent::new(dir.path().join("missing"));

        let err = content.length().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        // the error is not cached, a later query hits the filesystem again
        assert!(content.length_cache().computed().is_none());
    }
}

use std::fmt;
use std::io;
use std::io::{Read, Write};

use mime::Mime;

use crate::content::{HttpContent, LengthCache};

/// Content backed by an arbitrary [`Read`] source.
///
/// The reader is drained into the sink, so [`write_to`] is valid at most once:
/// `retry_supported` defaults to `false`. Callers wrapping a source they know
/// to be replayable may flip it with [`with_retry_supported`], and callers
/// that know the byte count up front declare it with [`with_length`]; the
/// length is never discovered by consuming the reader.
///
/// [`write_to`]: HttpContent::write_to
/// [`with_retry_supported`]: ReaderContent::with_retry_supported
/// [`with_length`]: ReaderContent::with_length
pub struct ReaderContent<R> {
    reader: R,
    content_type: Option<Mime>,
    declared_length: Option<u64>,
    retry_supported: bool,
    cache: LengthCache,
}

impl<R: Read> ReaderContent<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            content_type: None,
            declared_length: None,
            retry_supported: false,
            cache: LengthCache::new(),
        }
    }

    /// Sets the media type reported by this content.
    #[must_use]
    pub fn with_content_type(mut self, content_type: Mime) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Declares the number of bytes the reader will produce.
    #[must_use]
    pub fn with_length(mut self, length: u64) -> Self {
        self.declared_length = Some(length);
        self
    }

    /// Marks the reader as replayable. Only do this when reading it twice
    /// really yields identical bytes.
    #[must_use]
    pub fn with_retry_supported(mut self, retry_supported: bool) -> Self {
        self.retry_supported = retry_supported;
        self
    }

    /// Consumes the content, returning the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> HttpContent for ReaderContent<R> {
    fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        io::copy(&mut self.reader, sink)?;
        Ok(())
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    fn retry_supported(&self) -> bool {
        self.retry_supported
    }

    // never measure a stream, report the declared length or unknown
    fn compute_length(&mut self) -> io::Result<Option<u64>> {
        Ok(self.declared_length)
    }
}

impl<R> fmt::Debug for ReaderContent<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderContent")
            .field("content_type", &self.content_type)
            .field("declared_length", &self.declared_length)
            .field("retry_supported", &self.retry_supported)
            .finish_non_exhaustive()
    }
}

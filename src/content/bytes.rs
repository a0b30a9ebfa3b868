use std::io;
use std::io::Write;

use bytes::Bytes;
use mime::Mime;

use crate::content::{HttpContent, LengthCache};

/// Content backed by a fixed in-memory byte sequence.
///
/// The buffer is immutable for the life of the instance, so the content is
/// replayable and its length is known without a write pass.
#[derive(Debug)]
pub struct BytesContent {
    data: Bytes,
    content_type: Option<Mime>,
    cache: LengthCache,
}

impl BytesContent {
    /// Creates a content from any buffer convertible to [`Bytes`]
    /// (`Vec<u8>`, `String`, `&'static [u8]`, `&'static str`, ...).
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into(), content_type: None, cache: LengthCache::new() }
    }

    /// Sets the media type reported by this content.
    #[must_use]
    pub fn with_content_type(mut self, content_type: Mime) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Returns the underlying bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl HttpContent for BytesContent {
    fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self.data)
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    // the buffer length is known, no counting pass needed
    fn compute_length(&mut self) -> io::Result<Option<u64>> {
        Ok(Some(self.data.len() as u64))
    }
}

//! Content encodings applied while writing.
//!
//! An encoding is a named byte-stream transform (gzip, ...) applied between a
//! content and the transport sink. [`EncodedContent`] wraps any
//! [`HttpContent`] with an encoding: it reports the encoding name for the
//! Content-Encoding header, keeps the wrapped content's media type and retry
//! contract, and reports its length as unknown since the encoded size is only
//! discoverable by running the encoder.

mod gzip;

pub use gzip::GzipEncoding;

use std::io;
use std::io::Write;

use mime::Mime;

use crate::content::{HttpContent, LengthCache};

/// A named transform applied to a content's bytes on their way to a sink.
pub trait ContentEncoding {
    /// The encoding identifier as used in the Content-Encoding header.
    fn name(&self) -> &'static str;

    /// Streams `content` through the transform into `sink`.
    fn encode(&self, content: &mut dyn HttpContent, sink: &mut dyn Write) -> io::Result<()>;
}

/// A content wrapped with a [`ContentEncoding`].
#[derive(Debug)]
pub struct EncodedContent<C, E> {
    content: C,
    encoding: E,
    cache: LengthCache,
}

impl<C: HttpContent, E: ContentEncoding> EncodedContent<C, E> {
    pub fn new(content: C, encoding: E) -> Self {
        Self { content, encoding, cache: LengthCache::new() }
    }

    /// Consumes the wrapper, returning the original content.
    pub fn into_inner(self) -> C {
        self.content
    }
}

impl<C: HttpContent, E: ContentEncoding> HttpContent for EncodedContent<C, E> {
    fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        self.encoding.encode(&mut self.content, sink)
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn content_type(&self) -> Option<&Mime> {
        self.content.content_type()
    }

    fn encoding(&self) -> Option<&str> {
        Some(self.encoding.name())
    }

    fn retry_supported(&self) -> bool {
        self.content.retry_supported()
    }

    // the encoded size is only discoverable by running the encoder; leave it
    // unknown so the transport falls back to chunked transfer
    fn compute_length(&mut self) -> io::Result<Option<u64>> {
        Ok(None)
    }
}

use std::fmt;
use std::io;
use std::io::Write;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use mime::Mime;
use thiserror::Error;
use tracing::trace;

use crate::content::{HttpContent, LengthCache};

/// Boundary used when the caller does not pick one.
const DEFAULT_BOUNDARY: &str = "__END_OF_PART__";

/// A `multipart/related` request body aggregating several contents.
///
/// Each [`Part`] contributes its own headers followed by its bytes, framed by
/// the multipart boundary. The aggregate is replayable only if every part is;
/// length discovery falls back to the counting-sink pass inherited from
/// [`HttpContent`], which is exactly one full serialization of the body.
pub struct MultipartContent {
    parts: Vec<Part>,
    boundary: String,
    content_type: Mime,
    cache: LengthCache,
}

/// A single part of a [`MultipartContent`]: extra headers plus the content
/// carrying the bytes. `Content-Type` and `Content-Transfer-Encoding` are
/// derived from the content itself and need not be set manually.
pub struct Part {
    headers: HeaderMap,
    content: Box<dyn HttpContent>,
}

#[derive(Debug, Error)]
pub enum MultipartError {
    #[error("invalid multipart boundary: {reason}")]
    InvalidBoundary { reason: String },
}

impl MultipartError {
    pub fn invalid_boundary<S: ToString>(reason: S) -> Self {
        Self::InvalidBoundary { reason: reason.to_string() }
    }
}

impl Part {
    pub fn new(content: impl HttpContent + 'static) -> Self {
        Self { headers: HeaderMap::new(), content: Box::new(content) }
    }

    /// Adds an extra header emitted before the part's bytes.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

impl MultipartContent {
    pub fn new() -> Self {
        // the default boundary is a compile-time constant known to pass validation
        Self::with_boundary(DEFAULT_BOUNDARY).expect("default boundary is valid")
    }

    /// Creates an empty multipart body with a caller-chosen boundary.
    ///
    /// The boundary must satisfy RFC 2046 section 5.1.1: 1 to 70 characters
    /// from the permitted set, not ending in a space.
    pub fn with_boundary(boundary: impl Into<String>) -> Result<Self, MultipartError> {
        let boundary = boundary.into();
        validate_boundary(&boundary)?;

        let content_type = format!("multipart/related; boundary=\"{boundary}\"")
            .parse::<Mime>()
            .map_err(MultipartError::invalid_boundary)?;

        Ok(Self { parts: Vec::new(), boundary, content_type, cache: LengthCache::new() })
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Appends a part to the body.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn add_part(&mut self, part: Part) -> &mut Self {
        self.parts.push(part);
        self
    }
}

impl Default for MultipartContent {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpContent for MultipartContent {
    fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        for part in &mut self.parts {
            write!(sink, "--{}\r\n", self.boundary)?;

            if let Some(content_type) = part.content.content_type() {
                write!(sink, "Content-Type: {content_type}\r\n")?;
            }
            if let Some(encoding) = part.content.encoding() {
                write!(sink, "Content-Transfer-Encoding: {encoding}\r\n")?;
            }
            for (name, value) in &part.headers {
                write!(sink, "{name}: ")?;
                sink.write_all(value.as_bytes())?;
                sink.write_all(b"\r\n")?;
            }

            sink.write_all(b"\r\n")?;
            part.content.write_to(sink)?;
            sink.write_all(b"\r\n")?;
        }
        write!(sink, "--{}--\r\n", self.boundary)?;

        trace!(parts = self.parts.len(), boundary = %self.boundary, "wrote multipart content");
        Ok(())
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn content_type(&self) -> Option<&Mime> {
        Some(&self.content_type)
    }

    // replayable only when every part can produce its bytes again
    fn retry_supported(&self) -> bool {
        self.parts.iter().all(|part| part.content.retry_supported())
    }
}

fn validate_boundary(boundary: &str) -> Result<(), MultipartError> {
    if boundary.is_empty() || boundary.len() > 70 {
        return Err(MultipartError::invalid_boundary(format!(
            "length must be 1..=70, got {}",
            boundary.len()
        )));
    }
    if boundary.ends_with(' ') {
        return Err(MultipartError::invalid_boundary("must not end with a space"));
    }
    for c in boundary.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '\'' | '(' | ')' | '+' | '_' | ',' | '-' | '.' | '/' | ':' | '='
            | '?' | ' ' => {}
            _ => {
                return Err(MultipartError::invalid_boundary(format!("character {c:?} not allowed")));
            }
        }
    }
    Ok(())
}

impl fmt::Debug for MultipartContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartContent")
            .field("boundary", &self.boundary)
            .field("parts", &self.parts.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part").field("headers", &self.headers).finish_non_exhaustive()
    }
}

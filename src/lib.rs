//! HTTP request content abstractions
//!
//! This crate provides the request-body ("content") abstraction used by an HTTP
//! client's request pipeline. A content knows how to produce its bytes into an
//! output sink, and additionally reports the metadata the pipeline needs to
//! populate transport headers and drive retries:
//!
//! - its media type (`Content-Type`)
//! - its transfer encoding (`Content-Encoding`)
//! - its length in bytes, computed at most once per instance
//! - whether its byte stream can be replayed after a failed send
//!
//! # Features
//!
//! - Streaming writes through any `std::io::Write` sink
//! - Lazy, once-only content length discovery with caching
//! - A retry-replay contract that protects single-use byte sources
//! - In-memory, file, reader, url-encoded form and multipart contents
//! - Content encodings (gzip) applied transparently while writing
//!
//! # Example
//!
//! ```no_run
//! use http_content::content::{BytesContent, HttpContent};
//! use tracing::{info, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! fn main() -> std::io::Result<()> {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::TRACE)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let mut content = BytesContent::new("hello world").with_content_type(mime::TEXT_PLAIN);
//!
//!     // The pipeline asks for the length to set the Content-Length header.
//!     // The value is computed once and cached for any later query.
//!     let length = content.length()?;
//!     info!(?length, "sending request body");
//!
//!     // ... and streams the bytes into the transport sink.
//!     let mut sink = Vec::new();
//!     content.write_to(&mut sink)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - [`content`]: the [`content::HttpContent`] trait, the shared length cache
//!   and the concrete content types
//! - [`encoding`]: content encodings applied while writing
//!   ([`encoding::GzipEncoding`]) and the [`encoding::EncodedContent`] wrapper
//! - [`sink`]: the counting sink decorator used for length discovery
//!
//! # Length discovery
//!
//! Computing a content's length can be expensive: in the general case the only
//! way to learn it is to stream the whole body through a counting sink that
//! discards every byte. For a single-use source that full pass is also
//! destructive, so the default computation refuses to touch any content that
//! reports `retry_supported() == false` and returns "unknown" instead. Types
//! that know their length cheaply (a buffer, a file) override the computation
//! and skip the pass entirely.
//!
//! # Error Handling
//!
//! Streaming failures are plain [`std::io::Error`]s and propagate untouched to
//! the caller: a failed length computation surfaces from
//! [`content::HttpContent::length`], a failed write from
//! [`content::HttpContent::write_to`]. This layer never retries or suppresses;
//! retry policy belongs to the surrounding request pipeline, gated by
//! [`content::HttpContent::retry_supported`]. Construction-time failures that
//! are not I/O have their own error types ([`content::UrlEncodedError`],
//! [`content::MultipartError`]).
//!
//! # Limitations
//!
//! - Purely synchronous `std::io` streaming (no async sinks)
//! - Instances are not safe for concurrent use: the length cache is
//!   unsynchronized, use one content per in-flight request

pub mod content;
pub mod encoding;
pub mod sink;

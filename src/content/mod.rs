//! HTTP request content types.
//!
//! The central abstraction is the [`HttpContent`] trait: anything that can
//! stream its bytes into an output sink and answer the questions the request
//! pipeline asks before and after sending (media type, encoding, length,
//! retry support).
//!
//! # Architecture
//!
//! - [`HttpContent`]: the capability interface with default policies for
//!   length discovery and retry eligibility
//! - [`LengthCache`]: the shared once-only memoization state every content
//!   embeds and exposes through [`HttpContent::length_cache`]
//! - Concrete contents: [`BytesContent`], [`EmptyContent`], [`FileContent`],
//!   [`ReaderContent`], [`UrlEncodedContent`], [`MultipartContent`]
//!
//! Implementors only provide [`HttpContent::write_to`] and the cache
//! delegation; every other operation has a documented default that can be
//! customized independently.

mod bytes;
mod empty;
mod file;
mod form;
mod http_content;
mod multipart;
mod reader;

pub use bytes::BytesContent;
pub use http_content::{HttpContent, LengthCache};
pub use empty::EmptyContent;
pub use file::FileContent;
pub use form::{UrlEncodedContent, UrlEncodedError};
pub use multipart::{MultipartContent, MultipartError, Part};
pub use reader::ReaderContent;

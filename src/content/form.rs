use std::io;
use std::io::Write;

use bytes::Bytes;
use mime::Mime;
use serde::Serialize;
use thiserror::Error;

use crate::content::{HttpContent, LengthCache};

/// `application/x-www-form-urlencoded` request body.
///
/// The form is serialized once at construction, so a malformed value surfaces
/// as a [`UrlEncodedError`] up front instead of failing mid-write, and the
/// resulting content is replayable with a known length.
#[derive(Debug)]
pub struct UrlEncodedContent {
    encoded: Bytes,
    content_type: Mime,
    cache: LengthCache,
}

#[derive(Debug, Error)]
pub enum UrlEncodedError {
    #[error("failed to url-encode form data: {source}")]
    Serialize {
        #[from]
        source: serde_urlencoded::ser::Error,
    },
}

impl UrlEncodedContent {
    /// Serializes any [`Serialize`] value (a struct with named fields, a map,
    /// a sequence of pairs) into a form body.
    pub fn new<T: Serialize>(form: &T) -> Result<Self, UrlEncodedError> {
        let encoded = serde_urlencoded::to_string(form)?;
        Ok(Self {
            encoded: Bytes::from(encoded),
            content_type: mime::APPLICATION_WWW_FORM_URLENCODED,
            cache: LengthCache::new(),
        })
    }

    /// Builds a form body from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, UrlEncodedError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::new(&pairs)
    }

    /// Returns the encoded form bytes.
    pub fn encoded(&self) -> &Bytes {
        &self.encoded
    }
}

impl HttpContent for UrlEncodedContent {
    fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self.encoded)
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn content_type(&self) -> Option<&Mime> {
        Some(&self.content_type)
    }

    fn compute_length(&mut self) -> io::Result<Option<u64>> {
        Ok(Some(self.encoded.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_percent_encoded() {
        let mut content = UrlEncodedContent::from_pairs([("a", "1"), ("b", "two words")]).unwrap();

        let mut sink = Vec::new();
        content.write_to(&mut sink).unwrap();
        assert_eq!(sink, b"a=1&b=two+words");

        assert_eq!(content.length().unwrap(), Some(15));
    }

    #[test]
    fn test_serializes_structs() {
        #[derive(Serialize)]
        struct Login<'a> {
            user: &'a str,
            token: &'a str,
        }

        let mut content = UrlEncodedContent::new(&Login { user: "zava", token: "a&b=c" }).unwrap();

        let mut sink = Vec::new();
        content.write_to(&mut sink).unwrap();
        assert_eq!(sink, b"user=zava&token=a%26b%3Dc");
    }

    #[test]
    fn test_content_type_and_retry() {
        let content = UrlEncodedContent::from_pairs([("k", "v")]).unwrap();
        assert_eq!(content.content_type(), Some(&mime::APPLICATION_WWW_FORM_URLENCODED));
        assert!(content.retry_supported());
    }
}

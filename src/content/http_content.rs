use std::cell::Cell;
use std::io;
use std::io::Write;

use mime::Mime;
use tracing::trace;

use crate::sink::CountingWriter;

/// A logical HTTP request body.
///
/// A content produces its bytes into an output sink via [`write_to`] and
/// reports the metadata the request pipeline needs: media type, transfer
/// encoding, length and retry support. Apart from [`write_to`] and
/// [`length_cache`] every operation has a default implementation, so concrete
/// types customize only the behaviors they must.
///
/// Instances are not safe for concurrent use: the length cache is
/// unsynchronized and a single write may consume the underlying byte source.
/// Use one instance per in-flight request.
///
/// [`write_to`]: HttpContent::write_to
/// [`length_cache`]: HttpContent::length_cache
pub trait HttpContent {
    /// Writes the full content to `sink`.
    ///
    /// Whether this may be called more than once with identical resulting
    /// bytes is governed by [`retry_supported`](HttpContent::retry_supported).
    /// I/O errors propagate to the caller untouched.
    fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()>;

    /// Returns the cache backing the default [`length`](HttpContent::length)
    /// memoization. Implementors embed a [`LengthCache`] and delegate here.
    fn length_cache(&self) -> &LengthCache;

    /// Returns the media type of this content, or `None` if not specified.
    fn content_type(&self) -> Option<&Mime> {
        None
    }

    /// Returns the content encoding identifier (e.g. `"gzip"`), or `None` if
    /// the bytes are not encoded.
    fn encoding(&self) -> Option<&str> {
        None
    }

    /// Whether [`write_to`](HttpContent::write_to) can be invoked more than
    /// once with identical resulting bytes, permitting safe re-transmission
    /// after a failed send. Defaults to `true`; types wrapping single-use
    /// sources must return `false`.
    fn retry_supported(&self) -> bool {
        true
    }

    /// Computes the content length in bytes, or `None` if not known.
    ///
    /// The default streams the full content through a counting sink that
    /// discards every byte, so it costs a complete write pass. If
    /// [`retry_supported`](HttpContent::retry_supported) is `false` it returns
    /// `None` without touching the byte source, since measuring a single-use
    /// source would consume it before the real write. Types that know their
    /// length cheaply should override this to skip the pass.
    fn compute_length(&mut self) -> io::Result<Option<u64>> {
        if !self.retry_supported() {
            return Ok(None);
        }

        let mut counter = CountingWriter::new(io::sink());
        self.write_to(&mut counter)?;
        trace!(length = counter.count(), "content length measured with counting sink");
        Ok(Some(counter.count()))
    }

    /// Returns the content length in bytes, or `None` if not known.
    ///
    /// Delegates to [`compute_length`](HttpContent::compute_length) at most
    /// once per instance and caches the result for all later calls, so the
    /// pipeline may query it freely (once for the Content-Length header, once
    /// for logging, ...). A failed computation propagates the error and leaves
    /// the cache unset, so a later call computes again.
    ///
    /// Caching assumes the underlying byte source does not change for the life
    /// of the instance. Types whose bytes can change after construction must
    /// override this or invalidate the cache themselves.
    fn length(&mut self) -> io::Result<Option<u64>> {
        if let Some(length) = self.length_cache().computed() {
            return Ok(length);
        }

        let length = self.compute_length()?;
        self.length_cache().fill(length);
        Ok(length)
    }
}

/// Once-only memoization state for a content's computed length.
///
/// Holds an explicit `unset | computed(value)` tag: `computed(None)` means the
/// length was determined to be unknown, which is itself a cacheable answer.
/// The cell is unsynchronized, matching the single-threaded usage contract of
/// [`HttpContent`].
#[derive(Debug, Default)]
pub struct LengthCache {
    state: Cell<State>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Unset,
    Computed(Option<u64>),
}

impl LengthCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self { state: Cell::new(State::Unset) }
    }

    /// Returns the cached length, or `None` if nothing was computed yet.
    pub fn computed(&self) -> Option<Option<u64>> {
        match self.state.get() {
            State::Unset => None,
            State::Computed(length) => Some(length),
        }
    }

    /// Stores a computed length (`None` meaning "unknown").
    pub fn fill(&self, length: Option<u64>) {
        self.state.set(State::Computed(length));
    }

    /// Clears the cache so the next length query computes again.
    ///
    /// Never called automatically: a content whose bytes can change after
    /// construction decides itself when the cached value is stale.
    pub fn invalidate(&self) {
        self.state.set(State::Unset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A content with an instrumented write pass counter.
    struct TestContent {
        data: &'static [u8],
        retry: bool,
        fail_next_write: bool,
        write_passes: usize,
        cache: LengthCache,
    }

    impl TestContent {
        fn new(data: &'static [u8]) -> Self {
            Self { data, retry: true, fail_next_write: false, write_passes: 0, cache: LengthCache::new() }
        }
    }

    impl HttpContent for TestContent {
        fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
            self.write_passes += 1;
            if self.fail_next_write {
                self.fail_next_write = false;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            sink.write_all(self.data)
        }

        fn length_cache(&self) -> &LengthCache {
            &self.cache
        }

        fn retry_supported(&self) -> bool {
            self.retry
        }
    }

    /// A content overriding nothing but the required operations.
    struct MinimalContent {
        cache: LengthCache,
    }

    impl HttpContent for MinimalContent {
        fn write_to(&mut self, sink: &mut dyn Write) -> io::Result<()> {
            sink.write_all(b"minimal")
        }

        fn length_cache(&self) -> &LengthCache {
            &self.cache
        }
    }

    #[test]
    fn test_length_computed_once_and_cached() {
        let mut content = TestContent::new(&[0u8; 42]);

        assert_eq!(content.length().unwrap(), Some(42));
        assert_eq!(content.write_passes, 1);

        // second query answers from the cache, no second pass
        assert_eq!(content.length().unwrap(), Some(42));
        assert_eq!(content.write_passes, 1);
    }

    #[test]
    fn test_non_retryable_length_is_unknown_without_touching_source() {
        let mut content = TestContent::new(b"one-shot");
        content.retry = false;

        assert_eq!(content.length().unwrap(), None);
        assert_eq!(content.write_passes, 0);

        // the unknown answer is cached too
        assert_eq!(content.length().unwrap(), None);
        assert_eq!(content.write_passes, 0);
    }

    #[test]
    fn test_retryable_default_counts_exact_bytes() {
        let mut content = TestContent::new(b"0123456789");
        assert_eq!(content.compute_length().unwrap(), Some(10));
    }

    #[test]
    fn test_defaults() {
        let mut content = MinimalContent { cache: LengthCache::new() };

        assert!(content.retry_supported());
        assert!(content.encoding().is_none());
        assert!(content.content_type().is_none());
        assert_eq!(content.length().unwrap(), Some(7));
    }

    #[test]
    fn test_failed_computation_is_not_cached() {
        let mut content = TestContent::new(b"flaky");
        content.fail_next_write = true;

        let err = content.length().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(content.write_passes, 1);
        assert!(content.cache.computed().is_none());

        // a later call computes again and succeeds
        assert_eq!(content.length().unwrap(), Some(5));
        assert_eq!(content.write_passes, 2);
    }

    #[test]
    fn test_cache_states() {
        let cache = LengthCache::new();
        assert!(cache.computed().is_none());

        cache.fill(Some(42));
        assert_eq!(cache.computed(), Some(Some(42)));

        cache.fill(None);
        assert_eq!(cache.computed(), Some(None));

        cache.invalidate();
        assert!(cache.computed().is_none());
    }

    #[test]
    fn test_contents_are_object_safe() {
        let mut content: Box<dyn HttpContent> = Box::new(TestContent::new(b"boxed"));
        assert_eq!(content.length().unwrap(), Some(5));
    }
}

use std::io;
use std::io::Write;

use crate::content::{HttpContent, LengthCache};

/// A zero-byte request body.
#[derive(Debug, Default)]
pub struct EmptyContent {
    cache: LengthCache,
}

impl EmptyContent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpContent for EmptyContent {
    fn write_to(&mut self, _sink: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn compute_length(&mut self) -> io::Result<Option<u64>> {
        Ok(Some(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let mut content = EmptyContent::new();
        assert_eq!(content.length().unwrap(), Some(0));
        assert!(content.retry_supported());

        let mut sink = Vec::new();
        content.write_to(&mut sink).unwrap();
        assert!(sink.is_empty());
    }
}

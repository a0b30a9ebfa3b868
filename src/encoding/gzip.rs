use std::io;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::content::HttpContent;
use crate::encoding::ContentEncoding;

/// Gzip content encoding.
#[derive(Debug, Default)]
pub struct GzipEncoding {
    level: Compression,
}

impl GzipEncoding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks a compression level other than the flate2 default.
    #[must_use]
    pub fn with_level(level: Compression) -> Self {
        Self { level }
    }
}

impl ContentEncoding for GzipEncoding {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn encode(&self, content: &mut dyn HttpContent, sink: &mut dyn Write) -> io::Result<()> {
        let mut encoder = GzEncoder::new(sink, self.level);
        content.write_to(&mut encoder)?;
        encoder.try_finish()
    }
}

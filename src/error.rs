use enough::StopReason;

/// Errors from farbfeld decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FarbfeldError {
    #[error("stream does not contain a farbfeld image")]
    InvalidMagic,

    #[error("unexpected end of input while reading {0}")]
    TruncatedInput(Section),

    #[error("data must contain {expected} elements, got {actual}")]
    ArgumentError { expected: usize, actual: usize },

    #[error("write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("read failed: {0}")]
    Io(#[source] std::io::Error),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Part of the stream a truncation was detected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Header,
    PixelData,
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Section::Header => f.write_str("header"),
            Section::PixelData => f.write_str("pixel data"),
        }
    }
}

impl From<StopReason> for FarbfeldError {
    fn from(r: StopReason) -> Self {
        FarbfeldError::Cancelled(r)
    }
}

impl FarbfeldError {
    /// Map a read-side I/O error, treating EOF as truncation of `section`.
    pub(crate) fn from_read(err: std::io::Error, section: Section) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            FarbfeldError::TruncatedInput(section)
        } else {
            FarbfeldError::Io(err)
        }
    }
}

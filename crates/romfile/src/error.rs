//! Error types for ROM and save-data overlays

use thiserror::Error;

/// Errors that can occur when loading, viewing or saving a ROM image
#[derive(Debug, Error)]
pub enum RomError {
    /// Stream could not be read to completion or written in full
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Buffer length does not match the exact size of the record it holds
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual} bytes")]
    SizeMismatch {
        /// Size required by the record type
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },

    /// Segment region starts past the end of the buffer
    #[error("Segment offset {offset} is beyond buffer length {len}")]
    OffsetOutOfBounds {
        /// Configured segment offset
        offset: usize,
        /// Buffer length
        len: usize,
    },

    /// Segment region is not an exact multiple of the segment size
    #[error("Segment region of {region} bytes leaves a partial segment of size {segment_size}")]
    PartialSegment {
        /// Length of the segment region in bytes
        region: usize,
        /// Configured segment size
        segment_size: usize,
    },

    /// Segments must be at least one byte wide
    #[error("Segment size must be non-zero")]
    ZeroSegmentSize,

    /// Header record would extend into the segment region
    #[error("Header of {header_size} bytes overlaps segment region at offset {segment_offset}")]
    HeaderOverlap {
        /// Size of the header record
        header_size: usize,
        /// Configured segment offset
        segment_offset: usize,
    },

    /// Record layout reads past the size the record type declares
    #[error("Record layout runs past its declared size of {size} bytes")]
    RecordOverrun {
        /// Declared record size
        size: usize,
    },

    /// Requested segment count does not fit in addressable memory
    #[error("Layout for {count} segments of {segment_size} bytes at offset {segment_offset} overflows")]
    LayoutOverflow {
        /// Requested segment count
        count: usize,
        /// Configured segment size
        segment_size: usize,
        /// Configured segment offset
        segment_offset: usize,
    },

    /// Raw segment bytes supplied to a setter have the wrong length
    #[error("Segment length mismatch: expected {expected} bytes, got {actual} bytes")]
    SegmentLength {
        /// Configured segment size
        expected: usize,
        /// Length of the supplied slice
        actual: usize,
    },

    /// Segment index at or beyond the segment count
    #[error("Segment index {index} out of range (segment count {count})")]
    SegmentIndex {
        /// Requested index
        index: usize,
        /// Number of segments in the file
        count: usize,
    },

    /// Record type failed to decode or encode its bytes
    #[error("Record codec error: {0}")]
    Record(String),
}

impl RomError {
    /// Stream I/O failure
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Buffer or slice size does not satisfy the layout a view requires
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            Self::SizeMismatch { .. }
                | Self::OffsetOutOfBounds { .. }
                | Self::PartialSegment { .. }
                | Self::ZeroSegmentSize
                | Self::HeaderOverlap { .. }
                | Self::SegmentLength { .. }
                | Self::RecordOverrun { .. }
                | Self::LayoutOverflow { .. }
        )
    }

    /// Segment index out of range
    pub fn is_index(&self) -> bool {
        matches!(self, Self::SegmentIndex { .. })
    }
}

impl From<binrw::Error> for RomError {
    fn from(e: binrw::Error) -> Self {
        // Backtrace frames carry terminal colour codes; keep the cause only
        Self::Record(e.root_cause().to_string())
    }
}

/// Result type alias for ROM overlay operations
pub type Result<T> = std::result::Result<T, RomError>;

//! Segment region layout
//!
//! A segment region starts at `segment_offset` and runs to the end of the
//! buffer, cut into equal `segment_size` slices. The layout is a plain
//! value so it can be stored in a game definition file next to the record
//! types it describes:
//!
//! ```rust
//! use romfile::SegmentLayout;
//!
//! # fn main() -> romfile::Result<()> {
//! let layout = SegmentLayout::new(256, 8);
//! assert_eq!(layout.validate(1032)?, 4);
//! assert_eq!(layout.segment_range(3, 4)?, 776..1032);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, RomError};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Size and position of the repeating segment region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentLayout {
    /// Size of one segment in bytes
    pub segment_size: usize,
    /// Byte offset of the first segment
    #[serde(default)]
    pub segment_offset: usize,
}

impl SegmentLayout {
    /// Create a layout from a segment size and offset
    pub fn new(segment_size: usize, segment_offset: usize) -> Self {
        Self {
            segment_size,
            segment_offset,
        }
    }

    /// Layout whose segments are exactly one `S` record wide
    pub fn for_record<S: Record>(segment_offset: usize) -> Self {
        Self::new(S::SIZE, segment_offset)
    }

    /// Set the segment offset
    pub fn with_offset(mut self, segment_offset: usize) -> Self {
        self.segment_offset = segment_offset;
        self
    }

    /// Check a buffer length against this layout and return the segment count
    pub fn validate(&self, buffer_len: usize) -> Result<usize> {
        if self.segment_size == 0 {
            return Err(RomError::ZeroSegmentSize);
        }

        let Some(region) = buffer_len.checked_sub(self.segment_offset) else {
            return Err(RomError::OffsetOutOfBounds {
                offset: self.segment_offset,
                len: buffer_len,
            });
        };

        if region % self.segment_size != 0 {
            return Err(RomError::PartialSegment {
                region,
                segment_size: self.segment_size,
            });
        }

        Ok(region / self.segment_size)
    }

    /// Byte range of segment `index` in a file holding `count` segments
    pub fn segment_range(&self, index: usize, count: usize) -> Result<Range<usize>> {
        if index >= count {
            return Err(RomError::SegmentIndex { index, count });
        }

        let start = self.segment_offset + index * self.segment_size;
        Ok(start..start + self.segment_size)
    }

    /// Exact buffer length holding `count` segments
    pub fn buffer_len(&self, count: usize) -> Result<usize> {
        count
            .checked_mul(self.segment_size)
            .and_then(|region| region.checked_add(self.segment_offset))
            .ok_or(RomError::LayoutOverflow {
                count,
                segment_size: self.segment_size,
                segment_offset: self.segment_offset,
            })
    }
}

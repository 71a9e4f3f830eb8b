//! ROM images with a typed header and typed save segments
//!
//! A [`RomFile`] combines a header record at the start of the image with
//! an array of segment records starting at `segment_offset`:
//!
//! ```text
//! 0           H::SIZE         segment_offset                          len
//! | header (H) | unused gap    | segment 0 (S) | segment 1 (S) | ...   |
//! ```
//!
//! The header must end at or before `segment_offset`. A layout where the
//! two regions overlap is rejected when the file is built.
//!
//! ```rust
//! use binrw::{BinRead, BinWrite};
//! use romfile::{Record, RomFile};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
//! #[brw(little)]
//! struct Header {
//!     magic: u32,
//!     flags: u32,
//! }
//!
//! impl Record for Header {
//!     const SIZE: usize = 8;
//! }
//!
//! # fn main() -> romfile::Result<()> {
//! let mut rom = RomFile::<Header, [u8; 256]>::zeroed(1032, 8)?;
//! assert_eq!(rom.segment_count(), 4);
//!
//! rom.set_header(&Header { magic: 0x5352_4D31, flags: 1 })?;
//! rom.set_segment(3, &[0x11; 256])?;
//! assert_eq!(rom.get_segment(3)?, [0x11; 256]);
//! # Ok(())
//! # }
//! ```

use crate::blob::{BlobFile, RomImage, read_all, read_path};
use crate::error::{Result, RomError};
use crate::layout::SegmentLayout;
use crate::record::Record;
use crate::segment::{SegmentFile, TypedSegmentFile};
use crate::structure::StructFile;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

/// Unstructured ROM image
pub type RawRomFile = BlobFile;

/// ROM image that is a single record
pub type RomStructFile<T> = StructFile<T>;

/// ROM image with raw save segments and no typed header
pub type RomSegmentFile = SegmentFile;

/// ROM image with typed save segments and no typed header
pub type RomRecordSegmentFile<S> = TypedSegmentFile<S>;

/// Image with an `H` header at offset 0 and `S` segments at `segment_offset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomFile<H, S> {
    segments: TypedSegmentFile<S>,
    _header: PhantomData<H>,
}

impl<H: Record, S: Record> RomFile<H, S> {
    /// Take ownership of `buffer` with segments starting at `segment_offset`
    pub fn new(buffer: Vec<u8>, segment_offset: usize) -> Result<Self> {
        if segment_offset < H::SIZE {
            debug!(
                header_size = H::SIZE,
                segment_offset, "Rejecting overlapping header and segment region"
            );
            return Err(RomError::HeaderOverlap {
                header_size: H::SIZE,
                segment_offset,
            });
        }

        Ok(Self {
            segments: TypedSegmentFile::new(buffer, segment_offset)?,
            _header: PhantomData,
        })
    }

    /// Copy `bytes` into a new image
    pub fn from_bytes(bytes: &[u8], segment_offset: usize) -> Result<Self> {
        Self::new(bytes.to_vec(), segment_offset)
    }

    /// Load an image from a stream
    pub fn from_reader<R: Read>(reader: R, segment_offset: usize) -> Result<Self> {
        Self::new(read_all(reader)?, segment_offset)
    }

    /// Load an image from disk
    pub fn open(path: impl AsRef<Path>, segment_offset: usize) -> Result<Self> {
        Self::new(read_path(path.as_ref())?, segment_offset)
    }

    /// Zero-filled image of `size` bytes
    ///
    /// `size` must cover the header region plus a whole number of segments.
    pub fn zeroed(size: usize, segment_offset: usize) -> Result<Self> {
        Self::new(BlobFile::zeroed(size).into_bytes(), segment_offset)
    }

    /// Zero-filled image sized for exactly `count` segments
    pub fn with_segments(count: usize, segment_offset: usize) -> Result<Self> {
        Self::zeroed(
            SegmentLayout::for_record::<S>(segment_offset).buffer_len(count)?,
            segment_offset,
        )
    }

    /// Zero-filled image holding only the header region and no segments
    ///
    /// The image is `segment_offset` bytes long, so any gap between the
    /// header and the segment region is included. It is exactly `H::SIZE`
    /// bytes only when `segment_offset == H::SIZE`.
    pub fn header_only(segment_offset: usize) -> Result<Self> {
        Self::with_segments(0, segment_offset)
    }

    /// Segment size and offset
    pub fn layout(&self) -> SegmentLayout {
        self.segments.layout()
    }

    /// Number of whole segments in the image
    pub fn segment_count(&self) -> usize {
        self.segments.segment_count()
    }

    /// Borrow the raw header bytes
    pub fn header_bytes(&self) -> &[u8] {
        &self.as_bytes()[..H::SIZE]
    }

    /// Decode the header record
    pub fn get_header(&self) -> Result<H> {
        H::from_bytes(self.header_bytes())
    }

    /// Encode `value` over the header region
    pub fn set_header(&mut self, value: &H) -> Result<()> {
        value.write_into(&mut self.segments.blob_mut().as_mut_bytes()[..H::SIZE])
    }

    /// Decode, modify and write back the header
    pub fn update_header<F: FnOnce(&mut H)>(&mut self, f: F) -> Result<()> {
        let mut value = self.get_header()?;
        f(&mut value);
        self.set_header(&value)
    }

    /// Decode segment `index`
    pub fn get_segment(&self, index: usize) -> Result<S> {
        self.segments.get_segment(index)
    }

    /// Encode `value` over segment `index`
    pub fn set_segment(&mut self, index: usize, value: &S) -> Result<()> {
        self.segments.set_segment(index, value)
    }

    /// Decode, modify and write back segment `index`
    pub fn update_segment<F: FnOnce(&mut S)>(&mut self, index: usize, f: F) -> Result<()> {
        self.segments.update_segment(index, f)
    }

    /// Decode every segment in order
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Result<S>> {
        self.segments.segments()
    }

    /// Header-less view of the segment array
    pub fn as_segments(&self) -> &TypedSegmentFile<S> {
        &self.segments
    }

    /// Consume the file and return its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.segments.into_bytes()
    }
}

impl<H, S> RomImage for RomFile<H, S> {
    fn blob(&self) -> &BlobFile {
        self.segments.blob()
    }
}

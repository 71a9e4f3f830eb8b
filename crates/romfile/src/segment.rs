//! Repeating segment overlays
//!
//! Save images usually hold several identical slots back to back. A
//! [`SegmentFile`] exposes the region starting at the layout's
//! `segment_offset` as an array of raw `segment_size` slices, and a
//! [`TypedSegmentFile`] overlays each slice with a record type.
//!
//! ```rust
//! use romfile::{RomImage, SegmentFile, SegmentLayout};
//!
//! # fn main() -> romfile::Result<()> {
//! let mut file = SegmentFile::zeroed(1032, SegmentLayout::new(256, 8))?;
//! assert_eq!(file.segment_count(), 4);
//!
//! file.set_segment(3, &[0xAB; 256])?;
//! assert_eq!(file.as_bytes()[776], 0xAB);
//! assert!(file.get_segment(4).is_err());
//! # Ok(())
//! # }
//! ```

use crate::blob::{BlobFile, RomImage, read_all, read_path};
use crate::error::{Result, RomError};
use crate::layout::SegmentLayout;
use crate::record::Record;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, trace};

/// Image whose tail is an array of equal-size raw segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFile {
    blob: BlobFile,
    layout: SegmentLayout,
    segment_count: usize,
}

impl SegmentFile {
    /// Take ownership of `buffer` and validate it against `layout`
    pub fn new(buffer: Vec<u8>, layout: SegmentLayout) -> Result<Self> {
        let segment_count = match layout.validate(buffer.len()) {
            Ok(count) => count,
            Err(e) => {
                debug!(
                    len = buffer.len(),
                    segment_size = layout.segment_size,
                    segment_offset = layout.segment_offset,
                    "Rejecting segmented image: {}",
                    e
                );
                return Err(e);
            }
        };

        debug!(
            len = buffer.len(),
            segment_size = layout.segment_size,
            segment_offset = layout.segment_offset,
            segment_count,
            "Loaded segmented image"
        );

        Ok(Self {
            blob: BlobFile::new(buffer),
            layout,
            segment_count,
        })
    }

    /// Copy `bytes` into a new segmented image
    pub fn from_bytes(bytes: &[u8], layout: SegmentLayout) -> Result<Self> {
        Self::new(bytes.to_vec(), layout)
    }

    /// Load a segmented image from a stream
    pub fn from_reader<R: Read>(reader: R, layout: SegmentLayout) -> Result<Self> {
        Self::new(read_all(reader)?, layout)
    }

    /// Load a segmented image from disk
    pub fn open(path: impl AsRef<Path>, layout: SegmentLayout) -> Result<Self> {
        Self::new(read_path(path.as_ref())?, layout)
    }

    /// Zero-filled image of `size` bytes
    pub fn zeroed(size: usize, layout: SegmentLayout) -> Result<Self> {
        Self::new(BlobFile::zeroed(size).into_bytes(), layout)
    }

    /// Zero-filled image sized for exactly `count` segments
    pub fn with_segments(count: usize, layout: SegmentLayout) -> Result<Self> {
        Self::zeroed(layout.buffer_len(count)?, layout)
    }

    /// Segment size and offset
    pub fn layout(&self) -> SegmentLayout {
        self.layout
    }

    /// Size of one segment in bytes
    pub fn segment_size(&self) -> usize {
        self.layout.segment_size
    }

    /// Byte offset of the first segment
    pub fn segment_offset(&self) -> usize {
        self.layout.segment_offset
    }

    /// Number of whole segments in the image
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Borrow the bytes of segment `index`
    pub fn segment_bytes(&self, index: usize) -> Result<&[u8]> {
        let range = self.layout.segment_range(index, self.segment_count)?;
        Ok(&self.blob.as_bytes()[range])
    }

    /// Copy of the bytes of segment `index`
    pub fn get_segment(&self, index: usize) -> Result<Vec<u8>> {
        self.segment_bytes(index).map(<[u8]>::to_vec)
    }

    /// Overwrite segment `index` with `bytes`, which must be one segment long
    pub fn set_segment(&mut self, index: usize, bytes: &[u8]) -> Result<()> {
        let slot = self.segment_bytes_mut(index)?;
        if bytes.len() != slot.len() {
            return Err(RomError::SegmentLength {
                expected: slot.len(),
                actual: bytes.len(),
            });
        }

        slot.copy_from_slice(bytes);
        Ok(())
    }

    /// Iterate over the raw bytes of every segment in order
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.blob.as_bytes()[self.layout.segment_offset..].chunks_exact(self.layout.segment_size)
    }

    /// Consume the file and return its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.blob.into_bytes()
    }

    pub(crate) fn segment_bytes_mut(&mut self, index: usize) -> Result<&mut [u8]> {
        let range = self.layout.segment_range(index, self.segment_count)?;
        trace!(index, start = range.start, "Writing segment");
        Ok(&mut self.blob.as_mut_bytes()[range])
    }

    pub(crate) fn blob_mut(&mut self) -> &mut BlobFile {
        &mut self.blob
    }
}

impl RomImage for SegmentFile {
    fn blob(&self) -> &BlobFile {
        &self.blob
    }
}

/// Segmented image whose segments are `S` records
///
/// The segment size is always `S::SIZE`; only the offset of the first
/// segment is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedSegmentFile<S> {
    raw: SegmentFile,
    _segment: PhantomData<S>,
}

impl<S: Record> TypedSegmentFile<S> {
    /// Take ownership of `buffer` with segments starting at `segment_offset`
    pub fn new(buffer: Vec<u8>, segment_offset: usize) -> Result<Self> {
        let raw = SegmentFile::new(buffer, SegmentLayout::for_record::<S>(segment_offset))?;
        Ok(Self {
            raw,
            _segment: PhantomData,
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

    /// Segment size and offset
    pub fn layout(&self) -> SegmentLayout {
        self.raw.layout()
    }

    /// Number of whole segments in the image
    pub fn segment_count(&self) -> usize {
        self.raw.segment_count()
    }

    /// Decode segment `index`
    pub fn get_segment(&self, index: usize) -> Result<S> {
        S::from_bytes(self.raw.segment_bytes(index)?)
    }

    /// Encode `value` over segment `index`
    pub fn set_segment(&mut self, index: usize, value: &S) -> Result<()> {
        value.write_into(self.raw.segment_bytes_mut(index)?)
    }

    /// Decode, modify and write back segment `index`
    pub fn update_segment<F: FnOnce(&mut S)>(&mut self, index: usize, f: F) -> Result<()> {
        let mut value = self.get_segment(index)?;
        f(&mut value);
        self.set_segment(index, &value)
    }

    /// Decode every segment in order
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Result<S>> {
        self.raw.segments().map(S::from_bytes)
    }

    /// Untyped view of the same image
    pub fn as_raw(&self) -> &SegmentFile {
        &self.raw
    }

    /// Consume the file and return its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.raw.into_bytes()
    }

    pub(crate) fn blob_mut(&mut self) -> &mut BlobFile {
        self.raw.blob_mut()
    }
}

impl<S> RomImage for TypedSegmentFile<S> {
    fn blob(&self) -> &BlobFile {
        self.raw.blob()
    }
}

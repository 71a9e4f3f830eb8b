//! Typed overlays for ROM and save-data images
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format handling
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
//! This crate treats a raw byte buffer as fixed binary layouts without
//! copying it into a different representation. The buffer is loaded once,
//! from a slice, a stream or as a zero-filled allocation, and every typed
//! accessor reads and writes through the same storage until it is saved.
//!
//! # File Types
//!
//! - **[`BlobFile`]**: Raw image, no interpretation
//! - **[`StructFile`]**: Whole image is exactly one record
//! - **[`SegmentFile`]**: Image tail is an array of equal-size raw segments
//! - **[`TypedSegmentFile`]**: Segments overlaid with a record type
//! - **[`RomFile`]**: Header record followed by typed segments
//!
//! Record types implement [`Record`], usually by deriving `binrw`'s
//! `BinRead`/`BinWrite` and declaring their encoded size.
//!
//! # Guarantees
//!
//! - **Exact Sizes**: Images whose length does not fit the layout are
//!   rejected at construction, never truncated or padded
//! - **Bounded Indexing**: Segment indices past the segment count fail
//! - **Pure Saves**: Saving copies or writes the current bytes verbatim
//!
//! ```rust
//! use romfile::{RomImage, TypedSegmentFile};
//!
//! # fn main() -> romfile::Result<()> {
//! let mut sram = TypedSegmentFile::<[u8; 32]>::with_segments(3, 0)?;
//! sram.set_segment(2, &[0xFF; 32])?;
//!
//! let saved = sram.save();
//! let reloaded = TypedSegmentFile::<[u8; 32]>::from_bytes(&saved, 0)?;
//! assert_eq!(reloaded.get_segment(2)?, [0xFF; 32]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod blob;
pub mod error;
pub mod layout;
pub mod record;
/// Header plus segment images and the ROM-family type names
pub mod rom;
pub mod segment;
/// Single-record images
pub mod structure;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use blob::{BlobFile, RomImage};
pub use error::{Result, RomError};
pub use layout::SegmentLayout;
pub use record::Record;
pub use rom::{RawRomFile, RomFile, RomRecordSegmentFile, RomSegmentFile, RomStructFile};
pub use segment::{SegmentFile, TypedSegmentFile};
pub use structure::StructFile;

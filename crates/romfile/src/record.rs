//! Fixed-size record capability
//!
//! A record is any value type with a statically known byte size and an
//! exact binary layout. The overlay types in this crate never inspect a
//! record's fields; they only move `SIZE` bytes in and out of a buffer
//! through this trait.
//!
//! Record types derive `BinRead`/`BinWrite` and pick their own byte order
//! with `#[brw(little)]` or `#[brw(big)]`. Without an attribute fields are
//! read little-endian.
//!
//! ```rust
//! use binrw::{BinRead, BinWrite};
//! use romfile::Record;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
//! #[brw(little)]
//! struct SaveSlot {
//!     checksum: u16,
//!     lives: u8,
//!     stage: u8,
//! }
//!
//! impl Record for SaveSlot {
//!     const SIZE: usize = 4;
//! }
//!
//! # fn main() -> romfile::Result<()> {
//! let slot = SaveSlot::from_bytes(&[0x34, 0x12, 3, 7])?;
//! assert_eq!(slot.checksum, 0x1234);
//! assert_eq!(slot.to_bytes()?, vec![0x34, 0x12, 3, 7]);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, RomError};
use binrw::{BinRead, BinWrite, Endian};
use std::io::Cursor;

/// A fixed-size value type that can be overlaid onto raw bytes
pub trait Record: Sized + for<'a> BinRead<Args<'a> = ()> + for<'a> BinWrite<Args<'a> = ()> {
    /// Exact encoded size in bytes
    const SIZE: usize;

    /// Decode a record from exactly `SIZE` bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::SIZE {
            return Err(RomError::SizeMismatch {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }

        let mut cursor = Cursor::new(bytes);
        let value = match Self::read_options(&mut cursor, Endian::Little, ()) {
            Ok(value) => value,
            // A layout that runs past SIZE means SIZE is declared too small
            Err(e) if e.is_eof() => return Err(RomError::RecordOverrun { size: Self::SIZE }),
            Err(e) => return Err(e.into()),
        };

        // A layout that stops short of SIZE means SIZE is declared wrong
        let consumed = cursor.position() as usize;
        if consumed != Self::SIZE {
            return Err(RomError::SizeMismatch {
                expected: Self::SIZE,
                actual: consumed,
            });
        }

        Ok(value)
    }

    /// Encode the record into a freshly allocated `SIZE`-byte buffer
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(Self::SIZE));
        self.write_options(&mut cursor, Endian::Little, ())?;

        let bytes = cursor.into_inner();
        if bytes.len() != Self::SIZE {
            return Err(RomError::SizeMismatch {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }

        Ok(bytes)
    }

    /// Encode the record over `out`, which must be exactly `SIZE` bytes
    ///
    /// `out` is left untouched if encoding fails.
    fn write_into(&self, out: &mut [u8]) -> Result<()> {
        if out.len() != Self::SIZE {
            return Err(RomError::SizeMismatch {
                expected: Self::SIZE,
                actual: out.len(),
            });
        }

        let bytes = self.to_bytes()?;
        out.copy_from_slice(&bytes);
        Ok(())
    }
}

impl<const N: usize> Record for [u8; N] {
    const SIZE: usize = N;
}

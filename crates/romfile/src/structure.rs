//! Whole-image record overlay
//!
//! A [`StructFile`] treats its entire buffer as exactly one `T` record.
//! Every constructor checks that the buffer is precisely `T::SIZE` bytes,
//! which is what rejects truncated or foreign images before any field is
//! read.

use crate::blob::{BlobFile, RomImage, read_all, read_path};
use crate::error::{Result, RomError};
use crate::record::Record;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

/// Image consisting of a single fixed-size record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructFile<T> {
    blob: BlobFile,
    _record: PhantomData<T>,
}

impl<T: Record> StructFile<T> {
    /// Take ownership of `buffer`, which must be exactly `T::SIZE` bytes
    pub fn new(buffer: Vec<u8>) -> Result<Self> {
        if buffer.len() != T::SIZE {
            debug!(
                expected = T::SIZE,
                actual = buffer.len(),
                "Rejecting record image with wrong size"
            );
            return Err(RomError::SizeMismatch {
                expected: T::SIZE,
                actual: buffer.len(),
            });
        }

        Ok(Self {
            blob: BlobFile::new(buffer),
            _record: PhantomData,
        })
    }

    /// Copy `bytes` into a new record image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }

    /// Load a record image from a stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::new(read_all(reader)?)
    }

    /// Load a record image from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(read_path(path.as_ref())?)
    }

    /// Zero-filled image sized for one `T`
    pub fn zeroed() -> Self {
        Self {
            blob: BlobFile::zeroed(T::SIZE),
            _record: PhantomData,
        }
    }

    /// Image holding the encoding of `value`
    pub fn from_record(value: &T) -> Result<Self> {
        Self::new(value.to_bytes()?)
    }

    /// Decode the record from the current buffer
    pub fn get(&self) -> Result<T> {
        T::from_bytes(self.blob.as_bytes())
    }

    /// Overwrite the buffer with the encoding of `value`
    pub fn set(&mut self, value: &T) -> Result<()> {
        value.write_into(self.blob.as_mut_bytes())
    }

    /// Decode, modify and write back the record
    pub fn update<F: FnOnce(&mut T)>(&mut self, f: F) -> Result<()> {
        let mut value = self.get()?;
        f(&mut value);
        self.set(&value)
    }

    /// Consume the file and return its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.blob.into_bytes()
    }
}

impl<T> RomImage for StructFile<T> {
    fn blob(&self) -> &BlobFile {
        &self.blob
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{CartHeader, SaveSlot};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_exact_size_required() {
        assert!(StructFile::<SaveSlot>::from_bytes(&[0u8; 8]).is_ok());

        for len in [0, 7, 9, 16] {
            let err = StructFile::<SaveSlot>::new(vec![0; len]).unwrap_err();
            assert!(err.is_layout(), "length {len} should be rejected");
        }
    }

    #[test]
    fn test_get_reflects_buffer() {
        let bytes = [0x34, 0x12, 2, 5, 0x10, 0, 0, 0];
        let file = StructFile::<SaveSlot>::from_bytes(&bytes).unwrap();

        let slot = file.get().unwrap();
        assert_eq!(slot.checksum, 0x1234);
        assert_eq!(slot.lives, 2);
        assert_eq!(slot.stage, 5);
        assert_eq!(slot.score, 16);
        assert_eq!(slot.to_bytes().unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_set_writes_through() {
        let mut file = StructFile::<SaveSlot>::zeroed();
        let before = file.get().unwrap();

        let slot = SaveSlot::with_score(900);
        file.set(&slot).unwrap();

        assert_eq!(before, SaveSlot::default());
        assert_eq!(file.get().unwrap(), slot);
        assert_eq!(file.save(), slot.to_bytes().unwrap());
    }

    #[test]
    fn test_update() {
        let mut file = StructFile::from_record(&CartHeader {
            magic: *b"ROM1",
            version: 1,
            slot_count: 2,
        })
        .unwrap();

        file.update(|h| h.version = 3).unwrap();
        assert_eq!(file.get().unwrap().version, 3);
        assert_eq!(&file.as_bytes()[4..6], &[0, 3]);
    }

    #[test]
    fn test_from_reader_size_checked() {
        let file = StructFile::<CartHeader>::from_reader(Cursor::new(vec![1u8; 8])).unwrap();
        assert_eq!(file.len(), 8);

        let err = StructFile::<CartHeader>::from_reader(Cursor::new(vec![1u8; 5])).unwrap_err();
        assert!(matches!(
            err,
            RomError::SizeMismatch {
                expected: 8,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_path_round_trip() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("header.bin");

        let slot = SaveSlot::with_score(77);
        StructFile::from_record(&slot)
            .unwrap()
            .save_to_path(&path)
            .unwrap();

        let reopened = StructFile::<SaveSlot>::open(&path).unwrap();
        assert_eq!(reopened.get().unwrap(), slot);
    }
}

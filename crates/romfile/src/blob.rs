//! Raw byte image with load and save support
//!
//! [`BlobFile`] owns the backing buffer every other file type is built on.
//! It can be created from a copied slice, from a stream read to completion
//! or as a zero-filled allocation. The buffer is never resized afterwards.

use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Read a stream to completion into a new buffer
pub(crate) fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    debug!(len = buffer.len(), "Read image from stream");
    Ok(buffer)
}

/// Read a file from disk into a new buffer
pub(crate) fn read_path(path: &Path) -> Result<Vec<u8>> {
    debug!("Opening image {}", path.display());
    read_all(BufReader::new(File::open(path)?))
}

/// Non-interpreted ROM or save image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobFile {
    buffer: Vec<u8>,
}

impl BlobFile {
    /// Take ownership of an existing buffer
    pub fn new(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Copy `bytes` into a newly owned buffer
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    /// Load the whole stream into a newly owned buffer
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(read_all(reader)?))
    }

    /// Allocate a zero-filled buffer of `size` bytes
    pub fn zeroed(size: usize) -> Self {
        debug!(size, "Allocating zeroed image");
        Self::new(vec![0; size])
    }

    /// Load a file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(read_path(path.as_ref())?))
    }

    /// Consume the file and return its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

/// Read access and saving shared by every file type
///
/// Saving never mutates the image; the same bytes can be saved repeatedly.
pub trait RomImage {
    /// Backing image
    fn blob(&self) -> &BlobFile;

    /// Copy of the current buffer contents
    fn save(&self) -> Vec<u8> {
        self.blob().buffer.clone()
    }

    /// Write the current buffer contents to a stream in full
    fn save_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let buffer = self.as_bytes();
        writer.write_all(buffer)?;
        writer.flush()?;
        debug!(len = buffer.len(), "Wrote image to stream");
        Ok(())
    }

    /// Write the current buffer contents to a file, replacing it
    fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving image to {}", path.display());
        self.save_to(BufWriter::new(File::create(path)?))
    }

    /// Buffer length in bytes
    fn len(&self) -> usize {
        self.blob().buffer.len()
    }

    /// Whether the buffer is empty
    fn is_empty(&self) -> bool {
        self.blob().buffer.is_empty()
    }

    /// Borrow the live buffer
    fn as_bytes(&self) -> &[u8] {
        &self.blob().buffer
    }
}

impl RomImage for BlobFile {
    fn blob(&self) -> &BlobFile {
        self
    }
}

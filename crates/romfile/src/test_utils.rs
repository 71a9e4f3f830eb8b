//! Record fixtures shared by the unit tests

use crate::record::Record;
use binrw::{BinRead, BinWrite};

/// 8-byte little-endian save slot
#[derive(Debug, Clone, Default, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct SaveSlot {
    pub checksum: u16,
    pub lives: u8,
    pub stage: u8,
    pub score: u32,
}

impl Record for SaveSlot {
    const SIZE: usize = 8;
}

impl SaveSlot {
    pub fn with_score(score: u32) -> Self {
        Self {
            checksum: (score & 0xFFFF) as u16,
            lives: 3,
            stage: 1,
            score,
        }
    }
}

/// 8-byte big-endian cartridge header
#[derive(Debug, Clone, Default, PartialEq, Eq, BinRead, BinWrite)]
#[brw(big)]
pub struct CartHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub slot_count: u16,
}

impl Record for CartHeader {
    const SIZE: usize = 8;
}

/// Fill a buffer with a repeating, position-dependent pattern
pub fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

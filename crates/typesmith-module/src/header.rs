//! Module file header (64 bytes).

use super::{HEADER_SIZE, MAGIC, VERSION};

/// Header flags (bit field).
pub mod flags {
    /// Bit 0: module belongs to the generating framework itself.
    pub const FRAMEWORK: u16 = 0x0001;
}

/// File header: the first 64 bytes of a module file.
///
/// All section offsets are absolute byte offsets from the start of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Header {
    /// Magic bytes: b"TSMD"
    pub magic: [u8; 4],
    /// Format version (currently 1)
    pub version: u32,
    /// CRC32 checksum of everything after the header
    pub checksum: u32,
    /// Total file size in bytes
    pub total_size: u32,

    pub str_blob_offset: u32,
    pub str_table_offset: u32,
    pub type_defs_offset: u32,
    pub members_offset: u32,

    /// Version of the module itself (part of its identity).
    pub module_version: u32,

    pub str_table_count: u16,
    pub type_defs_count: u16,
    pub members_count: u16,
    /// StringId of the module name.
    pub name: u16,
    /// Header flags (see `flags` module for bit definitions).
    pub flags: u16,
    pub(crate) _reserved: [u8; 18],
}

const _: () = assert!(std::mem::size_of::<Header>() == HEADER_SIZE);

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            str_blob_offset: 0,
            str_table_offset: 0,
            type_defs_offset: 0,
            members_offset: 0,
            module_version: 0,
            str_table_count: 0,
            type_defs_count: 0,
            members_count: 0,
            name: 0,
            flags: 0,
            _reserved: [0; 18],
        }
    }
}

#[inline]
fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

impl Header {
    /// Decode header from 64 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        let mut reserved = [0u8; 18];
        reserved.copy_from_slice(&bytes[46..64]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32_at(bytes, 4),
            checksum: u32_at(bytes, 8),
            total_size: u32_at(bytes, 12),
            str_blob_offset: u32_at(bytes, 16),
            str_table_offset: u32_at(bytes, 20),
            type_defs_offset: u32_at(bytes, 24),
            members_offset: u32_at(bytes, 28),
            module_version: u32_at(bytes, 32),
            str_table_count: u16_at(bytes, 36),
            type_defs_count: u16_at(bytes, 38),
            members_count: u16_at(bytes, 40),
            name: u16_at(bytes, 42),
            flags: u16_at(bytes, 44),
            _reserved: reserved,
        }
    }

    /// Encode header to 64 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.str_blob_offset.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.str_table_offset.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.type_defs_offset.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.members_offset.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.module_version.to_le_bytes());
        bytes[36..38].copy_from_slice(&self.str_table_count.to_le_bytes());
        bytes[38..40].copy_from_slice(&self.type_defs_count.to_le_bytes());
        bytes[40..42].copy_from_slice(&self.members_count.to_le_bytes());
        bytes[42..44].copy_from_slice(&self.name.to_le_bytes());
        bytes[44..46].copy_from_slice(&self.flags.to_le_bytes());
        bytes[46..64].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    pub fn is_framework(&self) -> bool {
        self.flags & flags::FRAMEWORK != 0
    }

    pub fn set_framework(&mut self, framework: bool) {
        if framework {
            self.flags |= flags::FRAMEWORK;
        } else {
            self.flags &= !flags::FRAMEWORK;
        }
    }
}

//! Module format constants.

/// Magic bytes identifying a typesmith module file.
pub const MAGIC: [u8; 4] = *b"TSMD";

/// Current module format version.
pub const VERSION: u32 = 1;

/// Header size in bytes. The checksum covers everything after it.
pub const HEADER_SIZE: usize = 64;

/// Section alignment in bytes.
pub const SECTION_ALIGN: usize = 64;

/// Size of one entry in the type definition table.
pub const TYPE_DEF_SIZE: usize = 12;

/// Size of one entry in the member table.
pub const MEMBER_SIZE: usize = 12;

/// Round `offset` up to the next section boundary.
pub const fn align_to_section(offset: usize) -> usize {
    (offset + SECTION_ALIGN - 1) & !(SECTION_ALIGN - 1)
}

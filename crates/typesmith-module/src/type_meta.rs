//! Type metadata entries for the module format.
//!
//! Two fixed-size tables:
//! - TypeDefs: one 12-byte entry per type
//! - Members: 12-byte entries referenced by a contiguous range from a TypeDef

use super::{MEMBER_SIZE, StringId, TYPE_DEF_SIZE};

/// Kind of a declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeKind {
    Class = 0,
    Struct = 1,
    Interface = 2,
    Enum = 3,
}

impl TypeKind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Class),
            1 => Some(Self::Struct),
            2 => Some(Self::Interface),
            3 => Some(Self::Enum),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Enum => "enum",
        }
    }

    /// Enum members carry values instead of types.
    pub fn is_enum(self) -> bool {
        self == Self::Enum
    }
}

/// TypeDef flags.
pub mod type_flags {
    pub const PUBLIC: u8 = 0x01;
}

/// Member flags.
pub mod member_flags {
    pub const OPTIONAL: u16 = 0x0001;
    pub const LIST: u16 = 0x0002;
}

/// Type definition entry (12 bytes).
///
/// `kind` is kept raw so that a corrupted byte surfaces as an enumeration
/// failure for this one type instead of failing the header check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub namespace: StringId,
    pub name: StringId,
    /// Full name of the base type, `StringId::NONE` when there is none.
    pub base: StringId,
    pub member_start: u16,
    pub member_count: u16,
    pub kind: u8,
    pub flags: u8,
}

impl TypeDef {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= TYPE_DEF_SIZE);
        Self {
            namespace: StringId(u16::from_le_bytes([bytes[0], bytes[1]])),
            name: StringId(u16::from_le_bytes([bytes[2], bytes[3]])),
            base: StringId(u16::from_le_bytes([bytes[4], bytes[5]])),
            member_start: u16::from_le_bytes([bytes[6], bytes[7]]),
            member_count: u16::from_le_bytes([bytes[8], bytes[9]]),
            kind: bytes[10],
            flags: bytes[11],
        }
    }

    pub fn to_bytes(&self) -> [u8; TYPE_DEF_SIZE] {
        let mut bytes = [0u8; TYPE_DEF_SIZE];
        bytes[0..2].copy_from_slice(&self.namespace.get().to_le_bytes());
        bytes[2..4].copy_from_slice(&self.name.get().to_le_bytes());
        bytes[4..6].copy_from_slice(&self.base.get().to_le_bytes());
        bytes[6..8].copy_from_slice(&self.member_start.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.member_count.to_le_bytes());
        bytes[10] = self.kind;
        bytes[11] = self.flags;
        bytes
    }

    pub fn kind(&self) -> Option<TypeKind> {
        TypeKind::from_u8(self.kind)
    }

    pub fn is_public(&self) -> bool {
        self.flags & type_flags::PUBLIC != 0
    }
}

/// Field or enum variant entry (12 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberDef {
    pub name: StringId,
    /// Full name of the member type, `StringId::NONE` for enum variants.
    pub type_name: StringId,
    pub flags: u16,
    /// Variant value (enums only).
    pub value: i32,
}

impl MemberDef {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= MEMBER_SIZE);
        Self {
            name: StringId(u16::from_le_bytes([bytes[0], bytes[1]])),
            type_name: StringId(u16::from_le_bytes([bytes[2], bytes[3]])),
            flags: u16::from_le_bytes([bytes[4], bytes[5]]),
            value: i32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; MEMBER_SIZE] {
        let mut bytes = [0u8; MEMBER_SIZE];
        bytes[0..2].copy_from_slice(&self.name.get().to_le_bytes());
        bytes[2..4].copy_from_slice(&self.type_name.get().to_le_bytes());
        bytes[4..6].copy_from_slice(&self.flags.to_le_bytes());
        // bytes 6..8 are padding
        bytes[8..12].copy_from_slice(&self.value.to_le_bytes());
        bytes
    }

    pub fn is_optional(&self) -> bool {
        self.flags & member_flags::OPTIONAL != 0
    }

    pub fn is_list(&self) -> bool {
        self.flags & member_flags::LIST != 0
    }
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! TSMD binary module format.
//!
//! A module file carries the public type metadata of one compiled unit:
//! - [`Header`]: magic, format version, checksum, section offsets, module identity
//! - string table: deduplicated UTF-8 strings addressed by [`StringId`]
//! - type table: [`TypeDef`] entries with contiguous [`MemberDef`] ranges
//!
//! [`Module`] reads and validates files (heap copy or memory map);
//! [`ModuleBuilder`] writes them.

mod builder;
mod constants;
mod dump;
mod header;
mod ids;
mod module;
mod type_info;
mod type_meta;

#[cfg(test)]
mod header_tests;

pub use builder::{BuildError, ModuleBuilder, StringTableBuilder};
pub use constants::{
    HEADER_SIZE, MAGIC, MEMBER_SIZE, SECTION_ALIGN, TYPE_DEF_SIZE, VERSION, align_to_section,
};
pub use dump::dump;
pub use header::{Header, flags};
pub use ids::StringId;
pub use module::{
    ByteStorage, EnumerationError, Module, ModuleError, StringError, StringsView, TypeError,
    TypeLoadFailure, TypesView,
};
pub use type_info::{MemberInfo, TypeInfo};
pub use type_meta::{MemberDef, TypeDef, TypeKind, member_flags, type_flags};

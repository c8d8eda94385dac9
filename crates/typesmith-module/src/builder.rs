//! Module writer.
//!
//! Lays out a module file from owned [`TypeInfo`] values:
//! header, string blob, string table, type defs, members, each section
//! aligned to [`SECTION_ALIGN`](crate::SECTION_ALIGN).

use std::collections::HashMap;
use std::io;
use std::path::Path;

use super::header::Header;
use super::type_meta::{MemberDef, TypeDef, member_flags, type_flags};
use super::{HEADER_SIZE, MEMBER_SIZE, StringId, TYPE_DEF_SIZE, TypeInfo, align_to_section};

/// Errors produced while writing a module.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("too many strings: {0} (maximum 65535)")]
    TooManyStrings(usize),
    #[error("too many types: {0} (maximum 65535)")]
    TooManyTypes(usize),
    #[error("too many members: {0} (maximum 65535)")]
    TooManyMembers(usize),
    #[error("module name cannot be empty")]
    EmptyName,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Builds the string table, deduplicating identical strings.
///
/// `StringId(0)` is the empty string and doubles as "no value".
#[derive(Debug)]
pub struct StringTableBuilder {
    lookup: HashMap<String, StringId>,
    strings: Vec<String>,
}

impl Default for StringTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StringTableBuilder {
    pub fn new() -> Self {
        let mut lookup = HashMap::new();
        lookup.insert(String::new(), StringId::NONE);
        Self {
            lookup,
            strings: vec![String::new()],
        }
    }

    pub fn intern(&mut self, s: &str) -> Result<StringId, BuildError> {
        if let Some(&id) = self.lookup.get(s) {
            return Ok(id);
        }
        if self.strings.len() >= u16::MAX as usize {
            return Err(BuildError::TooManyStrings(self.strings.len() + 1));
        }
        let id = StringId(self.strings.len() as u16);
        self.strings.push(s.to_string());
        self.lookup.insert(s.to_string(), id);
        Ok(id)
    }

    fn intern_opt(&mut self, s: Option<&str>) -> Result<StringId, BuildError> {
        match s {
            Some(s) => self.intern(s),
            None => Ok(StringId::NONE),
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Emit `(blob, table)`. The table has `len() + 1` offsets.
    pub fn emit(&self) -> (Vec<u8>, Vec<u8>) {
        let mut blob = Vec::new();
        let mut table = Vec::with_capacity((self.strings.len() + 1) * 4);
        for s in &self.strings {
            table.extend_from_slice(&(blob.len() as u32).to_le_bytes());
            blob.extend_from_slice(s.as_bytes());
        }
        table.extend_from_slice(&(blob.len() as u32).to_le_bytes());
        (blob, table)
    }
}

/// Writes a module file.
#[derive(Clone, Debug)]
pub struct ModuleBuilder {
    name: String,
    version: u32,
    framework: bool,
    types: Vec<TypeInfo>,
}

impl ModuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            framework: false,
            types: Vec::new(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Mark the module as part of the generating framework.
    pub fn framework(mut self, framework: bool) -> Self {
        self.framework = framework;
        self
    }

    pub fn with_type(mut self, ty: TypeInfo) -> Self {
        self.types.push(ty);
        self
    }

    pub fn push_type(&mut self, ty: TypeInfo) -> &mut Self {
        self.types.push(ty);
        self
    }

    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        if self.types.len() > u16::MAX as usize {
            return Err(BuildError::TooManyTypes(self.types.len()));
        }

        let mut strings = StringTableBuilder::new();
        let name = strings.intern(&self.name)?;

        let mut defs: Vec<TypeDef> = Vec::with_capacity(self.types.len());
        let mut members: Vec<MemberDef> = Vec::new();

        for ty in &self.types {
            let member_start = members.len();
            for member in &ty.members {
                let mut flags = 0;
                if member.optional {
                    flags |= member_flags::OPTIONAL;
                }
                if member.list {
                    flags |= member_flags::LIST;
                }
                members.push(MemberDef {
                    name: strings.intern(&member.name)?,
                    type_name: strings.intern_opt(member.type_name.as_deref())?,
                    flags,
                    value: member.value,
                });
            }
            if members.len() > u16::MAX as usize {
                return Err(BuildError::TooManyMembers(members.len()));
            }

            defs.push(TypeDef {
                namespace: strings.intern(&ty.namespace)?,
                name: strings.intern(&ty.name)?,
                base: strings.intern_opt(ty.base.as_deref())?,
                member_start: member_start as u16,
                member_count: ty.members.len() as u16,
                kind: ty.kind as u8,
                flags: if ty.public { type_flags::PUBLIC } else { 0 },
            });
        }

        let (blob, table) = strings.emit();

        let str_blob_offset = HEADER_SIZE;
        let str_table_offset = align_to_section(str_blob_offset + blob.len());
        let type_defs_offset = align_to_section(str_table_offset + table.len());
        let members_offset = align_to_section(type_defs_offset + defs.len() * TYPE_DEF_SIZE);
        let total_size = align_to_section(members_offset + members.len() * MEMBER_SIZE);

        let mut output = vec![0u8; total_size];
        output[str_blob_offset..str_blob_offset + blob.len()].copy_from_slice(&blob);
        output[str_table_offset..str_table_offset + table.len()].copy_from_slice(&table);
        for (i, def) in defs.iter().enumerate() {
            let at = type_defs_offset + i * TYPE_DEF_SIZE;
            output[at..at + TYPE_DEF_SIZE].copy_from_slice(&def.to_bytes());
        }
        for (i, member) in members.iter().enumerate() {
            let at = members_offset + i * MEMBER_SIZE;
            output[at..at + MEMBER_SIZE].copy_from_slice(&member.to_bytes());
        }

        let mut header = Header {
            total_size: total_size as u32,
            str_blob_offset: str_blob_offset as u32,
            str_table_offset: str_table_offset as u32,
            type_defs_offset: type_defs_offset as u32,
            members_offset: members_offset as u32,
            module_version: self.version,
            str_table_count: strings.len() as u16,
            type_defs_count: defs.len() as u16,
            members_count: members.len() as u16,
            name: name.get(),
            ..Default::default()
        };
        header.set_framework(self.framework);
        header.checksum = crc32fast::hash(&output[HEADER_SIZE..]);
        output[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

        Ok(output)
    }

    /// Build and write the module to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), BuildError> {
        let bytes = self.build()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

//! Module reader with unified storage.
//!
//! The [`Module`] struct validates the header once and then serves the string
//! and type tables through borrowed views. Type entries are decoded on demand;
//! [`Module::enumerate_types`] decodes all of them into owned [`TypeInfo`].

use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use super::header::Header;
use super::type_meta::{MemberDef, TypeDef};
use super::{HEADER_SIZE, MEMBER_SIZE, MemberInfo, StringId, TYPE_DEF_SIZE, TypeInfo, VERSION};

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Storage for module bytes.
#[derive(Debug)]
pub enum ByteStorage {
    /// Bytes copied into the process heap.
    Owned(Vec<u8>),
    /// Read-only memory map of the module file.
    Mapped(Mmap),
}

impl Deref for ByteStorage {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(bytes) => bytes.as_slice(),
            Self::Mapped(map) => &map[..],
        }
    }
}

impl ByteStorage {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self::Owned(bytes)
    }

    /// Read a file into memory.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::Owned(std::fs::read(path)?))
    }

    /// Memory-map a file.
    pub fn map_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the map is read-only and every access goes through bounds
        // checks against the validated header. Truncating the file while it
        // is mapped is outside what the loader supports.
        let map = unsafe { Mmap::map(&file)? };
        Ok(Self::Mapped(map))
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

/// Module load error.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("invalid magic: expected TSMD")]
    InvalidMagic,
    #[error("unsupported format version: {0} (expected {expected})", expected = VERSION)]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum {min})", min = HEADER_SIZE)]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {header:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { header: u32, computed: u32 },
    #[error("{0} section exceeds file bounds")]
    SectionOutOfBounds(&'static str),
    #[error("module name is missing or unreadable")]
    MissingName,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// String table lookup error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StringError {
    #[error("string id {0} is out of range")]
    OutOfRange(u16),
    #[error("string id {0} points outside the string blob")]
    BadOffsets(u16),
    #[error("string id {0} is not valid UTF-8")]
    InvalidUtf8(u16),
}

/// Why a single type entry could not be decoded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("unknown type kind {0}")]
    UnknownKind(u8),
    #[error("type has no name")]
    MissingName,
    #[error("members {start}..{end} exceed the member table ({total} entries)")]
    MembersOutOfRange { start: usize, end: usize, total: usize },
    #[error("member #{0} has no name")]
    MemberMissingName(usize),
    #[error("member '{0}' has no type")]
    MemberMissingType(String),
    #[error(transparent)]
    String(#[from] StringError),
}

/// A type entry that failed to decode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{subject}: {error}")]
pub struct TypeLoadFailure {
    /// Index into the type definition table.
    pub index: usize,
    /// Full type name when it could be read, `type #<index>` otherwise.
    pub subject: String,
    pub error: TypeError,
}

/// Some type entries failed to decode. The module cannot be trusted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{} of {total} types failed to load", .failures.len())]
pub struct EnumerationError {
    pub total: usize,
    pub failures: Vec<TypeLoadFailure>,
}

/// A loaded module file.
#[derive(Debug)]
pub struct Module {
    storage: ByteStorage,
    header: Header,
}

impl Module {
    /// Load a module from owned bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ModuleError> {
        Self::from_storage(ByteStorage::from_vec(bytes))
    }

    /// Load a module by reading the whole file into memory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        Self::from_storage(ByteStorage::from_file(path)?)
    }

    /// Load a module backed by a memory map of the file.
    pub fn map_path(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        Self::from_storage(ByteStorage::map_file(path)?)
    }

    fn from_storage(storage: ByteStorage) -> Result<Self, ModuleError> {
        if storage.len() < HEADER_SIZE {
            return Err(ModuleError::FileTooSmall(storage.len()));
        }

        let header = Header::from_bytes(&storage[..HEADER_SIZE]);

        if !header.validate_magic() {
            return Err(ModuleError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ModuleError::UnsupportedVersion(header.version));
        }
        if header.total_size as usize != storage.len() {
            return Err(ModuleError::SizeMismatch {
                header: header.total_size,
                actual: storage.len(),
            });
        }

        let computed = crc32fast::hash(&storage[HEADER_SIZE..]);
        if computed != header.checksum {
            return Err(ModuleError::ChecksumMismatch {
                header: header.checksum,
                computed,
            });
        }

        let module = Self { storage, header };
        module.check_bounds()?;

        let has_name = module
            .strings()
            .get(StringId(header.name))
            .is_ok_and(|name| !name.is_empty());
        if !has_name {
            return Err(ModuleError::MissingName);
        }
        Ok(module)
    }

    fn check_bounds(&self) -> Result<(), ModuleError> {
        let len = self.storage.len();
        let h = &self.header;
        let fits = |offset: u32, size: usize| (offset as usize).saturating_add(size) <= len;

        if !fits(h.str_blob_offset, 0) {
            return Err(ModuleError::SectionOutOfBounds("string blob"));
        }
        if !fits(h.str_table_offset, (h.str_table_count as usize + 1) * 4) {
            return Err(ModuleError::SectionOutOfBounds("string table"));
        }
        if !fits(h.type_defs_offset, h.type_defs_count as usize * TYPE_DEF_SIZE) {
            return Err(ModuleError::SectionOutOfBounds("type definition"));
        }
        if !fits(h.members_offset, h.members_count as usize * MEMBER_SIZE) {
            return Err(ModuleError::SectionOutOfBounds("member"));
        }
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn bytes(&self) -> &[u8] {
        &self.storage
    }

    pub fn is_mapped(&self) -> bool {
        self.storage.is_mapped()
    }

    /// Module name from the header. Validated at load time.
    pub fn name(&self) -> &str {
        self.strings()
            .get(StringId(self.header.name))
            .unwrap_or_default()
    }

    pub fn version(&self) -> u32 {
        self.header.module_version
    }

    pub fn strings(&self) -> StringsView<'_> {
        let table = self.header.str_table_offset as usize;
        let count = self.header.str_table_count as usize;
        StringsView {
            blob: &self.storage[self.header.str_blob_offset as usize..],
            table: &self.storage[table..table + (count + 1) * 4],
            count,
        }
    }

    pub fn types(&self) -> TypesView<'_> {
        let defs = self.header.type_defs_offset as usize;
        let defs_count = self.header.type_defs_count as usize;
        let members = self.header.members_offset as usize;
        let members_count = self.header.members_count as usize;
        TypesView {
            defs_bytes: &self.storage[defs..defs + defs_count * TYPE_DEF_SIZE],
            members_bytes: &self.storage[members..members + members_count * MEMBER_SIZE],
            defs_count,
            members_count,
        }
    }

    /// Decode every type entry.
    ///
    /// Either all entries decode, or the error lists every entry that did not.
    pub fn enumerate_types(&self) -> Result<Vec<TypeInfo>, EnumerationError> {
        let types = self.types();
        let strings = self.strings();

        let mut decoded = Vec::with_capacity(types.len());
        let mut failures = Vec::new();
        for idx in 0..types.len() {
            match types.decode(idx, &strings) {
                Ok(info) => decoded.push(info),
                Err(failure) => failures.push(failure),
            }
        }

        if failures.is_empty() {
            Ok(decoded)
        } else {
            Err(EnumerationError {
                total: types.len(),
                failures,
            })
        }
    }
}

/// View into the string table.
///
/// The table holds `count + 1` sequential u32 offsets into the blob; string
/// `i` spans `table[i]..table[i + 1]`.
pub struct StringsView<'a> {
    blob: &'a [u8],
    table: &'a [u8],
    count: usize,
}

impl<'a> StringsView<'a> {
    pub fn get(&self, id: StringId) -> Result<&'a str, StringError> {
        let idx = id.get() as usize;
        if idx >= self.count {
            return Err(StringError::OutOfRange(id.get()));
        }
        let start = read_u32_le(self.table, idx * 4) as usize;
        let end = read_u32_le(self.table, (idx + 1) * 4) as usize;
        let bytes = self
            .blob
            .get(start..end)
            .ok_or(StringError::BadOffsets(id.get()))?;
        std::str::from_utf8(bytes).map_err(|_| StringError::InvalidUtf8(id.get()))
    }

    /// Like [`get`](Self::get), mapping `StringId::NONE` to `None`.
    pub fn get_opt(&self, id: StringId) -> Result<Option<&'a str>, StringError> {
        if id.is_none() {
            return Ok(None);
        }
        self.get(id).map(Some)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// View into the type definition and member tables.
pub struct TypesView<'a> {
    defs_bytes: &'a [u8],
    members_bytes: &'a [u8],
    defs_count: usize,
    members_count: usize,
}

impl<'a> TypesView<'a> {
    pub fn get_def(&self, idx: usize) -> TypeDef {
        assert!(idx < self.defs_count, "type def index out of bounds");
        TypeDef::from_bytes(&self.defs_bytes[idx * TYPE_DEF_SIZE..])
    }

    pub fn get_member(&self, idx: usize) -> MemberDef {
        assert!(idx < self.members_count, "member index out of bounds");
        MemberDef::from_bytes(&self.members_bytes[idx * MEMBER_SIZE..])
    }

    /// Number of type definitions.
    pub fn len(&self) -> usize {
        self.defs_count
    }

    pub fn is_empty(&self) -> bool {
        self.defs_count == 0
    }

    pub fn members_count(&self) -> usize {
        self.members_count
    }

    /// Decode one type entry into owned metadata.
    pub fn decode(
        &self,
        idx: usize,
        strings: &StringsView<'_>,
    ) -> Result<TypeInfo, TypeLoadFailure> {
        let mut subject = format!("type #{idx}");
        self.decode_def(self.get_def(idx), strings, &mut subject)
            .map_err(|error| TypeLoadFailure {
                index: idx,
                subject,
                error,
            })
    }

    /// `subject` is updated to the full type name as soon as it is known.
    fn decode_def(
        &self,
        def: TypeDef,
        strings: &StringsView<'_>,
        subject: &mut String,
    ) -> Result<TypeInfo, TypeError> {
        let name = strings.get(def.name)?;
        if name.is_empty() {
            return Err(TypeError::MissingName);
        }
        let namespace = strings.get(def.namespace)?;
        *subject = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        };

        let kind = def.kind().ok_or(TypeError::UnknownKind(def.kind))?;
        let base = strings.get_opt(def.base)?.map(str::to_string);

        let start = def.member_start as usize;
        let end = start + def.member_count as usize;
        if end > self.members_count {
            return Err(TypeError::MembersOutOfRange {
                start,
                end,
                total: self.members_count,
            });
        }

        let mut members = Vec::with_capacity(end - start);
        for member_idx in start..end {
            let member = self.get_member(member_idx);
            let member_name = strings.get(member.name)?;
            if member_name.is_empty() {
                return Err(TypeError::MemberMissingName(member_idx - start));
            }
            let type_name = strings.get_opt(member.type_name)?.map(str::to_string);
            if type_name.is_none() && !kind.is_enum() {
                return Err(TypeError::MemberMissingType(member_name.to_string()));
            }
            members.push(MemberInfo {
                name: member_name.to_string(),
                type_name,
                optional: member.is_optional(),
                list: member.is_list(),
                value: member.value,
            });
        }

        Ok(TypeInfo {
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            public: def.is_public(),
            base,
            members,
        })
    }
}

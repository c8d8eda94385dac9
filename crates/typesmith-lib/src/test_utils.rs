//! Fixtures shared by the crate's tests.

use std::path::{Path, PathBuf};

use typesmith_module::{HEADER_SIZE, MemberInfo, ModuleBuilder, TypeInfo, TypeKind};

use crate::loader::{LoadedModule, ModuleId, ModuleOrigin};

/// A caller module with a row, a request and an enum in `MyApp`.
pub fn northwind() -> ModuleBuilder {
    ModuleBuilder::new("MyApp")
        .with_type(
            TypeInfo::new("MyApp.Northwind", "CustomerRow", TypeKind::Class)
                .with_base("Typesmith.Data.Row")
                .with_member(MemberInfo::field("CustomerId", "Int32").optional())
                .with_member(MemberInfo::field("CompanyName", "String"))
                .with_member(MemberInfo::field("Orders", "MyApp.Northwind.OrderRow").list()),
        )
        .with_type(
            TypeInfo::new("MyApp.Northwind", "OrderRow", TypeKind::Class)
                .with_base("Typesmith.Data.Row")
                .with_member(MemberInfo::field("OrderId", "Int64")),
        )
        .with_type(
            TypeInfo::new("MyApp", "Status", TypeKind::Enum)
                .with_member(MemberInfo::variant("Active", 1))
                .with_member(MemberInfo::variant("Inactive", 2)),
        )
        .with_type(TypeInfo::new("MyApp.Internal", "Cache", TypeKind::Class).private())
}

pub fn write_module(dir: &Path, file_name: &str, builder: &ModuleBuilder) -> PathBuf {
    let path = dir.join(file_name);
    builder.write_to(&path).unwrap();
    path
}

/// Overwrite the kind byte of type `idx` and fix up the checksum.
pub fn corrupt_kind(path: &Path, idx: usize, kind: u8) {
    let mut bytes = std::fs::read(path).unwrap();
    let defs = u32::from_le_bytes(bytes[24..28].try_into().unwrap()) as usize;
    bytes[defs + idx * 12 + 10] = kind;
    let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
    bytes[8..12].copy_from_slice(&crc.to_le_bytes());
    std::fs::write(path, bytes).unwrap();
}

/// An in-memory caller module.
pub fn loaded(name: &str, types: Vec<TypeInfo>) -> LoadedModule {
    LoadedModule::new(
        ModuleId::new(name, 1),
        ModuleOrigin::File(PathBuf::from(format!("{name}.tsmd"))),
        types,
    )
}

pub fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

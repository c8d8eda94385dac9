//! Modules of the framework itself.
//!
//! Caller projects derive from these types (rows, service requests), so they
//! are always part of the module set. They are compiled in rather than read
//! from disk.

use typesmith_module::{MemberInfo, TypeInfo, TypeKind};

use crate::loader::{LoadedModule, ModuleId, ModuleOrigin};

/// Version stamped on every self module.
pub const SELF_MODULE_VERSION: u32 = 1;

/// A built-in module definition.
#[derive(Debug)]
pub struct SelfModule {
    pub name: &'static str,
    pub types: &'static [SelfType],
}

#[derive(Debug)]
pub struct SelfType {
    pub namespace: &'static str,
    pub name: &'static str,
    pub kind: TypeKind,
    pub base: Option<&'static str>,
    pub members: &'static [SelfMember],
}

#[derive(Debug)]
pub struct SelfMember {
    pub name: &'static str,
    pub type_name: Option<&'static str>,
    pub optional: bool,
    pub list: bool,
    pub value: i32,
}

const fn field(name: &'static str, type_name: &'static str) -> SelfMember {
    SelfMember {
        name,
        type_name: Some(type_name),
        optional: false,
        list: false,
        value: 0,
    }
}

const fn optional(name: &'static str, type_name: &'static str) -> SelfMember {
    SelfMember {
        optional: true,
        ..field(name, type_name)
    }
}

const fn list(name: &'static str, type_name: &'static str) -> SelfMember {
    SelfMember {
        list: true,
        ..field(name, type_name)
    }
}

const fn variant(name: &'static str, value: i32) -> SelfMember {
    SelfMember {
        name,
        type_name: None,
        optional: false,
        list: false,
        value,
    }
}

const fn class(
    namespace: &'static str,
    name: &'static str,
    base: Option<&'static str>,
    members: &'static [SelfMember],
) -> SelfType {
    SelfType {
        namespace,
        name,
        kind: TypeKind::Class,
        base,
        members,
    }
}

/// Every self module, in load order.
pub static SELF_MODULES: &[SelfModule] = &[
    SelfModule {
        name: "Typesmith.Core",
        types: &[
            class("Typesmith", "LocalText", None, &[field("Key", "String")]),
            SelfType {
                namespace: "Typesmith",
                name: "SortOrder",
                kind: TypeKind::Enum,
                base: None,
                members: &[variant("Ascending", 0), variant("Descending", 1)],
            },
        ],
    },
    SelfModule {
        name: "Typesmith.Data",
        types: &[
            class("Typesmith.Data", "Row", None, &[]),
            SelfType {
                namespace: "Typesmith.Data",
                name: "IIdRow",
                kind: TypeKind::Interface,
                base: None,
                members: &[field("IdField", "Object")],
            },
            class(
                "Typesmith.Data",
                "SortBy",
                None,
                &[field("Field", "String"), field("Descending", "Boolean")],
            ),
        ],
    },
    SelfModule {
        name: "Typesmith.Services",
        types: &[
            class("Typesmith.Services", "ServiceRequest", None, &[]),
            class(
                "Typesmith.Services",
                "ServiceError",
                None,
                &[
                    field("Code", "String"),
                    optional("Arguments", "String"),
                    field("Message", "String"),
                ],
            ),
            class(
                "Typesmith.Services",
                "ServiceResponse",
                None,
                &[optional("Error", "Typesmith.Services.ServiceError")],
            ),
            class(
                "Typesmith.Services",
                "SaveRequest",
                Some("Typesmith.Services.ServiceRequest"),
                &[field("Entity", "Object"), optional("EntityId", "Object")],
            ),
            class(
                "Typesmith.Services",
                "SaveResponse",
                Some("Typesmith.Services.ServiceResponse"),
                &[optional("EntityId", "Object")],
            ),
            class(
                "Typesmith.Services",
                "RetrieveRequest",
                Some("Typesmith.Services.ServiceRequest"),
                &[field("EntityId", "Object"), list("ColumnSelection", "String")],
            ),
            class(
                "Typesmith.Services",
                "DeleteRequest",
                Some("Typesmith.Services.ServiceRequest"),
                &[field("EntityId", "Object")],
            ),
            class(
                "Typesmith.Services",
                "ListRequest",
                Some("Typesmith.Services.ServiceRequest"),
                &[
                    optional("Skip", "Int32"),
                    optional("Take", "Int32"),
                    list("Sort", "Typesmith.Data.SortBy"),
                    optional("ContainsText", "String"),
                ],
            ),
            class(
                "Typesmith.Services",
                "ListResponse",
                Some("Typesmith.Services.ServiceResponse"),
                &[
                    list("Entities", "Object"),
                    field("TotalCount", "Int32"),
                    field("Skip", "Int32"),
                    field("Take", "Int32"),
                ],
            ),
        ],
    },
    SelfModule {
        name: "Typesmith.Web",
        types: &[class(
            "Typesmith.Web",
            "ServiceEndpoint",
            None,
            &[field("Route", "String")],
        )],
    },
];

impl SelfModule {
    pub fn id(&self) -> ModuleId {
        ModuleId::new(self.name, SELF_MODULE_VERSION)
    }

    pub fn to_loaded(&self) -> LoadedModule {
        let types = self.types.iter().map(SelfType::to_type_info).collect();
        LoadedModule::new(self.id(), ModuleOrigin::Builtin, types)
    }
}

impl SelfType {
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    fn to_type_info(&self) -> TypeInfo {
        let mut info = TypeInfo::new(self.namespace, self.name, self.kind);
        info.base = self.base.map(str::to_string);
        info.members = self.members.iter().map(SelfMember::to_member_info).collect();
        info
    }
}

impl SelfMember {
    fn to_member_info(&self) -> MemberInfo {
        MemberInfo {
            name: self.name.to_string(),
            type_name: self.type_name.map(str::to_string),
            optional: self.optional,
            list: self.list,
            value: self.value,
        }
    }
}

/// Materialize [`SELF_MODULES`] as loaded modules.
pub fn self_modules() -> Vec<LoadedModule> {
    SELF_MODULES.iter().map(SelfModule::to_loaded).collect()
}

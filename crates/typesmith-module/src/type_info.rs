//! Owned type metadata.
//!
//! [`TypeInfo`] is what enumeration hands out: it no longer borrows the module
//! bytes, so it stays valid after the module storage is released.

use crate::TypeKind;

/// A fully decoded type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    /// Dotted namespace, empty for the global namespace.
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    pub public: bool,
    /// Full name of the base type.
    pub base: Option<String>,
    pub members: Vec<MemberInfo>,
}

impl TypeInfo {
    /// A public type without base or members.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            public: true,
            base: None,
            members: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// `Namespace.Name`, or just `Name` in the global namespace.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// A field of a composite type or a variant of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
    /// Full name of the field type; `None` for enum variants.
    pub type_name: Option<String>,
    pub optional: bool,
    pub list: bool,
    /// Variant value (enums only).
    pub value: i32,
}

impl MemberInfo {
    pub fn field(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            optional: false,
            list: false,
            value: 0,
        }
    }

    pub fn variant(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            optional: false,
            list: false,
            value,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }
}

//! TypeScript namespace declarations from module metadata.
//!
//! Each owned type becomes one file holding a `namespace` block with a
//! single `export interface` or `export enum`.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;

use tracing::{debug, warn};
use typesmith_module::{MemberInfo, TypeInfo, TypeKind};

use super::{ExternalType, GenerateError, GenerationEngine, NamespaceScope, OutputUnits};
use crate::resolve::ModuleSet;

const INDENT: &str = "    ";

/// TypeScript spelling of a primitive type name.
pub fn ts_type_name(name: &str) -> Option<&'static str> {
    let ts = match name {
        "String" | "Char" | "Guid" | "DateTime" | "DateTimeOffset" | "TimeSpan" => "string",
        "Byte" | "SByte" | "Int16" | "UInt16" | "Int32" | "UInt32" | "Int64" | "UInt64"
        | "Single" | "Double" | "Decimal" => "number",
        "Boolean" => "boolean",
        "Object" => "any",
        _ => return None,
    };
    Some(ts)
}

/// Reference engine: one `.ts` file per public type of the caller's project.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypingsEngine;

impl TypingsEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GenerationEngine for TypingsEngine {
    fn generate(
        &self,
        modules: &ModuleSet,
        scope: &NamespaceScope,
        external_types: &[ExternalType],
    ) -> Result<OutputUnits, GenerateError> {
        let mut known: HashSet<String> = modules
            .iter()
            .flat_map(|m| m.types().iter().map(TypeInfo::full_name))
            .collect();
        known.extend(external_types.iter().map(ExternalType::full_name));

        // Sorted so output does not depend on module order.
        let mut owned: BTreeMap<String, &TypeInfo> = BTreeMap::new();
        for module in modules.caller_modules() {
            for ty in module.types() {
                if !scope.owns(&ty.namespace) {
                    continue;
                }
                let full_name = ty.full_name();
                if owned.contains_key(&full_name) {
                    warn!(
                        type_name = %full_name,
                        module = %module.id(),
                        "type defined twice, keeping the first definition"
                    );
                    continue;
                }
                owned.insert(full_name, ty);
            }
        }

        let mut units = OutputUnits::with_capacity(owned.len());
        for (full_name, ty) in &owned {
            let file_name = output_file_name(scope, full_name)?;
            units.insert(file_name, Emitter::new(&known).emit(ty));
        }
        debug!(units = units.len(), "generated typings");
        Ok(units)
    }
}

fn output_file_name(scope: &NamespaceScope, full_name: &str) -> Result<String, GenerateError> {
    let relative = scope.relative(full_name).unwrap_or(full_name);
    if relative.is_empty() || relative.starts_with('.') || relative.contains(['/', '\\']) {
        return Err(GenerateError::InvalidFileName(full_name.to_string()));
    }
    Ok(format!("{relative}.ts"))
}

struct Emitter<'a> {
    known: &'a HashSet<String>,
    output: String,
}

impl<'a> Emitter<'a> {
    fn new(known: &'a HashSet<String>) -> Self {
        Self {
            known,
            output: String::new(),
        }
    }

    fn emit(mut self, ty: &TypeInfo) -> String {
        let wrapped = !ty.namespace.is_empty();
        let indent = if wrapped { INDENT } else { "" };
        if wrapped {
            writeln!(self.output, "namespace {} {{", ty.namespace).unwrap();
        }

        match ty.kind {
            TypeKind::Enum => self.emit_enum(ty, indent),
            TypeKind::Class | TypeKind::Struct | TypeKind::Interface => {
                self.emit_interface(ty, indent)
            }
        }

        if wrapped {
            self.output.push_str("}\n");
        }
        self.output
    }

    fn emit_interface(&mut self, ty: &TypeInfo, indent: &str) {
        write!(self.output, "{indent}export interface {}", ty.name).unwrap();
        if let Some(base) = ty.base.as_deref().filter(|b| self.known.contains(*b)) {
            write!(self.output, " extends {base}").unwrap();
        }
        self.output.push_str(" {\n");

        for member in &ty.members {
            let optional = if member.optional { "?" } else { "" };
            let ts = self.member_type(member);
            writeln!(self.output, "{indent}{INDENT}{}{optional}: {ts};", member.name).unwrap();
        }
        writeln!(self.output, "{indent}}}").unwrap();
    }

    fn emit_enum(&mut self, ty: &TypeInfo, indent: &str) {
        writeln!(self.output, "{indent}export enum {} {{", ty.name).unwrap();
        for member in &ty.members {
            writeln!(self.output, "{indent}{INDENT}{} = {},", member.name, member.value).unwrap();
        }
        writeln!(self.output, "{indent}}}").unwrap();
    }

    fn member_type(&self, member: &MemberInfo) -> String {
        let base = match member.type_name.as_deref() {
            Some(name) => match ts_type_name(name) {
                Some(ts) => ts.to_string(),
                None if self.known.contains(name) => name.to_string(),
                None => "any".to_string(),
            },
            None => "any".to_string(),
        };
        if member.list {
            format!("{base}[]")
        } else {
            base
        }
    }
}

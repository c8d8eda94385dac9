use std::collections::HashSet;

use super::self_modules::{SELF_MODULE_VERSION, SELF_MODULES, self_modules};

#[test]
fn self_module_ids_are_unique() {
    let ids: HashSet<_> = SELF_MODULES.iter().map(|m| m.id()).collect();
    assert_eq!(ids.len(), SELF_MODULES.len());
}

#[test]
fn self_modules_are_builtin() {
    let modules = self_modules();
    assert_eq!(modules.len(), SELF_MODULES.len());
    for module in &modules {
        assert!(module.is_builtin());
        assert_eq!(module.id().version, SELF_MODULE_VERSION);
        assert!(module.name().starts_with("Typesmith."));
    }
}

#[test]
fn self_type_bases_resolve_within_self_modules() {
    let names: HashSet<String> = SELF_MODULES
        .iter()
        .flat_map(|m| m.types.iter().map(|t| t.full_name()))
        .collect();
    for module in SELF_MODULES {
        for ty in module.types {
            if let Some(base) = ty.base {
                assert!(names.contains(base), "{} extends unknown {base}", ty.full_name());
            }
        }
    }
}

#[test]
fn materialized_types_keep_members() {
    let modules = self_modules();
    let services = modules
        .iter()
        .find(|m| m.name() == "Typesmith.Services")
        .unwrap();
    let list = services
        .types()
        .iter()
        .find(|t| t.name == "ListRequest")
        .unwrap();
    assert_eq!(list.base.as_deref(), Some("Typesmith.Services.ServiceRequest"));
    let sort = list.members.iter().find(|m| m.name == "Sort").unwrap();
    assert!(sort.list);
    assert_eq!(sort.type_name.as_deref(), Some("Typesmith.Data.SortBy"));
}

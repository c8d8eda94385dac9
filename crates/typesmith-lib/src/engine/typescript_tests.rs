use indoc::indoc;
use typesmith_module::{MemberInfo, TypeInfo, TypeKind};

use crate::engine::{
    ExternalType, GenerateError, GenerationEngine, NamespaceScope, TypingsEngine, ts_type_name,
};
use crate::resolve::ModuleSet;
use crate::self_modules::self_modules;
use crate::test_utils::loaded;

fn generate(set: &ModuleSet, root: &str, external: &[ExternalType]) -> Vec<(String, String)> {
    TypingsEngine::new()
        .generate(set, &NamespaceScope::new(root), external)
        .unwrap()
        .into_iter()
        .collect()
}

fn customer() -> TypeInfo {
    TypeInfo::new("MyApp.Northwind", "CustomerRow", TypeKind::Class)
        .with_base("Typesmith.Data.Row")
        .with_member(MemberInfo::field("CustomerId", "Int32").optional())
        .with_member(MemberInfo::field("CompanyName", "String"))
        .with_member(MemberInfo::field("Orders", "MyApp.Northwind.OrderRow").list())
        .with_member(MemberInfo::field("Region", "MyApp.Geo.Region"))
        .with_member(MemberInfo::field("Blob", "Acme.Binary"))
}

#[test]
fn interface_with_known_base_and_members() {
    let app = loaded(
        "MyApp",
        vec![
            customer(),
            TypeInfo::new("MyApp.Northwind", "OrderRow", TypeKind::Class),
        ],
    );
    let set = ModuleSet::new(self_modules(), [app]);
    let external = [ExternalType::new(Some("MyApp.Geo"), "Region")];

    let units = generate(&set, "MyApp", &external);

    assert_eq!(units[0].0, "Northwind.CustomerRow.ts");
    assert_eq!(
        units[0].1,
        indoc! {"
            namespace MyApp.Northwind {
                export interface CustomerRow extends Typesmith.Data.Row {
                    CustomerId?: number;
                    CompanyName: string;
                    Orders: MyApp.Northwind.OrderRow[];
                    Region: MyApp.Geo.Region;
                    Blob: any;
                }
            }
        "}
    );
}

#[test]
fn enum_with_values() {
    let app = loaded(
        "MyApp",
        vec![
            TypeInfo::new("MyApp", "Status", TypeKind::Enum)
                .with_member(MemberInfo::variant("Active", 1))
                .with_member(MemberInfo::variant("Gone", -1)),
        ],
    );
    let units = generate(&ModuleSet::new([], [app]), "MyApp", &[]);

    insta::assert_snapshot!(units[0].1, @r"
    namespace MyApp {
        export enum Status {
            Active = 1,
            Gone = -1,
        }
    }
    ");
    assert_eq!(units[0].0, "Status.ts");
}

#[test]
fn unknown_base_is_dropped() {
    let app = loaded(
        "MyApp",
        vec![TypeInfo::new("MyApp", "Thing", TypeKind::Struct).with_base("Vendor.Base")],
    );
    let units = generate(&ModuleSet::new([], [app]), "MyApp", &[]);
    assert_eq!(units[0].1, "namespace MyApp {\n    export interface Thing {\n    }\n}\n");
}

#[test]
fn only_caller_types_in_scope_are_emitted() {
    let app = loaded(
        "MyApp",
        vec![
            TypeInfo::new("MyApp", "Inside", TypeKind::Class),
            TypeInfo::new("MyAppExtras", "Outside", TypeKind::Class),
            TypeInfo::new("Other", "Elsewhere", TypeKind::Class),
            TypeInfo::new("MyApp.Deep.Er", "Nested", TypeKind::Interface),
        ],
    );
    let set = ModuleSet::new(self_modules(), [app]);

    let names: Vec<String> = generate(&set, "MyApp", &[])
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, ["Deep.Er.Nested.ts", "Inside.ts"]);

    let framework = generate(&set, "Typesmith", &[]);
    assert!(framework.is_empty());
}

#[test]
fn output_does_not_depend_on_module_order() {
    let a = loaded("A", vec![TypeInfo::new("MyApp.B", "Second", TypeKind::Class)]);
    let b = loaded("B", vec![TypeInfo::new("MyApp.A", "First", TypeKind::Class)]);

    let forward = generate(&ModuleSet::new([], [a.clone(), b.clone()]), "MyApp", &[]);
    let backward = generate(&ModuleSet::new([], [b, a]), "MyApp", &[]);

    assert_eq!(forward, backward);
    assert_eq!(forward[0].0, "A.First.ts");
}

#[test]
fn duplicate_type_keeps_first_definition() {
    let a = loaded(
        "A",
        vec![TypeInfo::new("MyApp", "Dup", TypeKind::Class).with_member(MemberInfo::field("X", "Int32"))],
    );
    let b = loaded("B", vec![TypeInfo::new("MyApp", "Dup", TypeKind::Class)]);

    let units = generate(&ModuleSet::new([], [a, b]), "MyApp", &[]);

    assert_eq!(units.len(), 1);
    assert!(units[0].1.contains("X: number;"));
}

#[test]
fn unsafe_type_name_is_rejected() {
    let app = loaded("MyApp", vec![TypeInfo::new("MyApp", "../Escape", TypeKind::Class)]);
    let err = TypingsEngine::new()
        .generate(&ModuleSet::new([], [app]), &NamespaceScope::new("MyApp"), &[])
        .unwrap_err();
    assert!(matches!(err, GenerateError::InvalidFileName(name) if name == "MyApp.../Escape"));
}

#[test]
fn scope_ownership() {
    let scope = NamespaceScope::new(" MyApp ");
    assert_eq!(scope.root(), "MyApp");
    assert!(scope.owns("MyApp"));
    assert!(scope.owns("MyApp.Northwind"));
    assert!(!scope.owns("MyAppX"));
    assert!(!scope.owns("Typesmith"));
    assert_eq!(scope.relative("MyApp.Northwind.Row"), Some("Northwind.Row"));
    assert_eq!(scope.relative("MyAppX.Row"), None);
}

#[test]
fn primitive_names() {
    assert_eq!(ts_type_name("Guid"), Some("string"));
    assert_eq!(ts_type_name("Decimal"), Some("number"));
    assert_eq!(ts_type_name("Boolean"), Some("boolean"));
    assert_eq!(ts_type_name("Object"), Some("any"));
    assert_eq!(ts_type_name("MyApp.Row"), None);
}

#[test]
fn external_types_from_json() {
    let json = r#"[
        {"Namespace": "MyApp.Geo", "Name": "Region", "Fields": [{"Name": "Code", "Type": "String"}]},
        {"Name": "GlobalThing", "BaseType": "Object"}
    ]"#;
    let types: Vec<ExternalType> = serde_json::from_str(json).unwrap();

    assert_eq!(types[0].full_name(), "MyApp.Geo.Region");
    assert_eq!(types[0].fields[0].type_name, "String");
    assert_eq!(types[1].full_name(), "GlobalThing");
    assert_eq!(types[1].base_type.as_deref(), Some("Object"));
}

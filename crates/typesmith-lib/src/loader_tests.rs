use typesmith_module::{ModuleBuilder, ModuleError, TypeInfo, TypeKind};

use crate::loader::{
    DefaultLoader, IsolatedLoader, LoadContext, LoadError, ModuleId, ModuleLoader, ModuleOrigin,
    StaticLoader,
};
use crate::test_utils::{corrupt_kind, northwind, write_module};

#[test]
fn static_loader_reads_public_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(dir.path(), "MyApp.tsmd", &northwind());

    let module = StaticLoader::new().load(&path).unwrap();

    assert_eq!(module.id(), &ModuleId::new("MyApp", 1));
    assert!(!module.is_builtin());
    let names: Vec<String> = module.types().iter().map(TypeInfo::full_name).collect();
    assert_eq!(
        names,
        [
            "MyApp.Northwind.CustomerRow",
            "MyApp.Northwind.OrderRow",
            "MyApp.Status"
        ]
    );
}

#[test]
fn static_loader_reuses_loaded_module() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(dir.path(), "MyApp.tsmd", &northwind());
    let loader = StaticLoader::new();

    let first = loader.load(&path).unwrap();
    let second = loader.load(&dir.path().join(".").join("MyApp.tsmd")).unwrap();

    assert!(first.ptr_eq(&second));
    assert_eq!(loader.space().len(), 1);
}

#[test]
fn isolated_loader_releases_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(dir.path(), "MyApp.tsmd", &northwind());
    let loader = IsolatedLoader::new();

    let first = loader.load(&path).unwrap();
    assert_eq!(LoadContext::live(), 0);
    let second = loader.load(&path).unwrap();

    assert!(!first.ptr_eq(&second));
    assert_eq!(first.types(), second.types());
    assert_eq!(first.origin(), &ModuleOrigin::File(path));
}

#[test]
fn isolated_loader_releases_context_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(dir.path(), "MyApp.tsmd", &northwind());
    corrupt_kind(&path, 0, 9);

    let err = IsolatedLoader::new().load(&path).unwrap_err();

    assert!(matches!(err, LoadError::Enumeration { .. }));
    assert_eq!(LoadContext::live(), 0);
}

#[test]
fn enumeration_failure_lists_distinct_causes() {
    let dir = tempfile::tempdir().unwrap();
    let builder = ModuleBuilder::new("Broken")
        .with_type(TypeInfo::new("Broken", "Twice", TypeKind::Class))
        .with_type(TypeInfo::new("Broken", "Twice", TypeKind::Class))
        .with_type(TypeInfo::new("Broken", "Other", TypeKind::Class));
    let path = write_module(dir.path(), "Broken.tsmd", &builder);
    corrupt_kind(&path, 0, 9);
    corrupt_kind(&path, 1, 9);
    corrupt_kind(&path, 2, 7);

    for loader in [&StaticLoader::new() as &dyn ModuleLoader, &IsolatedLoader::new()] {
        let err = loader.load(&path).unwrap_err();
        let LoadError::Enumeration { causes, .. } = &err else {
            panic!("expected enumeration failure, got {err:?}");
        };
        assert_eq!(
            causes,
            &[
                "Broken.Twice: unknown type kind 9",
                "Broken.Other: unknown type kind 7"
            ]
        );
        assert_eq!(err.path(), path);
    }
}

#[test]
fn enumeration_failure_message() {
    let dir = tempfile::tempdir().unwrap();
    let builder =
        ModuleBuilder::new("Broken").with_type(TypeInfo::new("Broken", "Bad", TypeKind::Enum));
    let path = write_module(dir.path(), "Broken.tsmd", &builder);
    corrupt_kind(&path, 0, 200);

    let err = IsolatedLoader::new().load(&path).unwrap_err();
    let message = err.to_string().replace(&path.display().to_string(), "<path>");
    insta::assert_snapshot!(message, @r"
    couldn't list types in module file <path>:
    Broken.Bad: unknown type kind 200
    ");
}

#[test]
fn invalid_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Junk.tsmd");
    std::fs::write(&path, vec![0u8; 128]).unwrap();

    let err = DefaultLoader::default().load(&path).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Load {
            source: ModuleError::InvalidMagic,
            ..
        }
    ));
}

#[cfg(feature = "isolated-load")]
#[test]
fn default_loader_is_isolated() {
    let _: IsolatedLoader = DefaultLoader::default();
}

#[cfg(not(feature = "isolated-load"))]
#[test]
fn default_loader_is_static() {
    let _: StaticLoader = DefaultLoader::default();
}

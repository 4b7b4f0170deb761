use std::fs;
use std::sync::Arc;

use indoc::indoc;
use tempfile::TempDir;

use crate::error::CompileError;
use crate::loader::load;
use crate::registry::Registry;
use crate::simulate::run;
use crate::test_utils::{accepts, def_id, load as load_inline};

fn write_modules(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("write module");
    }
    dir
}

#[test]
fn self_recursion_terminates_and_means_one_or_more() {
    let (set, main) = load_inline("S = 1 S");
    let mut registry = Registry::new();
    let auto = registry
        .compile(&set, def_id(&set, main, "S"))
        .expect("recursive pattern compiles");

    assert!(!accepts(&auto, &[]));
    assert!(accepts(&auto, &[1]));
    assert!(accepts(&auto, &[1, 1, 1, 1]));
    assert!(!accepts(&auto, &[1, 2]));

    // Final after each 1 and only after each 1.
    let trace = run(&auto, [1, 1, 1].into_iter());
    assert!(!auto.is_final(trace.states[0]));
    for &state in &trace.states[1..] {
        assert!(auto.is_final(state));
    }
}

#[test]
fn ambiguous_unqualified_reference_across_imports() {
    let dir = write_modules(&[
        (
            "main.rm",
            indoc! {r#"
                import "a.rm"
                import "b.rm"
                P = X
            "#},
        ),
        ("a.rm", "export X = 1"),
        ("b.rm", "export X = 2"),
    ]);
    let (set, main) = load(&dir.path().join("main.rm")).expect("modules load");

    let mut registry = Registry::new();
    let err = registry
        .compile(&set, def_id(&set, main, "P"))
        .expect_err("ambiguous reference must not compile");
    assert!(matches!(
        err,
        CompileError::AmbiguousReference { ref pattern, ref name }
            if pattern.as_str() == "P" && name.as_str() == "X"
    ));
    assert!(registry.is_empty());
}

#[test]
fn qualified_reference_disambiguates() {
    let dir = write_modules(&[
        ("main.rm", "import \"a.rm\" as a\nimport \"b.rm\" as b\nP = a.X b.X"),
        ("a.rm", "export X = 1"),
        ("b.rm", "export X = 2"),
    ]);
    let (set, main) = load(&dir.path().join("main.rm")).expect("modules load");

    let mut registry = Registry::new();
    let auto = registry
        .compile(&set, def_id(&set, main, "P"))
        .expect("qualified references compile");
    assert!(accepts(&auto, &[1, 2]));
    assert!(!accepts(&auto, &[2, 1]));
}

#[test]
fn own_definition_shadows_imports() {
    let dir = write_modules(&[
        ("main.rm", "import \"a.rm\"\nimport \"b.rm\"\nX = 7\nP = X"),
        ("a.rm", "export X = 1"),
        ("b.rm", "export X = 2"),
    ]);
    let (set, main) = load(&dir.path().join("main.rm")).expect("modules load");

    let mut registry = Registry::new();
    let auto = registry
        .compile(&set, def_id(&set, main, "P"))
        .expect("shadowed reference compiles");
    assert!(accepts(&auto, &[7]));
    assert!(!accepts(&auto, &[1]));
}

#[test]
fn cyclic_imports_load() {
    let dir = write_modules(&[
        ("a.rm", "import \"b.rm\" as b\nexport A = 1 b.B?"),
        ("b.rm", "import \"a.rm\" as a\nexport B = 2 a.A?"),
    ]);
    let (set, a) = load(&dir.path().join("a.rm")).expect("cycle loads");
    assert_eq!(set.len(), 2);

    let mut registry = Registry::new();
    let auto = registry
        .compile(&set, def_id(&set, a, "A"))
        .expect("cross-module cycle compiles");
    assert!(accepts(&auto, &[1]));
    assert!(accepts(&auto, &[1, 2]));
    assert!(accepts(&auto, &[1, 2, 1]));
}

#[test]
fn compilation_is_cached() {
    let (set, main) = load_inline("P = 65 66");
    let def = def_id(&set, main, "P");
    let mut registry = Registry::new();
    let first = registry.compile(&set, def).expect("compiles");
    let second = registry.compile(&set, def).expect("cache hit");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn referenced_pattern_failure_fails_the_referencing_one() {
    let (set, main) = load_inline(indoc! {"
        P = Q
        Q = 9..3
    "});
    let mut registry = Registry::new();
    let err = registry
        .compile(&set, def_id(&set, main, "P"))
        .expect_err("compiling P must surface Q's malformed range");
    assert!(matches!(
        err,
        CompileError::MalformedRange { ref pattern, lo: 9, hi: 3 } if pattern.as_str() == "Q"
    ));
    // Neither the referencing nor the referenced definition gets cached.
    assert!(registry.is_empty());
    assert!(registry.get(def_id(&set, main, "P")).is_none());
    assert!(registry.get(def_id(&set, main, "Q")).is_none());
}

#[test]
fn errors_leave_nothing_cached() {
    let (set, main) = load_inline("P = Missing");
    let def = def_id(&set, main, "P");
    let mut registry = Registry::new();
    assert!(registry.compile(&set, def).is_err());
    assert!(registry.is_empty());
    assert!(registry.get(def).is_none());

    // A retry fails the same way instead of observing stale state.
    assert!(registry.compile(&set, def).is_err());
}

#[test]
fn export_flag_and_order() {
    let (set, main) = load_inline(indoc! {"
        A = 1
        B = 2
        C = 3
    "});
    let a = def_id(&set, main, "A");
    let b = def_id(&set, main, "B");
    let c = def_id(&set, main, "C");

    let mut registry = Registry::new();
    registry.compile_export(&set, c).expect("compiles");
    registry.compile_export(&set, a).expect("compiles");
    registry.compile(&set, b).expect("compiles");

    assert!(registry.is_exported(a));
    assert!(!registry.is_exported(b));
    let order: Vec<_> = registry.exported().collect();
    assert_eq!(order, vec![c, a]);
}

#[test]
fn clear_drops_everything() {
    let (set, main) = load_inline("A = 1");
    let def = def_id(&set, main, "A");
    let mut registry = Registry::new();
    registry.compile_export(&set, def).expect("compiles");
    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.get(def).is_none());
    assert!(!registry.is_exported(def));
}

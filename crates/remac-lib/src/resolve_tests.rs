use remac_core::{DefId, ModuleId, ModuleSet};

use crate::parser::parse_module;
use crate::resolve::{Resolution, resolve};

/// Parse `source` into `set` without following imports; callers wire the
/// import edges by hand.
fn module(set: &mut ModuleSet, name: &str, source: &str) -> ModuleId {
    let (parsed, imports) = parse_module(source, name).expect("should parse");
    assert!(imports.is_empty());
    let id = set.alloc(name);
    *set.module_mut(id) = parsed;
    id
}

#[test]
fn own_definition_resolves() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "A = 1\nB = 2");
    assert_eq!(
        resolve(&set, main, None, "B"),
        Resolution::Pattern(DefId::new(main, 1))
    );
}

#[test]
fn constant_resolves() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "#define nine 57");
    let Resolution::Constant(c) = resolve(&set, main, None, "nine") else {
        panic!("expected a constant");
    };
    assert_eq!(c.value, 57);
}

#[test]
fn unknown_name_is_not_found() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "A = 1");
    assert_eq!(resolve(&set, main, None, "Z"), Resolution::NotFound);
}

#[test]
fn single_import_hit_resolves() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "A = 1");
    let dep = module(&mut set, "dep", "X = 2");
    set.module_mut(main).unqualified.push(dep);

    assert_eq!(
        resolve(&set, main, None, "X"),
        Resolution::Pattern(DefId::new(dep, 0))
    );
}

#[test]
fn own_module_shadows_imports() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "X = 1");
    let dep = module(&mut set, "dep", "X = 2");
    set.module_mut(main).unqualified.push(dep);

    assert_eq!(
        resolve(&set, main, None, "X"),
        Resolution::Pattern(DefId::new(main, 0))
    );
}

#[test]
fn two_import_hits_are_ambiguous() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "A = 1");
    let dep_a = module(&mut set, "dep_a", "X = 2");
    let dep_b = module(&mut set, "dep_b", "X = 3");
    set.module_mut(main).unqualified.push(dep_a);
    set.module_mut(main).unqualified.push(dep_b);

    assert_eq!(resolve(&set, main, None, "X"), Resolution::Ambiguous);
}

#[test]
fn qualified_lookup_ignores_other_imports() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "A = 1");
    let dep_a = module(&mut set, "dep_a", "X = 2");
    let dep_b = module(&mut set, "dep_b", "X = 3");
    set.module_mut(main).qualified.insert("a".to_owned(), dep_a);
    set.module_mut(main).qualified.insert("b".to_owned(), dep_b);

    assert_eq!(
        resolve(&set, main, Some("a"), "X"),
        Resolution::Pattern(DefId::new(dep_a, 0))
    );
    assert_eq!(
        resolve(&set, main, Some("b"), "X"),
        Resolution::Pattern(DefId::new(dep_b, 0))
    );
}

#[test]
fn unknown_alias_is_not_found() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "A = 1");
    assert_eq!(resolve(&set, main, Some("nope"), "A"), Resolution::NotFound);
}

#[test]
fn qualified_miss_in_target_module() {
    let mut set = ModuleSet::new();
    let main = module(&mut set, "main", "A = 1");
    let dep = module(&mut set, "dep", "X = 2");
    set.module_mut(main).qualified.insert("d".to_owned(), dep);

    assert_eq!(resolve(&set, main, Some("d"), "Y"), Resolution::NotFound);
}

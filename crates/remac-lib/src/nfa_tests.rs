use insta::assert_snapshot;
use remac_core::{DefId, ModuleSet, PatternDef, PatternExpr, Span};

use crate::error::CompileError;
use crate::nfa::{Builder, Nfa};
use crate::test_utils::{def_id, load};

fn build(source: &str, name: &str) -> Nfa {
    let (set, main) = load(source);
    Builder::build(&set, def_id(&set, main, name)).expect("pattern should build")
}

fn build_err(source: &str, name: &str) -> CompileError {
    let (set, main) = load(source);
    Builder::build(&set, def_id(&set, main, name)).expect_err("build should fail")
}

#[test]
fn single_range() {
    let nfa = build("R = 65..90", "R");
    assert_snapshot!(nfa.dump(), @r"
    start: N0  accept: N1
    N0: ε → N2
    N1: ∅
    N2: 65..90 → N3
    N3: ε → N1
    ");
}

#[test]
fn star_topology() {
    let nfa = build("S = 1*", "S");
    assert_snapshot!(nfa.dump(), @r"
    start: N0  accept: N1
    N0: ε → N2
    N1: ∅
    N2: ε → N4, N3
    N3: ε → N1
    N4: 1 → N5
    N5: ε → N2
    ");
}

#[test]
fn self_reference_becomes_jump() {
    let nfa = build("S = 1 S", "S");
    assert_snapshot!(nfa.dump(), @r"
    start: N0  accept: N1
    N0: ε → N2
    N1: ∅
    N2: 1 → N3
    N3: ε → N4
    N4: ε → N0, N5
    N5: ε → N1
    ");
}

#[test]
fn constant_reference_inlines_value() {
    let nfa = build("#define nine 57\nN = nine", "N");
    assert_snapshot!(nfa.dump(), @r"
    start: N0  accept: N1
    N0: ε → N2
    N1: ∅
    N2: 57 → N3
    N3: ε → N1
    ");
}

#[test]
fn references_inline_fresh_per_site() {
    let nfa = build("A = 1\nS = A A", "S");
    // Two sites, two copies of A's fragment.
    let symbol_edges: Vec<_> = nfa
        .iter()
        .flat_map(|(_, s)| s.edges.iter().copied())
        .collect();
    assert_eq!(symbol_edges.len(), 2);
    assert_ne!(symbol_edges[0].2, symbol_edges[1].2);
}

#[test]
fn entry_and_exit_carry_roles() {
    let nfa = build("R = 65..90", "R");
    // N2/N3 belong to the single constant node.
    let entry = &nfa.state(2).tags;
    let exit = &nfa.state(3).tags;
    assert_eq!(entry.len(), 1);
    assert!(entry[0].1.has_start() && entry[0].1.has_inner() && !entry[0].1.has_final());
    assert!(exit[0].1.has_final() && exit[0].1.has_inner() && !exit[0].1.has_start());
}

#[test]
fn nested_tags_accumulate() {
    let nfa = build("S = 1*", "S");
    // The constant's entry state also lies inside the star's window.
    let tags = &nfa.state(4).tags;
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().any(|(_, r)| r.has_start()));
    assert!(tags.iter().all(|(_, r)| r.has_inner()));
}

#[test]
fn unresolved_reference_is_an_error() {
    let err = build_err("S = Missing", "S");
    assert!(matches!(
        err,
        CompileError::UnresolvedReference { ref pattern, ref name }
            if pattern.as_str() == "S" && name.as_str() == "Missing"
    ));
}

#[test]
fn malformed_range_is_an_error() {
    let err = build_err("R = 9..3", "R");
    assert!(matches!(
        err,
        CompileError::MalformedRange { ref pattern, lo: 9, hi: 3 } if pattern.as_str() == "R"
    ));
}

#[test]
fn empty_alternation_is_an_error() {
    // No surface syntax yields a branchless alternation (a trailing pipe
    // still parses an empty sequence branch), so build the node directly.
    let mut set = ModuleSet::new();
    let main = set.alloc("main");
    let module = set.module_mut(main);
    let body = module
        .arena
        .alloc(PatternExpr::Alt(Vec::new()), Span::new(4, 4));
    module.defs.push(PatternDef {
        name: "E".to_owned(),
        body,
        span: Span::new(0, 4),
        export: false,
    });
    module.def_names.insert("E".to_owned(), 0);

    let err =
        Builder::build(&set, DefId::new(main, 0)).expect_err("branchless alternation must fail");
    assert!(matches!(
        err,
        CompileError::EmptyAlternation { ref pattern } if pattern.as_str() == "E"
    ));
}

#[test]
fn mutual_recursion_terminates() {
    let nfa = build("A = 1 B\nB = 2 A", "A");
    assert!(nfa.len() < 32);
}

use insta::assert_snapshot;

use crate::dfa::epsilon_closure;
use crate::nfa::Builder;
use crate::test_utils::{accepts, compile, def_id, load};

#[test]
fn sequence_of_two_symbols() {
    let (_, auto) = compile("P = 65 66", "P");
    assert_eq!(auto.len(), 3);
    assert!(accepts(&auto, &[65, 66]));
    assert!(!accepts(&auto, &[65]));
    assert!(!accepts(&auto, &[65, 67]));
    assert_eq!(auto.transit(1, 67), None);
}

#[test]
fn alternation_reaches_a_final_state_on_either_symbol() {
    let (_, auto) = compile("Q = 1 | 2", "Q");
    let one = auto.transit(auto.start_state(), 1).expect("1 transits");
    let two = auto.transit(auto.start_state(), 2).expect("2 transits");
    assert!(auto.is_final(one));
    assert!(auto.is_final(two));
    assert_eq!(auto.transit(auto.start_state(), 3), None);
}

#[test]
fn repetition_is_final_immediately_and_after_each_symbol() {
    let (_, auto) = compile("R = 9*", "R");
    assert!(accepts(&auto, &[]));
    assert!(accepts(&auto, &[9]));
    assert!(accepts(&auto, &[9, 9, 9, 9]));
    assert!(!accepts(&auto, &[9, 9, 8]));
}

#[test]
fn repetition_dump() {
    let (_, auto) = compile("R = 9*", "R");
    assert_snapshot!(auto.dump(), @r"
    start: S0
    S0*: 9 → S1
    S1*: 9 → S1
    ");
}

#[test]
fn overlapping_ranges_split_at_boundaries() {
    let (_, auto) = compile("M = 48..57 | 53..70", "M");
    assert_snapshot!(auto.dump(), @r"
    start: S0
    S0: 48..52 → S1, 53..57 → S2, 58..70 → S3
    S1*: ∅
    S2*: ∅
    S3*: ∅
    ");
}

#[test]
fn range_bounds_are_inclusive() {
    let (_, auto) = compile("M = 48..57", "M");
    assert_eq!(auto.transit(0, 47), None);
    assert_eq!(auto.transit(0, 48), Some(1));
    assert_eq!(auto.transit(0, 57), Some(1));
    assert_eq!(auto.transit(0, 58), None);
}

#[test]
fn provenance_union_over_merged_states() {
    let (set, auto) = compile("P = 65 66", "P");
    assert_snapshot!(auto.dump_assoc(&set), @r"
    S0: P/Const@4..6[SI], P/Seq@4..9[SI]
    S1: P/Const@4..6[IF], P/Const@7..9[SI], P/Seq@4..9[I]
    S2: P/Const@7..9[IF], P/Seq@4..9[IF]
    ");
}

#[test]
fn provenance_is_sorted_by_node() {
    let (_, auto) = compile("P = (1 | 2) 3*", "P");
    for state in &auto.states {
        let keys: Vec<_> = state.provenance.iter().map(|&(ast, _)| ast).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(keys, sorted);
    }
}

#[test]
fn closure_is_idempotent_and_contains_seed() {
    let (set, main) = load("R = 9*");
    let nfa = Builder::build(&set, def_id(&set, main, "R")).expect("builds");
    let once = epsilon_closure(&nfa, &[nfa.start]);
    let twice = epsilon_closure(&nfa, &once);
    assert_eq!(once, twice);
    assert!(once.contains(&nfa.start));
    assert!(once.contains(&nfa.accept));
}

#[test]
fn compilation_is_reproducible() {
    let (_, first) = compile("P = ('a'..'z' | '0'..'9')+ 46", "P");
    let (_, second) = compile("P = ('a'..'z' | '0'..'9')+ 46", "P");
    assert_eq!(first.states, second.states);
}

#[test]
fn rejection_leaves_no_transition() {
    let (_, auto) = compile("P = 65 66", "P");
    let end = auto.transit(auto.transit(0, 65).unwrap(), 66).unwrap();
    assert!(auto.is_final(end));
    assert_eq!(auto.state(end).edges, Vec::new());
}

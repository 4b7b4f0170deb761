use remac_core::Colors;

use crate::simulate::{render_view, run, state_view};
use crate::test_utils::compile;

#[test]
fn trace_records_every_state() {
    let (_, auto) = compile("P = 65 66", "P");
    let trace = run(&auto, [65, 66]);
    assert_eq!(trace.states, vec![0, 1, 2]);
    assert_eq!(trace.stuck_on, None);
    assert!(trace.accepted);
}

#[test]
fn trace_stops_on_missing_transition() {
    let (_, auto) = compile("P = 65 66", "P");
    let trace = run(&auto, [65, 67]);
    assert_eq!(trace.states, vec![0, 1]);
    assert_eq!(trace.stuck_on, Some(67));
    assert!(!trace.accepted);
}

#[test]
fn view_collects_boundaries_and_coverage() {
    let (set, auto) = compile("P = 65 66", "P");
    let state = auto.transit(auto.start_state(), 65).expect("transits");
    let view = state_view(&auto, &set, state);

    assert_eq!(view.groups.len(), 1);
    let group = &view.groups[0];
    // The first constant (`65` at 4..6) is completing, the second (`66` at
    // 7..9) is starting, and the sequence covers both.
    assert_eq!(group.finals, vec![6]);
    assert_eq!(group.starts, vec![7]);
    assert_eq!(group.inner, vec![(4, 9)]);
}

#[test]
fn view_renders_boundary_marks() {
    let (set, auto) = compile("P = 65 66", "P");
    let state = auto.transit(auto.start_state(), 65).expect("transits");
    let view = state_view(&auto, &set, state);
    assert_eq!(render_view(&set, &view, &Colors::OFF), "P = 65⟩ ⟨66\n");
}

#[test]
fn view_colors_covered_regions() {
    let (set, auto) = compile("P = 65 66", "P");
    let state = auto.transit(auto.start_state(), 65).expect("transits");
    let view = state_view(&auto, &set, state);
    let rendered = render_view(&set, &view, &Colors::ON);
    assert!(rendered.contains(Colors::ON.cyan));
    assert!(rendered.contains(Colors::ON.reset));
}

#[test]
fn overlapping_spans_merge_into_maximal_intervals() {
    let (set, auto) = compile("O = 1?", "O");
    let view = state_view(&auto, &set, auto.start_state());

    assert_eq!(view.groups.len(), 1);
    let group = &view.groups[0];
    assert_eq!(group.starts, vec![4, 5]);
    assert_eq!(group.finals, vec![5, 6]);
    // The constant and the alternation overlap; zero-width coverage from
    // the empty branch is dropped.
    assert_eq!(group.inner, vec![(4, 6)]);
}

#[test]
fn groups_split_by_definition() {
    let (set, auto) = compile("A = 1\nP = A 2", "P");
    let view = state_view(&auto, &set, auto.start_state());
    // Start state sits before both P's sequence and the inlined A body.
    assert_eq!(view.groups.len(), 2);
}

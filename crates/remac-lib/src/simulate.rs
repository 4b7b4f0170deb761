//! Stepping a compiled automaton over input, and mapping the reached state
//! back onto the pattern source.
//!
//! The source view groups a state's provenance by definition and sweeps the
//! tagged spans into three layers: entry boundaries (`Start` roles), exit
//! boundaries (`Final` roles), and covered regions (`Inner` roles, merged by
//! a nesting counter so overlapping spans collapse into maximal intervals).

use std::collections::BTreeMap;

use remac_core::{Colors, DefId, ModuleSet};

use crate::dfa::CompiledAutomaton;

/// Result of feeding an input through an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Every state visited, starting with the start state.
    pub states: Vec<u32>,
    /// Symbol that had no outgoing transition, if the walk got stuck.
    pub stuck_on: Option<u32>,
    pub accepted: bool,
}

/// Run `input` through `auto` from the start state.
///
/// A missing transition stops the walk; the trace keeps the states reached
/// up to that point and the run rejects.
pub fn run(auto: &CompiledAutomaton, input: impl IntoIterator<Item = u32>) -> Trace {
    let mut state = auto.start_state();
    let mut states = vec![state];
    for symbol in input {
        match auto.transit(state, symbol) {
            Some(next) => {
                state = next;
                states.push(next);
            }
            None => {
                return Trace {
                    states,
                    stuck_on: Some(symbol),
                    accepted: false,
                };
            }
        }
    }
    let accepted = auto.is_final(state);
    Trace {
        states,
        stuck_on: None,
        accepted,
    }
}

/// One definition's share of a state's provenance, as source geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefView {
    pub def: DefId,
    /// Byte offsets where a contributing sub-expression begins. Sorted.
    pub starts: Vec<u32>,
    /// Byte offsets where a contributing sub-expression ends. Sorted.
    pub finals: Vec<u32>,
    /// Maximal half-open byte intervals covered by contributing
    /// sub-expressions. Sorted, non-overlapping, non-empty.
    pub inner: Vec<(u32, u32)>,
}

/// A state's provenance grouped by definition, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateView {
    pub pattern: DefId,
    pub groups: Vec<DefView>,
}

/// Project `state`'s provenance onto the definitions it came from.
pub fn state_view(auto: &CompiledAutomaton, set: &ModuleSet, state: u32) -> StateView {
    let mut grouped: BTreeMap<DefId, (Vec<u32>, Vec<u32>, Vec<(u32, i32)>)> = BTreeMap::new();

    for &(ast, roles) in auto.provenance(state) {
        let node = set.module(ast.module).arena.node(ast.expr);
        let def = DefId::new(ast.module, node.def);
        let (starts, finals, events) = grouped.entry(def).or_default();
        if roles.has_start() {
            starts.push(node.span.start);
        }
        if roles.has_final() {
            finals.push(node.span.end);
        }
        if roles.has_inner() {
            events.push((node.span.start, 1));
            events.push((node.span.end, -1));
        }
    }

    let groups = grouped
        .into_iter()
        .map(|(def, (mut starts, mut finals, events))| {
            starts.sort_unstable();
            starts.dedup();
            finals.sort_unstable();
            finals.dedup();
            DefView {
                def,
                starts,
                finals,
                inner: sweep(events),
            }
        })
        .collect();

    StateView {
        pattern: auto.pattern,
        groups,
    }
}

/// Merge `(offset, delta)` coverage events into maximal intervals.
///
/// Openings sort before closings at equal offsets, so abutting spans fuse
/// instead of producing a seam.
fn sweep(mut events: Vec<(u32, i32)>) -> Vec<(u32, u32)> {
    events.sort_unstable_by_key(|&(offset, delta)| (offset, -delta));
    let mut intervals = Vec::new();
    let mut depth = 0i32;
    let mut open = 0u32;
    for (offset, delta) in events {
        if depth == 0 && delta > 0 {
            open = offset;
        }
        depth += delta;
        if depth == 0 && delta < 0 && open < offset {
            intervals.push((open, offset));
        }
    }
    intervals
}

/// Render the view as annotated source, one definition per line.
///
/// Entry boundaries are marked `⟨`, exit boundaries `⟩`, and covered
/// regions are colored when `colors` is enabled. Definitions from modules
/// other than the pattern's own are prefixed with their module name.
pub fn render_view(set: &ModuleSet, view: &StateView, colors: &Colors) -> String {
    let mut out = String::new();
    for group in &view.groups {
        let module = set.module(group.def.module);
        let def = module.def(group.def.index);
        let span = def.span;

        // Exit marks first so an abutting exit/entry pair reads `⟩⟨`.
        let mut marks: BTreeMap<u32, String> = BTreeMap::new();
        for &offset in &group.finals {
            marks.entry(offset).or_default().push('⟩');
        }
        for &offset in &group.starts {
            marks.entry(offset).or_default().push('⟨');
        }

        if group.def.module != view.pattern.module {
            out.push_str(&module.name);
            out.push_str(": ");
        }

        let mut inner = group.inner.iter().copied().peekable();
        let mut open_until: Option<u32> = None;
        let text = span.text(&module.source);
        for (i, c) in text.char_indices() {
            let offset = span.start + i as u32;
            if open_until == Some(offset) {
                out.push_str(colors.reset);
                open_until = None;
            }
            if let Some(mark) = marks.get(&offset) {
                out.push_str(mark);
            }
            if open_until.is_none()
                && let Some(&(lo, hi)) = inner.peek()
                && lo == offset
            {
                out.push_str(colors.cyan);
                open_until = Some(hi);
                inner.next();
            }
            out.push(c);
        }
        if open_until.is_some() {
            out.push_str(colors.reset);
        }
        if let Some(mark) = marks.get(&span.end) {
            out.push_str(mark);
        }
        out.push('\n');
    }
    out
}

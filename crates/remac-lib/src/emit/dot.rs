//! Graphviz rendering of a compiled automaton.

use std::fmt::Write;

use crate::dfa::CompiledAutomaton;

/// Render `auto` as a `dot` digraph named `name`.
pub fn generate_dot(auto: &CompiledAutomaton, name: &str) -> String {
    let mut out = String::new();
    format_dot(&mut out, auto, name).expect("String write never fails");
    out
}

fn format_dot(w: &mut String, auto: &CompiledAutomaton, name: &str) -> std::fmt::Result {
    writeln!(w, "digraph \"{name}\" {{")?;
    writeln!(w, "    rankdir=LR;")?;
    writeln!(w, "    node [shape=circle];")?;
    writeln!(w, "    entry [shape=point];")?;
    writeln!(w, "    entry -> S0;")?;
    for state in &auto.states {
        if state.is_final {
            writeln!(w, "    S{} [shape=doublecircle];", state.id)?;
        }
        for &(lo, hi, target) in &state.edges {
            writeln!(
                w,
                "    S{} -> S{} [label=\"{}\"];",
                state.id,
                target,
                edge_label(lo, hi)
            )?;
        }
    }
    writeln!(w, "}}")
}

/// Printable ASCII symbols render as characters, everything else numerically.
fn edge_label(lo: u32, hi: u32) -> String {
    match (symbol_label(lo), symbol_label(hi)) {
        (a, b) if lo == hi => {
            debug_assert_eq!(a, b);
            a
        }
        (a, b) => format!("{a}..{b}"),
    }
}

fn symbol_label(symbol: u32) -> String {
    match char::from_u32(symbol) {
        Some(c) if c.is_ascii_graphic() && c != '"' && c != '\\' => format!("'{c}'"),
        _ => format!("{symbol}"),
    }
}

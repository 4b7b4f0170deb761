//! Dump helpers for automaton inspection and snapshot testing.

use std::fmt::Write;

use remac_core::ModuleSet;

use crate::dfa::CompiledAutomaton;
use crate::nfa::Nfa;

fn fmt_range(lo: u32, hi: u32) -> String {
    if lo == hi {
        format!("{lo}")
    } else {
        format!("{lo}..{hi}")
    }
}

impl Nfa {
    /// One line per state: symbol edges, then grouped epsilon successors.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        writeln!(w, "start: N{}  accept: N{}", self.start, self.accept)?;
        for (id, state) in self.iter() {
            let mut parts: Vec<String> = state
                .edges
                .iter()
                .map(|&(lo, hi, t)| format!("{} → N{}", fmt_range(lo, hi), t))
                .collect();
            if !state.eps.is_empty() {
                let succs: Vec<String> = state.eps.iter().map(|t| format!("N{t}")).collect();
                parts.push(format!("ε → {}", succs.join(", ")));
            }
            if parts.is_empty() {
                writeln!(w, "N{id}: ∅")?;
            } else {
                writeln!(w, "N{id}: {}", parts.join("; "))?;
            }
        }
        Ok(())
    }
}

impl CompiledAutomaton {
    /// One line per state; final states are starred.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        writeln!(w, "start: S0")?;
        for state in &self.states {
            let marker = if state.is_final { "*" } else { "" };
            if state.edges.is_empty() {
                writeln!(w, "S{}{}: ∅", state.id, marker)?;
            } else {
                let edges: Vec<String> = state
                    .edges
                    .iter()
                    .map(|&(lo, hi, t)| format!("{} → S{}", fmt_range(lo, hi), t))
                    .collect();
                writeln!(w, "S{}{}: {}", state.id, marker, edges.join(", "))?;
            }
        }
        Ok(())
    }

    /// Per state, the contributing source sub-expressions with roles and
    /// spans: `S1: Word/Const@0..3[SF]`.
    pub fn dump_assoc(&self, set: &ModuleSet) -> String {
        let mut out = String::new();
        self.format_assoc(&mut out, set)
            .expect("String write never fails");
        out
    }

    fn format_assoc(&self, w: &mut String, set: &ModuleSet) -> std::fmt::Result {
        for state in &self.states {
            if state.provenance.is_empty() {
                writeln!(w, "S{}: ∅", state.id)?;
                continue;
            }
            let entries: Vec<String> = state
                .provenance
                .iter()
                .map(|&(ast, roles)| {
                    let module = set.module(ast.module);
                    let node = module.arena.node(ast.expr);
                    let def_name = &module.defs[node.def as usize].name;
                    let prefix = if ast.module == self.pattern.module {
                        String::new()
                    } else {
                        format!("{}.", module.name)
                    };
                    format!(
                        "{prefix}{def_name}/{}@{}[{roles}]",
                        node.expr.kind_name(),
                        node.span
                    )
                })
                .collect();
            writeln!(w, "S{}: {}", state.id, entries.join(", "))?;
        }
        Ok(())
    }
}

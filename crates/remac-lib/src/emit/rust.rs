//! Rust source generation for exported patterns.
//!
//! Each exported definition becomes a self-contained module with a static
//! transition table and no dependency on this crate, suitable for pasting
//! into a consumer that only needs recognition.

use std::fmt::Write;

use remac_core::ModuleSet;
use remac_core::utils::to_snake_case;

use crate::dfa::CompiledAutomaton;
use crate::registry::Registry;

/// Render every definition flagged by `Registry::compile_export` as Rust
/// source, one module per pattern, in flag order.
pub fn generate_rust(registry: &Registry, set: &ModuleSet) -> String {
    let mut out = String::new();
    format_rust(&mut out, registry, set).expect("String write never fails");
    out
}

fn format_rust(w: &mut String, registry: &Registry, set: &ModuleSet) -> std::fmt::Result {
    writeln!(w, "// @generated by remac. Do not edit.")?;
    for def in registry.exported() {
        let Some(auto) = registry.get(def) else {
            continue;
        };
        let name = to_snake_case(&set.def(def).name);
        w.push('\n');
        pattern_module(w, &name, &auto)?;
    }
    Ok(())
}

fn pattern_module(w: &mut String, name: &str, auto: &CompiledAutomaton) -> std::fmt::Result {
    writeln!(w, "pub mod {name} {{")?;
    writeln!(w, "    pub const START: u32 = 0;")?;
    writeln!(w)?;

    writeln!(
        w,
        "    /// `(lo, hi, target)` per state, bounds inclusive, sorted by `lo`."
    )?;
    writeln!(w, "    static EDGES: &[&[(u32, u32, u32)]] = &[")?;
    for state in &auto.states {
        let rows: Vec<String> = state
            .edges
            .iter()
            .map(|&(lo, hi, t)| format!("({lo}, {hi}, {t})"))
            .collect();
        writeln!(w, "        &[{}],", rows.join(", "))?;
    }
    writeln!(w, "    ];")?;
    writeln!(w)?;

    let finals: Vec<&str> = auto
        .states
        .iter()
        .map(|s| if s.is_final { "true" } else { "false" })
        .collect();
    writeln!(w, "    static FINAL: &[bool] = &[{}];", finals.join(", "))?;
    writeln!(w)?;

    writeln!(w, "    pub fn transit(state: u32, symbol: u32) -> Option<u32> {{")?;
    writeln!(w, "        let edges = EDGES[state as usize];")?;
    writeln!(
        w,
        "        let i = edges.partition_point(|&(lo, _, _)| lo <= symbol);"
    )?;
    writeln!(w, "        if i == 0 {{")?;
    writeln!(w, "            return None;")?;
    writeln!(w, "        }}")?;
    writeln!(w, "        let (_, hi, target) = edges[i - 1];")?;
    writeln!(w, "        (symbol <= hi).then_some(target)")?;
    writeln!(w, "    }}")?;
    writeln!(w)?;

    writeln!(w, "    pub fn is_final(state: u32) -> bool {{")?;
    writeln!(w, "        FINAL[state as usize]")?;
    writeln!(w, "    }}")?;
    writeln!(w)?;

    writeln!(
        w,
        "    pub fn recognize(input: impl IntoIterator<Item = u32>) -> bool {{"
    )?;
    writeln!(w, "        let mut state = START;")?;
    writeln!(w, "        for symbol in input {{")?;
    writeln!(w, "            match transit(state, symbol) {{")?;
    writeln!(w, "                Some(next) => state = next,")?;
    writeln!(w, "                None => return false,")?;
    writeln!(w, "            }}")?;
    writeln!(w, "        }}")?;
    writeln!(w, "        is_final(state)")?;
    writeln!(w, "    }}")?;
    writeln!(w, "}}")
}

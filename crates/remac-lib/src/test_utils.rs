//! Shared helpers for compiler tests.

use std::sync::Arc;

use remac_core::{DefId, ModuleId, ModuleSet};

use crate::dfa::CompiledAutomaton;
use crate::loader::load_str;
use crate::registry::Registry;
use crate::simulate::run;

/// Parse an inline source as module `main`.
pub(crate) fn load(source: &str) -> (ModuleSet, ModuleId) {
    load_str(source, "main").expect("source should parse")
}

/// Definition id of `name` in `module`.
pub(crate) fn def_id(set: &ModuleSet, module: ModuleId, name: &str) -> DefId {
    let (index, _) = set
        .module(module)
        .def_by_name(name)
        .unwrap_or_else(|| panic!("no definition named {name}"));
    DefId::new(module, index)
}

/// Parse and compile one definition from an inline source.
pub(crate) fn compile(source: &str, name: &str) -> (ModuleSet, Arc<CompiledAutomaton>) {
    let (set, main) = load(source);
    let def = def_id(&set, main, name);
    let mut registry = Registry::new();
    let auto = registry.compile(&set, def).expect("pattern should compile");
    (set, auto)
}

pub(crate) fn accepts(auto: &CompiledAutomaton, input: &[u32]) -> bool {
    run(auto, input.iter().copied()).accepted
}

pub(crate) fn accepts_str(auto: &CompiledAutomaton, input: &str) -> bool {
    run(auto, input.chars().map(|c| c as u32)).accepted
}

//! Compiled automaton registry.
//!
//! Process-wide cache from pattern definition to compiled automaton, held
//! as an explicit value rather than ambient global state. Compilation is
//! synchronous and runs to completion; re-entrancy over self- or mutually
//! referential definitions is handled inside the builder (references to a
//! definition under construction become jumps, never nested `compile`
//! calls), so the registry itself needs no in-flight marker. Callers that
//! share a registry across threads wrap it in a mutex.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use remac_core::{DefId, ModuleSet};

use crate::dfa::{CompiledAutomaton, determinize};
use crate::error::CompileError;
use crate::nfa::Builder;

#[derive(Debug, Default)]
pub struct Registry {
    compiled: IndexMap<DefId, Arc<CompiledAutomaton>>,
    exported: IndexSet<DefId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `def`, or return the cached automaton.
    ///
    /// On error nothing is cached, for this definition or any definition it
    /// references; a later call retries from scratch.
    pub fn compile(
        &mut self,
        set: &ModuleSet,
        def: DefId,
    ) -> Result<Arc<CompiledAutomaton>, CompileError> {
        if let Some(auto) = self.compiled.get(&def) {
            return Ok(auto.clone());
        }
        let nfa = Builder::build(set, def)?;
        let auto = Arc::new(determinize(&nfa, def));
        self.compiled.insert(def, auto.clone());
        Ok(auto)
    }

    /// Same as `compile`, additionally marking the result eligible for
    /// external code generation.
    pub fn compile_export(
        &mut self,
        set: &ModuleSet,
        def: DefId,
    ) -> Result<Arc<CompiledAutomaton>, CompileError> {
        let auto = self.compile(set, def)?;
        self.exported.insert(def);
        Ok(auto)
    }

    /// Cached automaton, if `def` has been compiled.
    pub fn get(&self, def: DefId) -> Option<Arc<CompiledAutomaton>> {
        self.compiled.get(&def).cloned()
    }

    pub fn is_exported(&self, def: DefId) -> bool {
        self.exported.contains(&def)
    }

    /// Definitions flagged by `compile_export`, in flag order.
    pub fn exported(&self) -> impl Iterator<Item = DefId> + '_ {
        self.exported.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Drop every cached automaton, e.g. before a full module reload.
    /// External holders must re-fetch afterwards.
    pub fn clear(&mut self) {
        self.compiled.clear();
        self.exported.clear();
    }
}

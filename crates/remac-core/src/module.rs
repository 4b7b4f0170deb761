//! Modules: named pattern and constant definitions plus import edges.
//!
//! A `ModuleSet` owns every loaded module; cross-module references go
//! through `ModuleId`/`DefId` indices, so cyclic imports need no shared
//! ownership.

use indexmap::IndexMap;

use crate::ast::{ExprId, PatternArena};
use crate::span::Span;

/// Index into a `ModuleSet`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ModuleId(u32);

impl ModuleId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Identity of a pattern definition: owning module plus position in its
/// definition list. Registry cache key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DefId {
    pub module: ModuleId,
    pub index: u32,
}

impl DefId {
    pub fn new(module: ModuleId, index: u32) -> Self {
        Self { module, index }
    }
}

/// A named pattern definition. Immutable once its module is loaded.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PatternDef {
    pub name: String,
    pub body: ExprId,
    /// Span of the whole `Name = expr` item.
    pub span: Span,
    /// Declared with `export`; eligible for code generation.
    pub export: bool,
}

/// A named integer constant (`#define NAME value`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConstDef {
    pub name: String,
    pub value: u32,
    pub span: Span,
}

/// One loaded source file.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Module {
    /// Display name (file stem, or a caller-chosen name for inline sources).
    pub name: String,
    /// Raw source text, kept for provenance-to-text mapping.
    pub source: String,
    pub arena: PatternArena,
    pub defs: Vec<PatternDef>,
    /// Name → index into `defs`, insertion order preserved.
    pub def_names: IndexMap<String, u32>,
    pub consts: IndexMap<String, ConstDef>,
    /// `import "..." as alias` targets.
    pub qualified: IndexMap<String, ModuleId>,
    /// Bare `import "..."` targets, searched for unqualified names.
    pub unqualified: Vec<ModuleId>,
}

impl Module {
    pub fn def(&self, index: u32) -> &PatternDef {
        &self.defs[index as usize]
    }

    pub fn def_by_name(&self, name: &str) -> Option<(u32, &PatternDef)> {
        let index = *self.def_names.get(name)?;
        Some((index, &self.defs[index as usize]))
    }
}

/// Arena of loaded modules.
#[derive(Clone, Debug, Default)]
pub struct ModuleSet {
    modules: Vec<Module>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a slot for a module being loaded, returning its id.
    ///
    /// The slot starts empty so that import cycles can hand out ids before
    /// the module body is parsed; fill it with `module_mut`.
    pub fn alloc(&mut self, name: impl Into<String>) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(Module {
            name: name.into(),
            ..Module::default()
        });
        id
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.0 as usize]
    }

    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.0 as usize]
    }

    pub fn def(&self, id: DefId) -> &PatternDef {
        self.module(id.module).def(id.index)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleId(i as u32), m))
    }
}

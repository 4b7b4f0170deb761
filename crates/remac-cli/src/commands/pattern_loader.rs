//! Shared input handling: file path or inline `-p` source.

use std::path::Path;

use remac_core::{DefId, ModuleId, ModuleSet};
use remac_lib::loader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("pass a module file or an inline pattern with -p")]
    Missing,
    #[error(transparent)]
    Load(#[from] remac_lib::LoadError),
}

/// Load the module graph from a file, or parse inline source as a single
/// module named `pattern`.
pub fn load_patterns(
    path: Option<&Path>,
    text: Option<&str>,
) -> Result<(ModuleSet, ModuleId), InputError> {
    match (path, text) {
        (Some(path), _) => Ok(loader::load(path)?),
        (None, Some(text)) => Ok(loader::load_str(text, "pattern")?),
        (None, None) => Err(InputError::Missing),
    }
}

/// Pick the definition to operate on: by name, or the module's first.
pub fn select_def(set: &ModuleSet, module: ModuleId, name: Option<&str>) -> Result<DefId, String> {
    let m = set.module(module);
    match name {
        Some(name) => m
            .def_by_name(name)
            .map(|(index, _)| DefId::new(module, index))
            .ok_or_else(|| format!("no pattern named `{name}` in {}", m.name)),
        None if m.defs.is_empty() => Err(format!("{} defines no patterns", m.name)),
        None => Ok(DefId::new(module, 0)),
    }
}

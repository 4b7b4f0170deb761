//! Module graph loading.
//!
//! `load` reads a root file, parses it, and follows `import` declarations
//! relative to the importing file. Each file is parsed exactly once
//! (path-keyed); a module id is handed out before its body is parsed so
//! cyclic imports terminate.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use remac_core::{ModuleId, ModuleSet};

use crate::error::LoadError;
use crate::parser::{ImportDecl, parse_module};

/// Load a module graph rooted at `path`. Returns the set and the root id.
pub fn load(path: &Path) -> Result<(ModuleSet, ModuleId), LoadError> {
    let mut loader = Loader {
        set: ModuleSet::new(),
        by_path: IndexMap::new(),
    };
    let root = loader.load_file(path)?;
    Ok((loader.set, root))
}

/// Parse a single inline source as a self-contained module set.
///
/// Imports are not followed; sources that need them go through `load`.
pub fn load_str(source: &str, name: &str) -> Result<(ModuleSet, ModuleId), LoadError> {
    let (module, imports) = parse_module(source, name).map_err(|e| LoadError::Parse {
        path: name.to_owned(),
        source: e,
    })?;
    if let Some(import) = imports.first() {
        return Err(LoadError::Io {
            path: import.path.clone(),
            message: "imports cannot be resolved from an inline source".to_owned(),
        });
    }
    let mut set = ModuleSet::new();
    let id = set.alloc(name);
    *set.module_mut(id) = module;
    Ok((set, id))
}

struct Loader {
    set: ModuleSet,
    by_path: IndexMap<PathBuf, ModuleId>,
}

impl Loader {
    fn load_file(&mut self, path: &Path) -> Result<ModuleId, LoadError> {
        let canonical = path.canonicalize().map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(&id) = self.by_path.get(&canonical) {
            return Ok(id);
        }

        let source = std::fs::read_to_string(&canonical).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let name = canonical
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_owned());

        // Reserve the id first so a cyclic import of this file resolves.
        let id = self.set.alloc(&name);
        self.by_path.insert(canonical.clone(), id);

        let (module, imports) =
            parse_module(&source, &name).map_err(|e| LoadError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        *self.set.module_mut(id) = module;

        let base = canonical.parent().map(Path::to_path_buf).unwrap_or_default();
        for ImportDecl { path: rel, alias, .. } in imports {
            let target = self.load_file(&base.join(&rel))?;
            let module = self.set.module_mut(id);
            match alias {
                Some(alias) => {
                    module.qualified.insert(alias, target);
                }
                None => module.unqualified.push(target),
            }
        }

        Ok(id)
    }
}

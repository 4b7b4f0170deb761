//! Name resolution over a module set.
//!
//! A name resolves against the referencing module's own definitions first,
//! then through exactly one layer of unqualified-import search. More than
//! one hit across imports is ambiguous; the compiler propagates that as an
//! error rather than picking a candidate.

use remac_core::{ConstDef, DefId, ModuleId, ModuleSet};

/// Outcome of resolving a name from a given module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    NotFound,
    Ambiguous,
    Pattern(DefId),
    Constant(&'a ConstDef),
}

/// Resolve `name` (optionally `qualifier.name`) from `module`.
pub fn resolve<'a>(
    set: &'a ModuleSet,
    module: ModuleId,
    qualifier: Option<&str>,
    name: &str,
) -> Resolution<'a> {
    let m = set.module(module);

    if let Some(q) = qualifier {
        let Some(&target) = m.qualified.get(q) else {
            return Resolution::NotFound;
        };
        return lookup_in(set, target, name).unwrap_or(Resolution::NotFound);
    }

    // Own module shadows imports.
    if let Some(hit) = lookup_in(set, module, name) {
        return hit;
    }

    let mut found = None;
    for &import in &m.unqualified {
        if let Some(hit) = lookup_in(set, import, name) {
            if found.is_some() {
                return Resolution::Ambiguous;
            }
            found = Some(hit);
        }
    }
    found.unwrap_or(Resolution::NotFound)
}

fn lookup_in<'a>(set: &'a ModuleSet, module: ModuleId, name: &str) -> Option<Resolution<'a>> {
    let m = set.module(module);
    if let Some((index, _)) = m.def_by_name(name) {
        return Some(Resolution::Pattern(DefId::new(module, index)));
    }
    if let Some(c) = m.consts.get(name) {
        return Some(Resolution::Constant(c));
    }
    None
}

use std::path::PathBuf;

use remac_core::DefId;
use remac_lib::Registry;

use super::pattern_loader::load_patterns;

pub struct CheckArgs {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
}

pub fn run(args: CheckArgs) {
    let (set, _) = match load_patterns(args.module_path.as_deref(), args.pattern_text.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let mut registry = Registry::new();
    let mut failed = false;
    for (id, module) in set.iter() {
        for index in 0..module.defs.len() {
            if let Err(e) = registry.compile(&set, DefId::new(id, index as u32)) {
                eprintln!("error: {}: {e}", module.name);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    // Silent on success (like cargo check).
}

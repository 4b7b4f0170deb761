use std::fs;
use std::path::PathBuf;

use remac_core::DefId;
use remac_lib::Registry;
use remac_lib::emit::generate_rust;

use super::pattern_loader::load_patterns;

pub struct GenArgs {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
    pub output: Option<PathBuf>,
}

pub fn run(args: GenArgs) {
    let (set, root) = match load_patterns(args.module_path.as_deref(), args.pattern_text.as_deref())
    {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let module = set.module(root);
    let exported: Vec<DefId> = module
        .defs
        .iter()
        .enumerate()
        .filter(|(_, def)| def.export)
        .map(|(index, _)| DefId::new(root, index as u32))
        .collect();
    if exported.is_empty() {
        eprintln!("error: {} exports no patterns", module.name);
        std::process::exit(1);
    }

    let mut registry = Registry::new();
    for def in &exported {
        if let Err(e) = registry.compile_export(&set, *def) {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }

    let code = generate_rust(&registry, &set);
    match args.output.as_deref() {
        Some(path) => {
            if let Err(e) = fs::write(path, &code) {
                eprintln!("error: cannot write {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        None => print!("{code}"),
    }
}

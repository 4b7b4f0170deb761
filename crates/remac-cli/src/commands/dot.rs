use std::fs;
use std::path::PathBuf;

use remac_lib::Registry;
use remac_lib::emit::generate_dot;

use super::pattern_loader::{load_patterns, select_def};

pub struct DotArgs {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
    pub name: Option<String>,
    pub output: Option<PathBuf>,
}

pub fn run(args: DotArgs) {
    let (set, root) = match load_patterns(args.module_path.as_deref(), args.pattern_text.as_deref())
    {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let def = match select_def(&set, root, args.name.as_deref()) {
        Ok(def) => def,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };

    let mut registry = Registry::new();
    let auto = match registry.compile(&set, def) {
        Ok(auto) => auto,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let dot = generate_dot(&auto, &set.def(def).name);
    write_output(args.output.as_deref(), &dot);
}

fn write_output(path: Option<&std::path::Path>, content: &str) {
    match path {
        Some(path) => {
            if let Err(e) = fs::write(path, content) {
                eprintln!("error: cannot write {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        None => print!("{content}"),
    }
}

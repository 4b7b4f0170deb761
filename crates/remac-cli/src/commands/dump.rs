use std::path::PathBuf;

use remac_lib::nfa::Builder;
use remac_lib::{DState, Registry};

use super::pattern_loader::{load_patterns, select_def};

pub struct DumpArgs {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
    pub name: Option<String>,
    pub nfa: bool,
    pub assoc: bool,
    pub json: bool,
}

#[derive(serde::Serialize)]
struct DumpJson<'a> {
    pattern: &'a str,
    states: &'a [DState],
}

pub fn run(args: DumpArgs) {
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

    if args.nfa {
        match Builder::build(&set, def) {
            Ok(nfa) => print!("{}", nfa.dump()),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut registry = Registry::new();
    let auto = match registry.compile(&set, def) {
        Ok(auto) => auto,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        let payload = DumpJson {
            pattern: &set.def(def).name,
            states: &auto.states,
        };
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    } else if args.assoc {
        print!("{}", auto.dump_assoc(&set));
    } else {
        print!("{}", auto.dump());
    }
}

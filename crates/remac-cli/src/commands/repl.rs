//! Interactive pattern shell.
//!
//! Definitions accumulate in a scratch module; a preloaded file is visible
//! through an unqualified import, so its patterns resolve by name. Every
//! new definition invalidates the compiled cache and reselects the latest
//! pattern.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use remac_core::{Colors, ModuleId, ModuleSet};
use remac_lib::dfa::CompiledAutomaton;
use remac_lib::resolve::{Resolution, resolve};
use remac_lib::simulate::{self, render_view, state_view};
use remac_lib::{Registry, loader, parser};

pub struct ReplArgs {
    pub module_path: Option<PathBuf>,
    pub color: bool,
}

const HELP: &str = "\
commands:
  .define NAME = EXPR  define a pattern and select it
  .pattern NAME        select an existing pattern
  .automaton           dump the selected pattern's automaton
  .assoc               dump per-state provenance
  .macro               list defined constants
  .integer N N ...     feed integer symbols or constant names
  .string TEXT         feed TEXT's codepoints to the selected pattern
  .help                this text
  .quit                leave

anything else is fed as input, like .string";

pub fn run(args: ReplArgs) {
    let (base, preloaded) = match args.module_path.as_deref() {
        Some(path) => match loader::load(path) {
            Ok((set, root)) => (set, vec![root]),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        None => (ModuleSet::new(), Vec::new()),
    };

    let mut repl = Repl {
        base,
        preloaded,
        scratch_src: String::new(),
        set: ModuleSet::new(),
        scratch: ModuleId::from_raw(0),
        registry: Registry::new(),
        current: None,
        colors: Colors::new(args.color),
    };
    if let Err(msg) = repl.rebuild() {
        eprintln!("error: {msg}");
        std::process::exit(1);
    }
    // Preselect the first pattern of the preloaded module.
    if let Some(&root) = repl.preloaded.first()
        && let Some(def) = repl.set.module(root).defs.first()
    {
        repl.current = Some(def.name.clone());
    }

    println!("remac repl — .help for commands");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("λ> ");
        io::stdout().flush().ok();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
        if !repl.handle(line.trim()) {
            break;
        }
    }
}

struct Repl {
    base: ModuleSet,
    preloaded: Vec<ModuleId>,
    scratch_src: String,
    set: ModuleSet,
    scratch: ModuleId,
    registry: Registry,
    current: Option<String>,
    colors: Colors,
}

impl Repl {
    /// Re-parse the accumulated scratch source on top of the preloaded
    /// modules. Compiled automata are dropped; names re-resolve next use.
    fn rebuild(&mut self) -> Result<(), String> {
        let (module, imports) =
            parser::parse_module(&self.scratch_src, "repl").map_err(|e| e.to_string())?;
        if !imports.is_empty() {
            return Err("imports are not available in the repl".to_owned());
        }

        let mut set = self.base.clone();
        let id = set.alloc("repl");
        *set.module_mut(id) = module;
        set.module_mut(id)
            .unqualified
            .extend(self.preloaded.iter().copied());

        self.set = set;
        self.scratch = id;
        self.registry.clear();
        Ok(())
    }

    /// Returns false when the session should end.
    fn handle(&mut self, input: &str) -> bool {
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };
        match command {
            "" => {}
            ".quit" | ".exit" => return false,
            ".help" => println!("{HELP}"),
            ".define" => self.define(rest),
            ".pattern" => self.select(rest),
            ".macro" => self.list_constants(),
            ".automaton" => {
                if let Some(auto) = self.compile_current() {
                    print!("{}", auto.dump());
                }
            }
            ".assoc" => {
                if let Some(auto) = self.compile_current() {
                    print!("{}", auto.dump_assoc(&self.set));
                }
            }
            ".integer" => match self.parse_symbols(rest) {
                Ok(symbols) => self.feed(&symbols),
                Err(msg) => eprintln!("error: {msg}"),
            },
            ".string" => {
                let symbols: Vec<u32> = rest.chars().map(|c| c as u32).collect();
                self.feed(&symbols);
            }
            _ if command.starts_with('.') => {
                eprintln!("error: unknown command `{command}`; try .help");
            }
            _ => {
                let symbols: Vec<u32> = input.chars().map(|c| c as u32).collect();
                self.feed(&symbols);
            }
        }
        true
    }

    fn list_constants(&self) {
        let mut shown = false;
        for &id in std::iter::once(&self.scratch).chain(&self.preloaded) {
            let module = self.set.module(id);
            for c in module.consts.values() {
                println!("{}.{} = {}", module.name, c.name, c.value);
                shown = true;
            }
        }
        if !shown {
            println!("no constants defined");
        }
    }

    /// Integer input: whitespace-separated symbols, where a bare name
    /// resolves as a `#define` constant.
    fn parse_symbols(&self, input: &str) -> Result<Vec<u32>, String> {
        input
            .split_whitespace()
            .map(|word| {
                if let Ok(value) = word.parse::<u32>() {
                    return Ok(value);
                }
                match resolve(&self.set, self.scratch, None, word) {
                    Resolution::Constant(c) => Ok(c.value),
                    _ => Err(format!("`{word}` is not a symbol or constant")),
                }
            })
            .collect()
    }

    fn define(&mut self, item: &str) {
        if item.is_empty() {
            eprintln!("error: usage: .define NAME = EXPR");
            return;
        }
        let saved = self.scratch_src.clone();
        self.scratch_src.push_str(item);
        self.scratch_src.push('\n');
        if let Err(msg) = self.rebuild() {
            eprintln!("error: {msg}");
            self.scratch_src = saved;
            self.rebuild()
                .expect("previous source already parsed once");
            return;
        }
        if let Some(def) = self.set.module(self.scratch).defs.last() {
            self.current = Some(def.name.clone());
            println!("defined {}", def.name);
        }
    }

    fn select(&mut self, name: &str) {
        if name.is_empty() {
            eprintln!("error: usage: .pattern NAME");
            return;
        }
        match resolve(&self.set, self.scratch, None, name) {
            Resolution::Pattern(_) => {
                self.current = Some(name.to_owned());
            }
            Resolution::Constant(_) => eprintln!("error: `{name}` is a constant, not a pattern"),
            Resolution::Ambiguous => eprintln!("error: `{name}` is ambiguous"),
            Resolution::NotFound => eprintln!("error: no pattern named `{name}`"),
        }
    }

    fn compile_current(&mut self) -> Option<Arc<CompiledAutomaton>> {
        let Some(name) = self.current.clone() else {
            eprintln!("error: no pattern selected; use .macro or .pattern");
            return None;
        };
        match resolve(&self.set, self.scratch, None, &name) {
            Resolution::Pattern(def) => match self.registry.compile(&self.set, def) {
                Ok(auto) => Some(auto),
                Err(e) => {
                    eprintln!("error: {e}");
                    None
                }
            },
            Resolution::Constant(_) => {
                eprintln!("error: `{name}` is a constant, not a pattern");
                None
            }
            Resolution::Ambiguous => {
                eprintln!("error: `{name}` is ambiguous");
                None
            }
            Resolution::NotFound => {
                eprintln!("error: no pattern named `{name}`");
                None
            }
        }
    }

    fn feed(&mut self, symbols: &[u32]) {
        let Some(auto) = self.compile_current() else {
            return;
        };
        let trace = simulate::run(&auto, symbols.iter().copied());
        let c = self.colors;

        let mut states = String::new();
        for (i, &state) in trace.states.iter().enumerate() {
            if i > 0 {
                states.push_str(" → ");
            }
            if auto.is_final(state) {
                states.push_str(&format!("{}S{state}{}", c.yellow, c.reset));
            } else {
                states.push_str(&format!("S{state}"));
            }
        }
        if let Some(symbol) = trace.stuck_on {
            states.push_str(&format!(" {}⊘ {symbol}{}", c.red, c.reset));
        }
        println!("{states}");

        if trace.accepted {
            println!("{}accepted{}", c.green, c.reset);
        } else {
            println!("{}rejected{}", c.red, c.reset);
        }

        if let Some(&last) = trace.states.last() {
            let view = state_view(&auto, &self.set, last);
            print!("{}", render_view(&self.set, &view, &c));
        }
    }
}

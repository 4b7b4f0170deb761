//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so the same definition is reused everywhere it appears.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Pattern module file (positional).
pub fn module_path_arg() -> Arg {
    Arg::new("module_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Pattern module file")
}

/// Inline pattern source (-p/--pattern).
pub fn pattern_text_arg() -> Arg {
    Arg::new("pattern_text")
        .short('p')
        .long("pattern")
        .value_name("TEXT")
        .help("Inline pattern source")
}

/// Pattern name to operate on (positional).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .value_name("NAME")
        .help("Pattern name (defaults to the first definition)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Dump the nondeterministic graph instead of the automaton (--nfa).
pub fn nfa_arg() -> Arg {
    Arg::new("nfa")
        .long("nfa")
        .action(ArgAction::SetTrue)
        .help("Dump the nondeterministic graph before subset construction")
}

/// Dump per-state provenance (--assoc).
pub fn assoc_arg() -> Arg {
    Arg::new("assoc")
        .long("assoc")
        .action(ArgAction::SetTrue)
        .help("Dump the source sub-expressions associated with each state")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Emit the automaton as JSON")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

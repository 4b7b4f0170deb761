//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("remac")
        .about("Pattern macro compiler with provenance tracking")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(dot_command())
        .subcommand(gen_command())
        .subcommand(repl_command())
}

/// Compile every definition, reporting errors.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Compile every pattern definition and report errors")
        .override_usage(
            "\
  remac check <FILE>
  remac check -p <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  remac check tokens.rm               # whole module graph
  remac check -p "Word = ('a'..'z')+" # inline pattern"#,
        )
        .arg(module_path_arg())
        .arg(pattern_text_arg())
}

/// Dump a compiled automaton.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Dump a pattern's automaton")
        .override_usage(
            "\
  remac dump <FILE> [NAME]
  remac dump -p <TEXT> [NAME]",
        )
        .after_help(
            r#"EXAMPLES:
  remac dump tokens.rm Word           # deterministic automaton
  remac dump tokens.rm Word --nfa     # graph before subset construction
  remac dump tokens.rm Word --assoc   # per-state provenance
  remac dump tokens.rm Word --json    # machine-readable"#,
        )
        .arg(module_path_arg())
        .arg(name_arg())
        .arg(pattern_text_arg())
        .arg(nfa_arg())
        .arg(assoc_arg())
        .arg(json_arg())
}

/// Render a compiled automaton as Graphviz.
pub fn dot_command() -> Command {
    Command::new("dot")
        .about("Render a pattern's automaton as a Graphviz digraph")
        .override_usage("  remac dot <FILE> [NAME]")
        .after_help(
            r#"EXAMPLES:
  remac dot tokens.rm Word | dot -Tsvg > word.svg"#,
        )
        .arg(module_path_arg())
        .arg(name_arg())
        .arg(pattern_text_arg())
        .arg(output_file_arg())
}

/// Generate Rust recognizers for exported patterns.
pub fn gen_command() -> Command {
    Command::new("gen")
        .about("Generate Rust recognizers for exported patterns")
        .override_usage(
            "\
  remac gen <FILE>
  remac gen <FILE> -o src/patterns.rs",
        )
        .after_help(
            r#"EXAMPLES:
  remac gen tokens.rm                 # to stdout
  remac gen tokens.rm -o patterns.rs  # to file"#,
        )
        .arg(module_path_arg())
        .arg(pattern_text_arg())
        .arg(output_file_arg())
}

/// Interactive pattern shell.
pub fn repl_command() -> Command {
    Command::new("repl")
        .about("Interactively define patterns and feed them input")
        .override_usage(
            "\
  remac repl
  remac repl <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  remac repl                          # empty session
  remac repl tokens.rm                # with a module preloaded"#,
        )
        .arg(module_path_arg())
        .arg(color_arg())
}

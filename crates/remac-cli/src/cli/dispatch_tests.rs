use std::path::PathBuf;

use super::commands::build_cli;
use super::dispatch::{DotParams, DumpParams, ReplParams};
use super::ColorChoice;

fn matches_for(args: &[&str]) -> clap::ArgMatches {
    build_cli()
        .try_get_matches_from(args)
        .expect("arguments should parse")
}

#[test]
fn dump_extracts_flags() {
    let m = matches_for(&["remac", "dump", "tokens.rm", "Word", "--nfa", "--assoc"]);
    let (name, sub) = m.subcommand().expect("subcommand");
    assert_eq!(name, "dump");

    let params = DumpParams::from_matches(sub);
    assert_eq!(params.module_path, Some(PathBuf::from("tokens.rm")));
    assert_eq!(params.name.as_deref(), Some("Word"));
    assert!(params.nfa);
    assert!(params.assoc);
    assert!(!params.json);
}

#[test]
fn dump_inline_pattern() {
    let m = matches_for(&["remac", "dump", "-p", "W = 1 2", "W"]);
    let (_, sub) = m.subcommand().expect("subcommand");
    let params = DumpParams::from_matches(sub);
    assert_eq!(params.pattern_text.as_deref(), Some("W = 1 2"));
    // Single positional shifts to the pattern name when -p supplies source.
    assert_eq!(params.module_path, None);
    assert_eq!(params.name.as_deref(), Some("W"));
}

#[test]
fn dot_takes_output_file() {
    let m = matches_for(&["remac", "dot", "tokens.rm", "Word", "-o", "word.dot"]);
    let (_, sub) = m.subcommand().expect("subcommand");
    let params = DotParams::from_matches(sub);
    assert_eq!(params.output, Some(PathBuf::from("word.dot")));
}

#[test]
fn repl_color_choice() {
    let m = matches_for(&["remac", "repl", "--color", "never"]);
    let (_, sub) = m.subcommand().expect("subcommand");
    let params = ReplParams::from_matches(sub);
    assert!(matches!(params.color, ColorChoice::Never));
    assert!(!params.color.should_colorize());
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(build_cli().try_get_matches_from(["remac"]).is_err());
}

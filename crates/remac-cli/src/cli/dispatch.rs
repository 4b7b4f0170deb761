//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror command `*Args` but are populated from clap;
//! `Into<*Args>` impls bridge dispatch to the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dot::DotArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::r#gen::GenArgs;
use crate::commands::repl::ReplArgs;

pub struct CheckParams {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            pattern_text: m.get_one::<String>("pattern_text").cloned(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            module_path: p.module_path,
            pattern_text: p.pattern_text,
        }
    }
}

pub struct DumpParams {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
    pub name: Option<String>,
    pub nfa: bool,
    pub assoc: bool,
    pub json: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let pattern_text = m.get_one::<String>("pattern_text").cloned();
        let (module_path, name) = shift_positional_to_name(
            pattern_text.is_some(),
            m.get_one::<PathBuf>("module_path").cloned(),
            m.get_one::<String>("name").cloned(),
        );
        Self {
            module_path,
            pattern_text,
            name,
            nfa: m.get_flag("nfa"),
            assoc: m.get_flag("assoc"),
            json: m.get_flag("json"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            module_path: p.module_path,
            pattern_text: p.pattern_text,
            name: p.name,
            nfa: p.nfa,
            assoc: p.assoc,
            json: p.json,
        }
    }
}

pub struct DotParams {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
    pub name: Option<String>,
    pub output: Option<PathBuf>,
}

impl DotParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let pattern_text = m.get_one::<String>("pattern_text").cloned();
        let (module_path, name) = shift_positional_to_name(
            pattern_text.is_some(),
            m.get_one::<PathBuf>("module_path").cloned(),
            m.get_one::<String>("name").cloned(),
        );
        Self {
            module_path,
            pattern_text,
            name,
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<DotParams> for DotArgs {
    fn from(p: DotParams) -> Self {
        Self {
            module_path: p.module_path,
            pattern_text: p.pattern_text,
            name: p.name,
            output: p.output,
        }
    }
}

pub struct GenParams {
    pub module_path: Option<PathBuf>,
    pub pattern_text: Option<String>,
    pub output: Option<PathBuf>,
}

impl GenParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            pattern_text: m.get_one::<String>("pattern_text").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<GenParams> for GenArgs {
    fn from(p: GenParams) -> Self {
        Self {
            module_path: p.module_path,
            pattern_text: p.pattern_text,
            output: p.output,
        }
    }
}

pub struct ReplParams {
    pub module_path: Option<PathBuf>,
    pub color: ColorChoice,
}

impl ReplParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<ReplParams> for ReplArgs {
    fn from(p: ReplParams) -> Self {
        Self {
            module_path: p.module_path,
            color: p.color.should_colorize(),
        }
    }
}

/// When -p is used with a single positional arg, treat it as the pattern
/// name. This enables: `remac dump -p 'W = 1 2' W`.
fn shift_positional_to_name(
    has_pattern_text: bool,
    module_path: Option<PathBuf>,
    name: Option<String>,
) -> (Option<PathBuf>, Option<String>) {
    match (has_pattern_text, module_path, name) {
        (true, Some(path), None) => (None, Some(path.display().to_string())),
        (_, path, name) => (path, name),
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

mod cli;
mod commands;

use cli::{CheckParams, DotParams, DumpParams, GenParams, ReplParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("dot", m)) => {
            let params = DotParams::from_matches(m);
            commands::dot::run(params.into());
        }
        Some(("gen", m)) => {
            let params = GenParams::from_matches(m);
            commands::r#gen::run(params.into());
        }
        Some(("repl", m)) => {
            let params = ReplParams::from_matches(m);
            commands::repl::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

pub mod check;
pub mod dot;
pub mod dump;
pub mod r#gen;
pub mod repl;

mod pattern_loader;

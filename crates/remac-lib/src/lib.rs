//! remac: compiles named regex-like pattern macros into deterministic finite
//! automata, tracking for every automaton state which source sub-expressions
//! contributed to it and in what positional role.
//!
//! # Pipeline
//!
//! ```text
//! source → parser → Module AST → Builder (NFA + provenance)
//!        → determinize (subset construction, provenance union)
//!        → CompiledAutomaton → Registry → consumers (dot/codegen/simulator)
//! ```
//!
//! # Example
//!
//! ```
//! use remac_lib::{Registry, loader};
//! use remac_core::DefId;
//!
//! let (set, main) = loader::load_str("Word = ('a'..'z')+", "main").unwrap();
//! let mut registry = Registry::new();
//! let auto = registry.compile(&set, DefId::new(main, 0)).unwrap();
//!
//! let mut state = auto.start_state();
//! for c in "hi".chars() {
//!     state = auto.transit(state, c as u32).expect("no transition");
//! }
//! assert!(auto.is_final(state));
//! ```

pub mod dfa;
pub mod dump;
pub mod emit;
pub mod error;
pub mod loader;
pub mod nfa;
pub mod parser;
pub mod registry;
pub mod resolve;
pub mod simulate;

#[cfg(test)]
mod dfa_tests;
#[cfg(test)]
mod nfa_tests;
#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod resolve_tests;
#[cfg(test)]
mod simulate_tests;
#[cfg(test)]
pub(crate) mod test_utils;

pub use dfa::{CompiledAutomaton, DState};
pub use error::{CompileError, LoadError, ParseError};
pub use nfa::{Builder, Fragment, Nfa};
pub use registry::Registry;
pub use resolve::{Resolution, resolve};

/// Result type for pattern compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

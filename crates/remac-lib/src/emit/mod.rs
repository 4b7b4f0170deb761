//! Output generators for compiled automata.

mod dot;
mod rust;

pub use dot::generate_dot;
pub use rust::generate_rust;

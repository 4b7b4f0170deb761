//! Core data structures for remac pattern compilation.
//!
//! Two layers:
//! - **Syntax layer**: arena-indexed pattern AST with stable per-node ids,
//!   owned by the defining module.
//! - **Module layer**: named pattern/constant definitions, import edges,
//!   and the `ModuleSet` arena that ties them together.
//!
//! Nothing here depends on the compiler; the AST is produced by a parser
//! and consumed read-only by the automaton builder.

pub mod ast;
pub mod colors;
pub mod module;
pub mod role;
pub mod span;
pub mod utils;


pub use ast::{AstId, ExprId, ExprNode, PatternArena, PatternExpr};
pub use colors::Colors;
pub use module::{ConstDef, DefId, Module, ModuleId, ModuleSet, PatternDef};
pub use role::{Role, RoleSet};
pub use span::Span;

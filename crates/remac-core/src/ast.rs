//! Arena-indexed pattern AST.
//!
//! Each module owns one `PatternArena`. Nodes are referenced by `ExprId`
//! (index into the arena), assigned once at parse time. Identity-sensitive
//! consumers (provenance maps) key on `AstId`, which pairs the owning module
//! with the node index, instead of on pointers.

use crate::module::ModuleId;
use crate::span::Span;

/// Index into a module's `PatternArena`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Globally unique AST node identity: owning module plus arena index.
///
/// Used as the provenance map key across pattern compilations.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AstId {
    pub module: ModuleId,
    pub expr: ExprId,
}

impl AstId {
    pub fn new(module: ModuleId, expr: ExprId) -> Self {
        Self { module, expr }
    }
}

/// The closed operator set of the pattern language.
///
/// Bounded repetition and `+`/`?` do not appear here; the parser desugars
/// them into `Seq`/`Alt`/`Star` combinations.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PatternExpr {
    /// Ordered concatenation of sub-patterns. Empty sequences are permitted
    /// and match the empty input.
    Seq(Vec<ExprId>),
    /// Choice between sub-patterns.
    Alt(Vec<ExprId>),
    /// Zero-or-more repetition.
    Star(ExprId),
    /// A single symbol or inclusive symbol range. Single values have
    /// `lo == hi`.
    Const { lo: u32, hi: u32 },
    /// A reference to a named constant or pattern, resolved at compile time.
    Ref {
        qualifier: Option<String>,
        name: String,
    },
}

impl PatternExpr {
    /// Short kind name for dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PatternExpr::Seq(_) => "Seq",
            PatternExpr::Alt(_) => "Alt",
            PatternExpr::Star(_) => "Star",
            PatternExpr::Const { .. } => "Const",
            PatternExpr::Ref { .. } => "Ref",
        }
    }
}

/// One AST node: expression, source span, and the definition it belongs to
/// (index into the owning module's definition list).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExprNode {
    pub expr: PatternExpr,
    pub span: Span,
    /// Index of the owning `PatternDef` within the module. Stamped after the
    /// definition body has been parsed.
    pub def: u32,
}

/// Flat node storage for one module, referenced by `ExprId`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PatternArena {
    nodes: Vec<ExprNode>,
}

impl PatternArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its id.
    pub fn alloc(&mut self, expr: PatternExpr, span: Span) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(ExprNode { expr, span, def: 0 });
        id
    }

    pub fn node(&self, id: ExprId) -> &ExprNode {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: ExprId) -> &mut ExprNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &ExprNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (ExprId(i as u32), n))
    }

    /// Deep-copy the subtree rooted at `id`, returning the new root.
    ///
    /// Copies keep the source spans of the originals; desugared repetitions
    /// point at the same source text as the expression they repeat.
    pub fn duplicate(&mut self, id: ExprId) -> ExprId {
        let node = self.node(id).clone();
        let expr = match node.expr {
            PatternExpr::Seq(children) => {
                let copies = children.into_iter().map(|c| self.duplicate(c)).collect();
                PatternExpr::Seq(copies)
            }
            PatternExpr::Alt(children) => {
                let copies = children.into_iter().map(|c| self.duplicate(c)).collect();
                PatternExpr::Alt(copies)
            }
            PatternExpr::Star(inner) => PatternExpr::Star(self.duplicate(inner)),
            leaf @ (PatternExpr::Const { .. } | PatternExpr::Ref { .. }) => leaf,
        };
        self.alloc(expr, node.span)
    }

    /// Stamp every node in the subtree rooted at `id` with its owning
    /// definition index.
    pub fn assign_def(&mut self, id: ExprId, def: u32) {
        self.node_mut(id).def = def;
        let children: Vec<ExprId> = match &self.node(id).expr {
            PatternExpr::Seq(c) | PatternExpr::Alt(c) => c.clone(),
            PatternExpr::Star(inner) => vec![*inner],
            PatternExpr::Const { .. } | PatternExpr::Ref { .. } => Vec::new(),
        };
        for child in children {
            self.assign_def(child, def);
        }
    }
}

//! Symbolic automaton builder.
//!
//! Converts a pattern definition's AST into a nondeterministic transition
//! graph over non-negative integer symbols. The graph uses index-based state
//! references with states stored in a flat vector; every sub-expression
//! compiles to a `Fragment` with single entry and exit points, and
//! combinators connect fragments through epsilon edges.
//!
//! Every state is tagged with the AST nodes it originates from and a
//! positional role: `Start` on a fragment's entry, `Final` on its exit,
//! `Inner` on every state allocated while building it. Because child
//! fragments are built inside their parent's window, tags accumulate across
//! nesting — a state near the end of a deeply nested expression carries
//! `Final` for every enclosing node whose exit it represents.

use indexmap::IndexMap;
use remac_core::{AstId, DefId, ExprId, ModuleId, ModuleSet, PatternExpr, Role, RoleSet};

use crate::error::CompileError;
use crate::resolve::{Resolution, resolve};

/// Index into `Nfa::states`.
pub type StateId = u32;

/// A nondeterministic state: epsilon successors, symbol-range edges, and
/// provenance tags.
#[derive(Debug, Clone, Default)]
pub struct NState {
    pub eps: Vec<StateId>,
    /// `(lo, hi, target)` with `lo <= hi`, bounds inclusive.
    pub edges: Vec<(u32, u32, StateId)>,
    /// Sorted by `AstId`; at most one entry per node.
    pub tags: Vec<(AstId, RoleSet)>,
}

/// Nondeterministic automaton for one pattern definition.
///
/// `accept` is the definition's unique exit state; acceptance of the
/// compiled pattern is keyed to it, not to provenance tags of nested
/// definitions.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<NState>,
    pub start: StateId,
    pub accept: StateId,
}

impl Nfa {
    pub fn state(&self, id: StateId) -> &NState {
        &self.states[id as usize]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &NState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (i as StateId, s))
    }
}

/// A graph fragment with single entry and exit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: StateId,
    pub exit: StateId,
}

impl Fragment {
    pub fn new(entry: StateId, exit: StateId) -> Self {
        Self { entry, exit }
    }

    /// Single-state fragment where entry equals exit.
    pub fn single(state: StateId) -> Self {
        Self {
            entry: state,
            exit: state,
        }
    }
}

/// Builds the NFA for one pattern definition, inlining referenced patterns.
pub struct Builder<'a> {
    set: &'a ModuleSet,
    states: Vec<NState>,
    /// Definitions whose fragment is under construction on the current
    /// path. A reference to one of these becomes a jump, not an inline.
    in_progress: IndexMap<DefId, Fragment>,
    /// Innermost entry names the pattern in error reports.
    def_stack: Vec<DefId>,
}

impl<'a> Builder<'a> {
    /// Build the nondeterministic graph for `def`.
    pub fn build(set: &'a ModuleSet, def: DefId) -> Result<Nfa, CompileError> {
        let mut builder = Builder {
            set,
            states: Vec::new(),
            in_progress: IndexMap::new(),
            def_stack: Vec::new(),
        };
        let frag = builder.definition(def)?;
        Ok(Nfa {
            states: builder.states,
            start: frag.entry,
            accept: frag.exit,
        })
    }

    /// Build a definition's fragment: fresh entry/exit wrapping the body.
    ///
    /// The entry/exit pair is registered before the body is built so that
    /// references back to this definition resolve as jumps.
    fn definition(&mut self, def: DefId) -> Result<Fragment, CompileError> {
        let entry = self.alloc();
        let exit = self.alloc();
        let frag = Fragment::new(entry, exit);
        self.in_progress.insert(def, frag);
        self.def_stack.push(def);

        let d = self.set.def(def);
        let body = self.expr(def.module, d.body)?;
        self.connect(entry, body.entry);
        self.connect(body.exit, exit);

        self.def_stack.pop();
        self.in_progress.swap_remove(&def);
        Ok(frag)
    }

    fn expr(&mut self, module: ModuleId, id: ExprId) -> Result<Fragment, CompileError> {
        let first = self.states.len() as StateId;
        let expr = self.set.module(module).arena.node(id).expr.clone();

        let frag = match expr {
            PatternExpr::Const { lo, hi } => self.constant(lo, hi)?,
            PatternExpr::Seq(children) => self.sequence(module, &children)?,
            PatternExpr::Alt(children) => self.alternation(module, &children)?,
            PatternExpr::Star(inner) => self.zero_or_more(module, inner)?,
            PatternExpr::Ref { qualifier, name } => {
                self.reference(module, qualifier.as_deref(), &name)?
            }
        };

        let last = self.states.len() as StateId;
        let ast = AstId::new(module, id);
        for state in first..last {
            self.tag(state, ast, Role::Inner);
        }
        self.tag(frag.entry, ast, Role::Start);
        self.tag(frag.exit, ast, Role::Final);
        Ok(frag)
    }

    fn constant(&mut self, lo: u32, hi: u32) -> Result<Fragment, CompileError> {
        if lo > hi {
            return Err(CompileError::MalformedRange {
                pattern: self.current_pattern(),
                lo,
                hi,
            });
        }
        let entry = self.alloc();
        let exit = self.alloc();
        self.states[entry as usize].edges.push((lo, hi, exit));
        Ok(Fragment::new(entry, exit))
    }

    fn sequence(&mut self, module: ModuleId, children: &[ExprId]) -> Result<Fragment, CompileError> {
        if children.is_empty() {
            return Ok(Fragment::single(self.alloc()));
        }
        let mut frags = Vec::with_capacity(children.len());
        for &child in children {
            frags.push(self.expr(module, child)?);
        }
        for window in frags.windows(2) {
            self.connect(window[0].exit, window[1].entry);
        }
        Ok(Fragment::new(frags[0].entry, frags[frags.len() - 1].exit))
    }

    fn alternation(
        &mut self,
        module: ModuleId,
        children: &[ExprId],
    ) -> Result<Fragment, CompileError> {
        if children.is_empty() {
            return Err(CompileError::EmptyAlternation {
                pattern: self.current_pattern(),
            });
        }
        if children.len() == 1 {
            return self.expr(module, children[0]);
        }

        let entry = self.alloc();
        let exit = self.alloc();
        for &child in children {
            let frag = self.expr(module, child)?;
            self.connect(entry, frag.entry);
            self.connect(frag.exit, exit);
        }
        Ok(Fragment::new(entry, exit))
    }

    fn zero_or_more(&mut self, module: ModuleId, inner: ExprId) -> Result<Fragment, CompileError> {
        let branch = self.alloc();
        let exit = self.alloc();
        let frag = self.expr(module, inner)?;

        self.connect(branch, frag.entry);
        self.connect(branch, exit);
        self.connect(frag.exit, branch);

        Ok(Fragment::new(branch, exit))
    }

    fn reference(
        &mut self,
        module: ModuleId,
        qualifier: Option<&str>,
        name: &str,
    ) -> Result<Fragment, CompileError> {
        match resolve(self.set, module, qualifier, name) {
            Resolution::NotFound => Err(CompileError::UnresolvedReference {
                pattern: self.current_pattern(),
                name: display_name(qualifier, name),
            }),
            Resolution::Ambiguous => Err(CompileError::AmbiguousReference {
                pattern: self.current_pattern(),
                name: display_name(qualifier, name),
            }),
            Resolution::Constant(c) => {
                let value = c.value;
                self.constant(value, value)
            }
            Resolution::Pattern(target) => {
                if let Some(&frag) = self.in_progress.get(&target) {
                    // Recursive reference: a finite automaton cannot track
                    // call depth, so recursion is treated as iteration —
                    // either jump back into the in-progress fragment or
                    // complete the match here. Tail recursion gets exact
                    // semantics; other shapes accept a superset.
                    let entry = self.alloc();
                    let exit = self.alloc();
                    self.connect(entry, frag.entry);
                    self.connect(entry, exit);
                    Ok(Fragment::new(entry, exit))
                } else {
                    // Fresh inline per reference site: sharing one copy
                    // between two sites would let a match enter through one
                    // and leave through the other.
                    self.definition(target)
                }
            }
        }
    }

    // ── plumbing ─────────────────────────────────────────────────────────

    fn alloc(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(NState::default());
        id
    }

    fn connect(&mut self, from: StateId, to: StateId) {
        self.states[from as usize].eps.push(to);
    }

    fn tag(&mut self, state: StateId, ast: AstId, role: Role) {
        let tags = &mut self.states[state as usize].tags;
        match tags.binary_search_by_key(&ast, |&(a, _)| a) {
            Ok(i) => tags[i].1.insert(role),
            Err(i) => tags.insert(i, (ast, RoleSet::of(role))),
        }
    }

    fn current_pattern(&self) -> String {
        let def = self
            .def_stack
            .last()
            .expect("expression built outside a definition");
        self.set.def(*def).name.clone()
    }
}

fn display_name(qualifier: Option<&str>, name: &str) -> String {
    match qualifier {
        Some(q) => format!("{q}.{name}"),
        None => name.to_owned(),
    }
}

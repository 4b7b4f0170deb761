//! Subset-construction determinization with provenance union.
//!
//! Deterministic states are identified by the exact set of nondeterministic
//! states they subsume; the memo key is that set, sorted, so a subset is
//! never conflated with its superset. State ids are assigned in discovery
//! order and symbol ranges are processed in ascending numeric order, which
//! makes compiled output reproducible across runs.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use remac_core::{AstId, DefId, RoleSet};

use crate::nfa::{Nfa, StateId};

/// One deterministic state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DState {
    pub id: u32,
    /// Sorted set of underlying nondeterministic states.
    pub nstates: Vec<StateId>,
    /// `(lo, hi, target)`, bounds inclusive, sorted by `lo`, non-overlapping.
    /// A symbol covered by no range rejects.
    pub edges: Vec<(u32, u32, u32)>,
    pub is_final: bool,
    /// Union of the underlying states' provenance, sorted by `AstId`.
    pub provenance: Vec<(AstId, RoleSet)>,
}

/// Deterministic automaton for one pattern definition.
///
/// Immutable once built; the start state is always id 0.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompiledAutomaton {
    pub pattern: DefId,
    pub states: Vec<DState>,
}

impl CompiledAutomaton {
    pub fn start_state(&self) -> u32 {
        0
    }

    pub fn is_final(&self, state: u32) -> bool {
        self.states[state as usize].is_final
    }

    /// Deterministic transition; `None` rejects.
    pub fn transit(&self, state: u32, symbol: u32) -> Option<u32> {
        let edges = &self.states[state as usize].edges;
        let i = edges.partition_point(|&(lo, _, _)| lo <= symbol);
        if i == 0 {
            return None;
        }
        let (_, hi, target) = edges[i - 1];
        (symbol <= hi).then_some(target)
    }

    /// Source sub-expressions contributing to `state`, with their roles.
    pub fn provenance(&self, state: u32) -> &[(AstId, RoleSet)] {
        &self.states[state as usize].provenance
    }

    pub fn state(&self, id: u32) -> &DState {
        &self.states[id as usize]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Reachable set via zero or more epsilon edges, including the seed itself.
/// Result is sorted. Epsilon cycles (from repetition) are expected; a
/// visited guard bounds the walk.
pub(crate) fn epsilon_closure(nfa: &Nfa, seed: &[StateId]) -> Vec<StateId> {
    let mut visited = vec![false; nfa.len()];
    let mut stack: Vec<StateId> = Vec::new();
    for &s in seed {
        if !visited[s as usize] {
            visited[s as usize] = true;
            stack.push(s);
        }
    }
    while let Some(s) = stack.pop() {
        for &t in &nfa.state(s).eps {
            if !visited[t as usize] {
                visited[t as usize] = true;
                stack.push(t);
            }
        }
    }
    visited
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v)
        .map(|(i, _)| i as StateId)
        .collect()
}

/// Convert the nondeterministic graph into a deterministic automaton.
pub fn determinize(nfa: &Nfa, pattern: DefId) -> CompiledAutomaton {
    let mut closures: IndexMap<Vec<StateId>, Vec<StateId>> = IndexMap::new();
    let mut closure = |seed: Vec<StateId>| -> Vec<StateId> {
        if let Some(c) = closures.get(&seed) {
            return c.clone();
        }
        let closed = epsilon_closure(nfa, &seed);
        closures.insert(seed, closed.clone());
        closed
    };

    let start = closure(vec![nfa.start]);
    let mut ids: IndexMap<Vec<StateId>, u32> = IndexMap::new();
    ids.insert(start.clone(), 0);
    let mut worklist: Vec<Vec<StateId>> = vec![start];
    let mut states: Vec<DState> = Vec::new();

    let mut next = 0usize;
    while next < worklist.len() {
        let underlying = worklist[next].clone();
        let id = next as u32;
        next += 1;

        // Partition reachable symbols into non-overlapping segments: every
        // edge bound contributes a cut point, so partially overlapping
        // ranges are split before grouping. u64 bounds avoid hi+1 overflow.
        let mut bounds: Vec<u64> = Vec::new();
        for &n in &underlying {
            for &(lo, hi, _) in &nfa.state(n).edges {
                bounds.push(lo as u64);
                bounds.push(hi as u64 + 1);
            }
        }
        bounds.sort_unstable();
        bounds.dedup();

        let mut edges: Vec<(u32, u32, u32)> = Vec::new();
        for pair in bounds.windows(2) {
            let (seg_lo, seg_hi) = (pair[0] as u32, (pair[1] - 1) as u32);

            let mut targets: Vec<StateId> = Vec::new();
            for &n in &underlying {
                for &(lo, hi, t) in &nfa.state(n).edges {
                    if lo <= seg_lo && seg_lo <= hi {
                        targets.push(t);
                    }
                }
            }
            if targets.is_empty() {
                continue;
            }
            targets.sort_unstable();
            targets.dedup();

            let target_set = closure(targets);
            let target_id = match ids.get(&target_set) {
                Some(&existing) => existing,
                None => {
                    let fresh = worklist.len() as u32;
                    ids.insert(target_set.clone(), fresh);
                    worklist.push(target_set);
                    fresh
                }
            };

            // Re-merge segments that were split but behave identically.
            if let Some(last) = edges.last_mut()
                && last.2 == target_id
                && last.1 as u64 + 1 == seg_lo as u64
            {
                last.1 = seg_hi;
            } else {
                edges.push((seg_lo, seg_hi, target_id));
            }
        }

        let is_final = underlying.binary_search(&nfa.accept).is_ok();
        let provenance = union_provenance(nfa, &underlying);
        states.push(DState {
            id,
            nstates: underlying,
            edges,
            is_final,
            provenance,
        });
    }

    CompiledAutomaton { pattern, states }
}

fn union_provenance(nfa: &Nfa, underlying: &[StateId]) -> Vec<(AstId, RoleSet)> {
    let mut merged: BTreeMap<AstId, RoleSet> = BTreeMap::new();
    for &n in underlying {
        for &(ast, roles) in &nfa.state(n).tags {
            merged
                .entry(ast)
                .and_modify(|r| *r = r.union(roles))
                .or_insert(roles);
        }
    }
    merged.into_iter().collect()
}

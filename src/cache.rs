//! The canonicalizer: a hash-consing store for quadtree nodes.

use crate::node::{Node, NodeRef, Quad, MAX_LEVEL};
use rustc_hash::FxHashMap;

/// Nodes at or below this level are always kept in the cache;
/// larger nodes are kept only while empty, to bound memory.
const ALWAYS_CACHED_LEVEL: u8 = 16;

/// The hash-consing store behind one universe.
///
/// Every node is built here. A `(NW, NE, SW, SE)` tuple that was seen
/// before yields the node built the first time, so structurally equal
/// subtrees share one allocation and downstream code may compare
/// nodes by identity.
///
/// The whole store can be dropped at any time: nodes are pure values
/// and anything still reachable from a root stays valid, it merely
/// stops being shared with newly built trees. Each clear bumps an
/// epoch counter that invalidates the one-step memo cached inside
/// still-live nodes.
pub(crate) struct NodeStore {
    nodes: FxHashMap<Quad, NodeRef>,
    empty: Vec<NodeRef>,
    dead: NodeRef,
    alive: NodeRef,
    hits: u64,
    misses: u64,
    epoch: u64,
}

impl NodeStore {
    pub(crate) fn new() -> Self {
        let dead = NodeRef::new(Node::new_leaf(0));
        let alive = NodeRef::new(Node::new_leaf(1));
        Self {
            nodes: FxHashMap::default(),
            empty: vec![dead.clone()],
            dead,
            alive,
            hits: 0,
            misses: 0,
            epoch: 0,
        }
    }

    /// The shared leaf for a dead (`0`) or live (non-zero) cell.
    pub(crate) fn leaf(&self, value: u8) -> NodeRef {
        if value == 0 {
            self.dead.clone()
        } else {
            self.alive.clone()
        }
    }

    /// The canonicalizing constructor.
    pub(crate) fn node(&mut self, children: Quad) -> NodeRef {
        if let Some(node) = self.nodes.get(&children) {
            self.hits += 1;
            return node.clone();
        }
        self.misses += 1;
        let node = NodeRef::new(Node::new_branch(children.clone()));
        if node.population() == 0 || node.level() <= ALWAYS_CACHED_LEVEL {
            self.nodes.insert(children, node.clone());
        }
        node
    }

    /// The canonical all-dead node of the given level.
    pub(crate) fn empty(&mut self, level: u8) -> NodeRef {
        assert!(level <= MAX_LEVEL, "No nodes beyond level {MAX_LEVEL}");
        while self.empty.len() <= usize::from(level) {
            let child = self.empty[self.empty.len() - 1].clone();
            let node = self.node(Quad {
                nw: child.clone(),
                ne: child.clone(),
                sw: child.clone(),
                se: child,
            });
            self.empty.push(node);
        }
        self.empty[usize::from(level)].clone()
    }

    /// The number of cached nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops the node cache and the empty-node cache, and marks every
    /// memoized step stale.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.empty.truncate(1);
        self.invalidate_steps();
    }

    /// Marks every memoized step stale without touching the node
    /// cache. Needed when the rule changes: the memo slot is keyed by
    /// node and epoch only.
    pub(crate) fn invalidate_steps(&mut self) {
        self.epoch += 1;
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn hits(&self) -> u64 {
        self.hits
    }

    pub(crate) fn misses(&self) -> u64 {
        self.misses
    }
}

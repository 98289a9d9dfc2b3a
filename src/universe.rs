//! The universe: a mutable handle over the current quadtree root.

use crate::{
    cache::NodeStore,
    node::{Coord, NodeRef, Rect},
    rule::Rule,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The level of a freshly created universe's root.
///
/// A 512×512 region; most hand-drawn patterns fit without growing.
pub const DEFAULT_LEVEL: u8 = 9;

/// The default soft ceiling on the number of cached nodes.
pub const DEFAULT_CACHE_LIMIT: usize = 10_000_000;

/// An unbounded two-state universe backed by a hash-consed quadtree.
///
/// All node operations are pure; the universe is the only mutable
/// piece, replacing its root on every [`set`](Universe::set) and
/// [`step`](Universe::step). The canonicalizer is owned by the
/// universe, so two universes never contend on shared state.
///
/// ```
/// use hashlife::{Rule, Universe};
///
/// let mut universe = Universe::new();
/// for p in [(0, 0), (1, 0), (2, 0)] {
///     universe.set(p, 1);
/// }
/// universe.step(Rule::GAME_OF_LIFE, 2);
/// assert_eq!(universe.population(), 3);
/// assert_eq!(universe.stats().generation, 2);
/// ```
pub struct Universe {
    store: NodeStore,
    root: NodeRef,
    reset_root: Option<NodeRef>,
    steps: u64,
    generation: u64,
    cache_limit: usize,
    /// The rule of the previous step batch. A change makes every
    /// memoized step stale, since the memo slot is not keyed by rule.
    last_rule: Option<Rule>,
}

impl Universe {
    /// Creates an empty universe.
    pub fn new() -> Self {
        let mut store = NodeStore::new();
        let root = store.empty(DEFAULT_LEVEL);
        Self {
            store,
            root,
            reset_root: None,
            steps: 0,
            generation: 0,
            cache_limit: DEFAULT_CACHE_LIMIT,
            last_rule: None,
        }
    }

    /// Whether the cell at `coord` is alive.
    ///
    /// Cells outside the current root are dead.
    pub fn get(&self, (x, y): Coord) -> bool {
        let w = self.root.half_width();
        if x < -w || y < -w || x >= w || y >= w {
            return false;
        }
        self.root.get((x, y), 0).leaf_value() != 0
    }

    /// Sets the cell at `coord` to dead (`0`) or alive (non-zero),
    /// growing the tree as needed.
    pub fn set(&mut self, coord: Coord, value: u8) {
        self.root = self.root.grow_to_fit(&mut self.store, coord);
        self.root = self.root.set(&mut self.store, coord, value);
    }

    /// Advances the universe by `steps` generations of `rule`.
    ///
    /// Each generation grows the root far enough that no live cell
    /// can reach the edge of the simulated region, then replaces the
    /// root with the kernel's result. The root level never shrinks.
    pub fn step(&mut self, rule: Rule, steps: u64) {
        if self.last_rule != Some(rule) {
            self.store.invalidate_steps();
            self.last_rule = Some(rule);
        }
        for _ in 0..steps {
            if self.store.len() > self.cache_limit {
                self.store.clear();
            }
            if !self.root.edges_empty() {
                self.root = self.root.grow(&mut self.store);
            }
            self.root = self
                .root
                .grow(&mut self.store)
                .next_generation(&mut self.store, rule);
            self.steps += 1;
            self.generation += 1;
        }
    }

    /// Captures the current root as the reset snapshot.
    ///
    /// The pattern decoder calls this after loading, so that
    /// [`reset`](Universe::reset) returns to the freshly loaded
    /// pattern.
    pub fn set_reset_snapshot(&mut self) {
        self.reset_root = Some(self.root.clone());
    }

    /// Restores the snapshot (or an empty universe if none was
    /// taken), zeroes the counters, and clears the canonicalizer.
    pub fn reset(&mut self) {
        self.store.clear();
        self.root = match &self.reset_root {
            Some(root) => root.clone(),
            None => self.store.empty(DEFAULT_LEVEL),
        };
        self.steps = 0;
        self.generation = 0;
    }

    /// Updates the soft ceiling on the number of cached nodes.
    ///
    /// The cache is cleared immediately if it is already above the
    /// new limit, and checked again before every generation.
    pub fn set_cache_limit(&mut self, limit: usize) {
        self.cache_limit = limit;
        if self.store.len() > self.cache_limit {
            self.store.clear();
        }
    }

    /// Drops all cached nodes. Safe at any time: nodes are pure and
    /// re-derivable, only sharing with future trees is lost.
    pub fn clear_cache(&mut self) {
        self.store.clear();
    }

    /// The current root.
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// The subtree of the given level containing `coord`; level 0
    /// returns a single cell. Useful for rendering at a coarser
    /// resolution than single cells.
    pub fn node_at(&self, coord: Coord, level: u8) -> NodeRef {
        self.root.get(coord, level)
    }

    /// Calls `callback` with the coordinates of every live cell.
    pub fn visit<F: FnMut(Coord)>(&self, callback: F) {
        self.root.visit(callback);
    }

    /// The smallest rectangle covering all live cells.
    pub fn filled_bounds(&self) -> Rect {
        self.root.filled_bounds()
    }

    /// The filled-bounds region as a dense grid of `0`/`1`.
    pub fn to_cells(&self) -> Vec<Vec<u8>> {
        self.root.to_cells()
    }

    /// The level of the current root.
    pub fn level(&self) -> u8 {
        self.root.level()
    }

    /// The number of live cells.
    pub fn population(&self) -> u64 {
        self.root.population()
    }

    /// Whether the universe has no live cells.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// A snapshot of the universe's counters and cache state.
    pub fn stats(&self) -> Stats {
        Stats {
            steps: self.steps,
            generation: self.generation,
            level: self.root.level(),
            population: self.root.population(),
            cache_size: self.store.len(),
            cache_hits: self.store.hits(),
            cache_misses: self.store.misses(),
        }
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters and cache state reported by [`Universe::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stats {
    /// Completed step calls since creation or reset.
    pub steps: u64,
    /// Generations simulated since creation or reset.
    pub generation: u64,
    /// The level of the current root.
    pub level: u8,
    /// Live cells in the universe.
    pub population: u64,
    /// Nodes currently held by the canonicalizer.
    pub cache_size: usize,
    /// Canonicalizer lookups answered from the cache.
    pub cache_hits: u64,
    /// Canonicalizer lookups that built a new node.
    pub cache_misses: u64,
}

impl Stats {
    /// Cache hits per miss: `0` when nothing was looked up yet, and
    /// infinite when every lookup hit.
    pub fn cache_ratio(&self) -> f64 {
        if self.cache_misses == 0 {
            if self.cache_hits == 0 {
                0.0
            } else {
                f64::INFINITY
            }
        } else {
            self.cache_hits as f64 / self.cache_misses as f64
        }
    }
}

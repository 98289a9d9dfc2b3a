//! The next-generation kernel.
//!
//! Advances a node by one generation, returning the centred node one
//! level down. At level 2 the 4×4 block is simulated directly on a
//! bitmask; above that the step is assembled from nine overlapping
//! half-size regions, each advanced recursively. Results are memoized
//! per node, so repeating regions of the universe are stepped once.

use crate::{
    cache::NodeStore,
    node::{Node, NodeRef, Quad},
    rule::Rule,
};

/// The 8 neighbor positions of a 3×3 window packed in 12 bits.
const NEIGHBOR_MASK: u16 = 0b0111_0101_0111;

/// Applies the rule to the centre of a 3×3 window.
///
/// The window is the low 12 bits of a row-major 4×4 bitmask; bit 5 is
/// the centre cell.
fn step_cell(store: &NodeStore, window: u16, rule: Rule) -> NodeRef {
    let center = window >> 5 & 1;
    let neighbors = (window & NEIGHBOR_MASK).count_ones();
    let alive = if center == 0 {
        rule.contains_born(neighbors)
    } else {
        rule.contains_survive(neighbors)
    };
    store.leaf(alive.into())
}

impl NodeRef {
    /// Advances the node one generation, yielding the centred node of
    /// `level - 1`.
    ///
    /// Must be called on a node of level ≥ 2 whose live cells stay in
    /// the interior; the driver guarantees this by growing the root
    /// first.
    pub(crate) fn next_generation(&self, store: &mut NodeStore, rule: Rule) -> NodeRef {
        if let Some(next) = self.cached_step(store.epoch()) {
            return next;
        }
        let next = if self.level() == 2 {
            self.slow_simulation(store, rule)
        } else {
            let n00 = self.nw().centered_subnode(store);
            let n01 = self.centered_north(store);
            let n02 = Node::ne(self).centered_subnode(store);
            let n10 = self.centered_west(store);
            let n11 = self.centered_sub_subnode(store);
            let n12 = self.centered_east(store);
            let n20 = self.sw().centered_subnode(store);
            let n21 = self.centered_south(store);
            let n22 = self.se().centered_subnode(store);

            let nw = store
                .node(Quad {
                    nw: n00,
                    ne: n01.clone(),
                    sw: n10.clone(),
                    se: n11.clone(),
                })
                .next_generation(store, rule);
            let ne = store
                .node(Quad {
                    nw: n01,
                    ne: n02,
                    sw: n11.clone(),
                    se: n12.clone(),
                })
                .next_generation(store, rule);
            let sw = store
                .node(Quad {
                    nw: n10,
                    ne: n11.clone(),
                    sw: n20,
                    se: n21.clone(),
                })
                .next_generation(store, rule);
            let se = store
                .node(Quad {
                    nw: n11,
                    ne: n12,
                    sw: n21,
                    se: n22,
                })
                .next_generation(store, rule);

            store.node(Quad { nw, ne, sw, se })
        };
        self.memoize_step(store.epoch(), next.clone());
        next
    }

    /// One generation of a 4×4 block, cell by cell.
    fn slow_simulation(&self, store: &mut NodeStore, rule: Rule) -> NodeRef {
        assert_eq!(self.level(), 2, "Direct simulation needs a level 2 node");
        let mut bits: u16 = 0;
        for y in -2..2 {
            for x in -2..2 {
                bits = bits << 1 | u16::from(self.get((x, y), 0).leaf_value());
            }
        }
        let nw = step_cell(store, bits >> 5, rule);
        let ne = step_cell(store, bits >> 4, rule);
        let sw = step_cell(store, bits >> 1, rule);
        let se = step_cell(store, bits, rule);
        store.node(Quad { nw, ne, sw, se })
    }

    /// The centred child-size node: the four inner grandchildren.
    pub(crate) fn centered_subnode(&self, store: &mut NodeStore) -> NodeRef {
        store.node(Quad {
            nw: self.nw().se().clone(),
            ne: Node::ne(self).sw().clone(),
            sw: Node::ne(self.sw()).clone(),
            se: self.se().nw().clone(),
        })
    }

    /// The child-size node centred on the middle of the north edge.
    fn centered_north(&self, store: &mut NodeStore) -> NodeRef {
        store.node(Quad {
            nw: Node::ne(self.nw()).se().clone(),
            ne: Node::ne(self).nw().sw().clone(),
            sw: Node::ne(self.nw().se()).clone(),
            se: Node::ne(self).sw().nw().clone(),
        })
    }

    /// The child-size node centred on the middle of the south edge.
    fn centered_south(&self, store: &mut NodeStore) -> NodeRef {
        store.node(Quad {
            nw: Node::ne(self.sw()).se().clone(),
            ne: self.se().nw().sw().clone(),
            sw: Node::ne(self.sw().se()).clone(),
            se: self.se().sw().nw().clone(),
        })
    }

    /// The child-size node centred on the middle of the west edge.
    fn centered_west(&self, store: &mut NodeStore) -> NodeRef {
        store.node(Quad {
            nw: self.nw().sw().se().clone(),
            ne: self.nw().se().sw().clone(),
            sw: Node::ne(self.sw().nw()).clone(),
            se: Node::ne(self.sw()).nw().clone(),
        })
    }

    /// The child-size node centred on the middle of the east edge.
    fn centered_east(&self, store: &mut NodeStore) -> NodeRef {
        store.node(Quad {
            nw: Node::ne(self).sw().se().clone(),
            ne: Node::ne(self).se().sw().clone(),
            sw: Node::ne(self.se().nw()).clone(),
            se: Node::ne(self.se()).nw().clone(),
        })
    }

    /// The child-size node centred on the centre: built from the four
    /// great-grandchild blocks around the origin.
    pub(crate) fn centered_sub_subnode(&self, store: &mut NodeStore) -> NodeRef {
        store.node(Quad {
            nw: self.nw().se().se().clone(),
            ne: Node::ne(self).sw().sw().clone(),
            sw: Node::ne(Node::ne(self.sw())).clone(),
            se: self.se().nw().nw().clone(),
        })
    }
}

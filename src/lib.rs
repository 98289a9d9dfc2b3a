/*!
__hashlife__ is an engine for Conway's Game of Life and other
Life-like cellular automata on an effectively unbounded grid.

The universe is a hash-consed quadtree: structurally equal regions
share one canonical node, so a repetitive pattern costs memory
proportional to its variety, not its extent, and stepping a region
that was stepped before is a cache lookup. On top of the tree sit a
[`Universe`] handle for mutation and stepping, and a [`Pattern`]
decoder for the RLE and plaintext formats used by the community.

Rendering, event loops and file handling are deliberately left to the
host; see [`Universe::visit`], [`Universe::to_cells`] and
[`Universe::stats`] for the introspection hooks they build on.

# Example

Load a glider and advance it four generations, after which it has
moved one cell down and to the right:

```rust
use hashlife::{Pattern, Rule};

let rle = b"#N Glider\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n";
let mut pattern = Pattern::decode(&rle[..])?;
assert_eq!(pattern.name, "Glider");

pattern.universe.step(pattern.rule, 4);

assert_eq!(pattern.universe.stats().generation, 4);
assert_eq!(pattern.universe.population(), 5);
assert!(pattern.universe.get((3, 3)));
# Ok::<(), hashlife::Error>(())
```
*/

mod cache;
mod error;
mod node;
mod pattern;
mod rule;
mod step;
mod universe;

pub use error::{Error, Result};
pub use node::{Coord, Node, NodeRef, Rect, MAX_LEVEL};
pub use pattern::{Format, Pattern};
pub use rule::Rule;
pub use universe::{Stats, Universe, DEFAULT_CACHE_LIMIT, DEFAULT_LEVEL};

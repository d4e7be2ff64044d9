//! # Karger's randomized minimum cut
//!
//! A single contraction trial repeatedly picks an edge at random, weighted by
//! how many parallel edges join its endpoints, and merges the two endpoints into
//! one super-vertex. Edges between the merged pair vanish; their other edges
//! move onto the merged vertex, and parallel edges to a shared neighbour add up.
//! When two super-vertices remain, the edges between them form a cut.
//!
//! One trial finds a given minimum cut of an `n`-vertex graph with probability
//! at least `2 / (n (n - 1))`, so the driver runs many independent trials and
//! keeps the smallest cut.
//!
//! ```rust
//! use karger_mincut::graph::karger_min_cut;
//!
//! // Two triangles joined by a single bridge.
//! let edges = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)];
//! let cut = karger_min_cut(&edges, 100).unwrap();
//! assert!(cut.cut_value >= 1);
//! assert_eq!(cut.partition.len(), 6);
//! ```

pub mod connectivity;
pub mod contraction;
pub mod multigraph;
pub mod super_vertex;
pub mod trials;

pub use contraction::{Contraction, CutCandidate, State};
pub use multigraph::Multigraph;
pub use super_vertex::{PairKey, SuperVertex, VertexId};
pub use trials::{run_trial, Karger, KargerBuilder, MinCut, Partition, DEFAULT_TRIALS};

use crate::error::Result;

/// Implements Karger's randomized min cut algorithm.
///
/// # Arguments
/// - `edges`: Slice of edges as (u, v) pairs of original vertex ids. Repeated pairs are parallel edges.
/// - `trials`: Number of independent trials to run (the more, the higher the chance to find the minimum cut).
///
/// # Returns
/// The smallest cut found, with the partition of original vertex ids it induces.
pub fn karger_min_cut(edges: &[(usize, usize)], trials: usize) -> Result<MinCut> {
    KargerBuilder::new().trials(trials).build()?.run(edges)
}

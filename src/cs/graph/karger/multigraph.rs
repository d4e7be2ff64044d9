use std::collections::{BTreeMap, BTreeSet};

use log::{trace, warn};
use rand::Rng;

use super::super_vertex::{PairKey, SuperVertex, VertexId};
use crate::error::{Error, Result};

/// Undirected multigraph over super-vertices that supports edge contraction.
///
/// Super-vertices live in an arena indexed by [`VertexId`]; merged-away entries
/// stay in the arena (retired) so handles are never reused. Three structures are
/// kept in lockstep:
///
/// - `adjacency`: live super-vertex to its neighbours,
/// - `multiplicity`: number of parallel edges per pair,
/// - `live_pairs`: pairs currently carrying at least one edge.
///
/// A pair is either absent from all three or present in all three with a
/// positive count. No vertex is ever its own neighbour.
#[derive(Debug, Clone, Default)]
pub struct Multigraph {
    vertices: Vec<SuperVertex>,
    originals: BTreeMap<usize, VertexId>,
    adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
    multiplicity: BTreeMap<PairKey, usize>,
    live_pairs: BTreeSet<PairKey>,
    total_multiplicity: usize,
}

impl Multigraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from original `(u, v)` records.
    ///
    /// Every record adds one parallel edge, so repeated records accumulate
    /// multiplicity. Self-loop records are dropped, but their vertex is still
    /// registered.
    pub fn from_edges(edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Multigraph::new();
        for &(u, v) in edges {
            let hu = graph.original_vertex(u);
            let hv = graph.original_vertex(v);
            if hu == hv {
                warn!("dropping self-loop record ({u}, {v})");
                continue;
            }
            graph.add_edge(hu, hv, 1)?;
        }
        Ok(graph)
    }

    /// Handle of the singleton super-vertex for `original`, creating it on first use.
    fn original_vertex(&mut self, original: usize) -> VertexId {
        if let Some(&id) = self.originals.get(&original) {
            return id;
        }
        let id = self.push_vertex(SuperVertex::new(original));
        self.originals.insert(original, id);
        id
    }

    fn push_vertex(&mut self, vertex: SuperVertex) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(vertex);
        self.adjacency.insert(id, BTreeSet::new());
        id
    }

    /// Handle originally assigned to an input vertex id. The handle may
    /// already be retired if that vertex has been contracted.
    pub fn initial_handle(&self, original: usize) -> Option<VertexId> {
        self.originals.get(&original).copied()
    }

    /// Number of distinct original vertex ids the graph was built from.
    pub fn original_count(&self) -> usize {
        self.originals.len()
    }

    pub fn is_live(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// The live super-vertex behind `v`.
    pub fn vertex(&self, v: VertexId) -> Result<&SuperVertex> {
        if !self.is_live(v) {
            return Err(Error::UnknownVertex { vertex: v.index() });
        }
        self.vertices
            .get(v.index())
            .ok_or(Error::UnknownVertex { vertex: v.index() })
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn pair_count(&self) -> usize {
        self.live_pairs.len()
    }

    /// Sum of multiplicities over all live pairs.
    pub fn total_multiplicity(&self) -> usize {
        self.total_multiplicity
    }

    pub fn live_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Live pairs with their multiplicities, in canonical order.
    pub fn live_pairs(&self) -> impl Iterator<Item = (PairKey, usize)> + '_ {
        self.multiplicity.iter().map(|(&key, &count)| (key, count))
    }

    pub fn neighbors(&self, v: VertexId) -> Result<impl Iterator<Item = VertexId> + '_> {
        self.adjacency
            .get(&v)
            .map(|set| set.iter().copied())
            .ok_or(Error::UnknownVertex { vertex: v.index() })
    }

    /// Adds `count` parallel edges between `u` and `v`.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, count: usize) -> Result<()> {
        if u == v {
            return Err(Error::SelfLoop { vertex: u.index() });
        }
        for w in [u, v] {
            if !self.is_live(w) {
                return Err(Error::UnknownVertex { vertex: w.index() });
            }
        }
        if count == 0 {
            return Ok(());
        }
        let key = PairKey::new(u, v);
        let (low, high) = key.endpoints();
        self.adjacency.entry(low).or_default().insert(high);
        self.adjacency.entry(high).or_default().insert(low);
        *self.multiplicity.entry(key).or_insert(0) += count;
        self.live_pairs.insert(key);
        self.total_multiplicity += count;
        Ok(())
    }

    /// Removes every parallel edge between `u` and `v`, returning how many there were.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<usize> {
        let key = self.live_key(u, v)?;
        let count = self
            .multiplicity
            .remove(&key)
            .ok_or(Error::MissingEdge {
                u: u.index(),
                v: v.index(),
            })?;
        self.live_pairs.remove(&key);
        let (low, high) = key.endpoints();
        let unlinked = self.unlink(low, high) && self.unlink(high, low);
        if !unlinked {
            return Err(Error::InvariantViolation(format!(
                "pair ({low}, {high}) had multiplicity {count} but no adjacency entry"
            )));
        }
        self.total_multiplicity -= count;
        Ok(count)
    }

    fn unlink(&mut self, from: VertexId, to: VertexId) -> bool {
        self.adjacency
            .get_mut(&from)
            .is_some_and(|set| set.remove(&to))
    }

    /// Number of parallel edges between `u` and `v`. Fails if the pair is not live.
    pub fn edge_multiplicity(&self, u: VertexId, v: VertexId) -> Result<usize> {
        let key = self.live_key(u, v)?;
        self.multiplicity
            .get(&key)
            .copied()
            .ok_or(Error::MissingEdge {
                u: u.index(),
                v: v.index(),
            })
    }

    fn live_key(&self, u: VertexId, v: VertexId) -> Result<PairKey> {
        if u == v {
            return Err(Error::SelfLoop { vertex: u.index() });
        }
        let key = PairKey::new(u, v);
        if self.live_pairs.contains(&key) {
            Ok(key)
        } else {
            Err(Error::MissingEdge {
                u: u.index(),
                v: v.index(),
            })
        }
    }

    /// Draws one live pair with probability proportional to its multiplicity.
    pub fn sample_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PairKey> {
        if self.total_multiplicity == 0 {
            return Err(Error::InvariantViolation(
                "cannot sample from a graph without edges".to_string(),
            ));
        }
        let mut ticket = rng.gen_range(0..self.total_multiplicity);
        for (&key, &count) in &self.multiplicity {
            if ticket < count {
                return Ok(key);
            }
            ticket -= count;
        }
        Err(Error::InvariantViolation(format!(
            "total multiplicity {} exceeds the sum over live pairs",
            self.total_multiplicity
        )))
    }

    /// Contracts the live pair `a`-`b` into a new super-vertex and returns its handle.
    ///
    /// The edges between `a` and `b` disappear. Every other edge of `a` or `b`
    /// is redirected to the merged vertex, and edges to a common neighbour
    /// accumulate into a single multiplicity.
    pub fn contract(&mut self, a: VertexId, b: VertexId) -> Result<VertexId> {
        let removed = self.remove_edge(a, b)?;
        let merged = SuperVertex::merge(self.vertex(a)?, self.vertex(b)?);
        let c = self.push_vertex(merged);

        for old in [a, b] {
            let neighbors: Vec<VertexId> = self.neighbors(old)?.collect();
            for n in neighbors {
                let count = self.edge_multiplicity(n, old)?;
                self.add_edge(n, c, count)?;
                self.remove_edge(n, old)?;
            }
        }

        for old in [a, b] {
            match self.adjacency.remove(&old) {
                Some(rest) if rest.is_empty() => {}
                _ => {
                    return Err(Error::InvariantViolation(format!(
                        "super-vertex {old} still had neighbours after contraction"
                    )))
                }
            }
            if let Some(vertex) = self.vertices.get_mut(old.index()) {
                vertex.retire();
            }
        }

        trace!(
            "contracted {a} and {b} into {c} (dropped {removed} edges, {} vertices left)",
            self.vertex_count()
        );
        Ok(c)
    }

    /// Verifies that adjacency, multiplicity and live pairs agree, and that
    /// live super-vertices partition the original vertex ids.
    pub fn check_consistency(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::InvariantViolation(msg));

        if self.multiplicity.len() != self.live_pairs.len() {
            return fail(format!(
                "{} multiplicity entries but {} live pairs",
                self.multiplicity.len(),
                self.live_pairs.len()
            ));
        }
        let mut sum = 0;
        for (&key, &count) in &self.multiplicity {
            let (low, high) = key.endpoints();
            if count == 0 {
                return fail(format!("pair ({low}, {high}) stored with zero multiplicity"));
            }
            if !self.live_pairs.contains(&key) {
                return fail(format!("pair ({low}, {high}) missing from live pairs"));
            }
            let linked = |x: VertexId, y: VertexId| {
                self.adjacency.get(&x).is_some_and(|set| set.contains(&y))
            };
            if !linked(low, high) || !linked(high, low) {
                return fail(format!("pair ({low}, {high}) missing from adjacency"));
            }
            sum += count;
        }
        if sum != self.total_multiplicity {
            return fail(format!(
                "total multiplicity {} but pairs sum to {sum}",
                self.total_multiplicity
            ));
        }

        let mut seen = BTreeSet::new();
        for (&v, neighbors) in &self.adjacency {
            for &n in neighbors {
                if n == v {
                    return fail(format!("{v} is listed as its own neighbour"));
                }
                if !self.live_pairs.contains(&PairKey::new(v, n)) {
                    return fail(format!("adjacency {v}-{n} has no live pair"));
                }
            }
            let vertex = self.vertex(v)?;
            for &original in vertex.members() {
                if !seen.insert(original) {
                    return fail(format!("original vertex {original} is in two super-vertices"));
                }
            }
        }
        if seen.len() != self.originals.len() {
            return fail(format!(
                "{} of {} original vertices are covered by live super-vertices",
                seen.len(),
                self.originals.len()
            ));
        }
        Ok(())
    }
}

use std::collections::BTreeMap;

use log::{debug, error, info};
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use super::connectivity::components;
use super::contraction::{Contraction, CutCandidate};
use super::multigraph::Multigraph;
use super::super_vertex::SuperVertex;
use crate::error::{Error, Result};

/// Number of trials used when none is configured.
pub const DEFAULT_TRIALS: usize = 3;

/// Assignment of every original vertex id to side 1 or side 2 of a cut.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    sides: BTreeMap<usize, u8>,
}

impl Partition {
    /// Puts the members of the first super-vertex on side 1 and those of the
    /// second on side 2.
    pub fn from_survivors(survivors: &(SuperVertex, SuperVertex)) -> Self {
        let mut sides = BTreeMap::new();
        for (label, vertex) in [(1, &survivors.0), (2, &survivors.1)] {
            for &original in vertex.members() {
                sides.insert(original, label);
            }
        }
        Partition { sides }
    }

    /// Side label (1 or 2) of an original vertex id.
    pub fn side(&self, original: usize) -> Option<u8> {
        self.sides.get(&original).copied()
    }

    /// Original ids on the given side, ascending.
    pub fn members(&self, side: u8) -> Vec<usize> {
        self.sides
            .iter()
            .filter(|&(_, &s)| s == side)
            .map(|(&id, _)| id)
            .collect()
    }

    /// `(original id, side)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.sides.iter().map(|(&id, &side)| (id, side))
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    /// Number of input records whose endpoints fall on different sides.
    pub fn crossing_edges(&self, edges: &[(usize, usize)]) -> usize {
        edges
            .iter()
            .filter(|&&(u, v)| self.side(u) != self.side(v))
            .count()
    }
}

/// Best cut found over all trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut {
    pub cut_value: usize,
    pub partition: Partition,
    pub survivors: (SuperVertex, SuperVertex),
    /// Winning trial, or `None` when the graph was disconnected and no
    /// contraction was needed.
    pub trial: Option<usize>,
    /// Base seed the trials were derived from.
    pub seed: Option<u64>,
}

/// Builder for [`Karger`].
///
/// ```rust
/// use karger_mincut::graph::KargerBuilder;
///
/// let karger = KargerBuilder::new().trials(50).seed(7).build().unwrap();
/// let cut = karger.run(&[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
/// assert_eq!(cut.cut_value, 2);
/// ```
#[derive(Debug, Clone)]
pub struct KargerBuilder {
    trials: usize,
    seed: Option<u64>,
    parallel: bool,
}

impl Default for KargerBuilder {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
        }
    }
}

impl KargerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of independent trials. More trials lower the chance of missing
    /// the true minimum cut.
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the base seed. If not called, a random seed is drawn and logged.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs trials on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Result<Karger> {
        if self.trials == 0 {
            return Err(Error::InvalidTrialCount);
        }
        Ok(Karger {
            trials: self.trials,
            seed: self.seed,
            parallel: self.parallel,
        })
    }
}

/// Repeats randomized contraction over independent copies of a graph and keeps
/// the smallest cut.
#[derive(Debug, Clone)]
pub struct Karger {
    trials: usize,
    seed: Option<u64>,
    parallel: bool,
}

impl Karger {
    pub fn builder() -> KargerBuilder {
        KargerBuilder::new()
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Estimates the minimum cut of the multigraph given by `edges`.
    ///
    /// Ties between trials go to the lowest trial index, in parallel mode too.
    ///
    /// # Errors
    /// - [`Error::InsufficientGraph`] if the edges name fewer than 2 distinct vertices.
    /// - [`Error::InvariantViolation`] if a trial ends in an inconsistent state.
    pub fn run(&self, edges: &[(usize, usize)]) -> Result<MinCut> {
        let comps = components(edges);
        let vertices: usize = comps.iter().map(Vec::len).sum();
        if vertices < 2 {
            return Err(Error::InsufficientGraph { vertices });
        }
        if comps.len() > 1 {
            return Ok(disconnected_cut(comps));
        }

        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        debug!(
            "running {} trials over {vertices} vertices and {} records with base seed {seed}",
            self.trials,
            edges.len()
        );

        let outcomes: Vec<CutCandidate> = if self.parallel {
            (0..self.trials)
                .into_par_iter()
                .map(|trial| run_trial(edges, seed, trial))
                .collect::<Result<_>>()?
        } else {
            (0..self.trials)
                .map(|trial| run_trial(edges, seed, trial))
                .collect::<Result<_>>()?
        };

        let (trial, best) = outcomes
            .into_iter()
            .enumerate()
            .min_by_key(|(_, candidate)| candidate.cut_value)
            .ok_or(Error::InvalidTrialCount)?;
        info!(
            "min cut estimate {} from trial {trial} of {}",
            best.cut_value, self.trials
        );
        Ok(MinCut {
            cut_value: best.cut_value,
            partition: Partition::from_survivors(&best.survivors),
            survivors: best.survivors,
            trial: Some(trial),
            seed: Some(seed),
        })
    }
}

/// Runs one complete contraction trial on a fresh graph.
///
/// The trial's randomness is stream `trial` of a ChaCha20 generator seeded with
/// `seed`, so any trial can be replayed in isolation.
pub fn run_trial(edges: &[(usize, usize)], seed: u64, trial: usize) -> Result<CutCandidate> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);

    let graph = Multigraph::from_edges(edges)?;
    let candidate = Contraction::new(graph, rng)?.run()?;

    let crossing = Partition::from_survivors(&candidate.survivors).crossing_edges(edges);
    if crossing != candidate.cut_value {
        let message = format!(
            "trial {trial} reports cut value {} but {crossing} input edges cross its partition",
            candidate.cut_value
        );
        error!("{message}");
        return Err(Error::InvariantViolation(message));
    }
    debug!(
        "trial {trial}: cut value {} after {} contractions",
        candidate.cut_value, candidate.steps
    );
    Ok(candidate)
}

/// A graph with several components has a cut of size 0: the component holding
/// the smallest id against everything else.
fn disconnected_cut(mut comps: Vec<Vec<usize>>) -> MinCut {
    let first = comps.remove(0);
    let rest: Vec<usize> = comps.into_iter().flatten().collect();
    info!(
        "graph is disconnected; separating {} vertices from {} others with an empty cut",
        first.len(),
        rest.len()
    );
    let survivors = (
        SuperVertex::from_members(first),
        SuperVertex::from_members(rest),
    );
    MinCut {
        cut_value: 0,
        partition: Partition::from_survivors(&survivors),
        survivors,
        trial: None,
        seed: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn karger(trials: usize, seed: u64) -> Karger {
        KargerBuilder::new().trials(trials).seed(seed).build().unwrap()
    }

    fn two_triangles() -> Vec<(usize, usize)> {
        vec![(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)]
    }

    /// Exact min cut by enumerating every bipartition of vertices `0..n`.
    fn brute_force_min_cut(n: usize, edges: &[(usize, usize)]) -> usize {
        let mut best = usize::MAX;
        // Vertex n-1 stays on side 0 so each bipartition is visited once.
        for mask in 1u32..(1 << (n - 1)) {
            let cut = edges
                .iter()
                .filter(|&&(u, v)| (mask >> u) & 1 != (mask >> v) & 1)
                .count();
            best = best.min(cut);
        }
        best
    }

    fn random_connected_graph(rng: &mut ChaCha20Rng, n: usize, extra: usize) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = (1..n).map(|v| (rng.gen_range(0..v), v)).collect();
        while edges.len() < n - 1 + extra {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u != v {
                edges.push((u, v));
            }
        }
        edges
    }

    #[test]
    fn test_four_cycle() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
        let cut = karger(30, 11).run(&edges).unwrap();
        assert_eq!(cut.cut_value, 2);
        assert_eq!(cut.partition.len(), 4);
        assert_eq!(cut.partition.crossing_edges(&edges), 2);
    }

    #[test]
    fn test_two_triangles_split_at_bridge() {
        let edges = two_triangles();
        let cut = karger(200, 42).run(&edges).unwrap();
        assert_eq!(cut.cut_value, 1);

        let side = cut.partition.side(0).unwrap();
        assert_eq!(cut.partition.members(side), vec![0, 1, 2]);
        assert_eq!(cut.partition.members(3 - side), vec![3, 4, 5]);
    }

    #[test]
    fn test_single_edge_graph() {
        let cut = karger(3, 0).run(&[(0, 1)]).unwrap();
        assert_eq!(cut.cut_value, 1);
        assert_ne!(cut.partition.side(0), cut.partition.side(1));

        let cut = karger(3, 0).run(&[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(cut.cut_value, 3);
    }

    #[test]
    fn test_insufficient_graphs_are_rejected() {
        assert!(matches!(
            karger(3, 0).run(&[]),
            Err(Error::InsufficientGraph { vertices: 0 })
        ));
        assert!(matches!(
            karger(3, 0).run(&[(6, 6), (6, 6)]),
            Err(Error::InsufficientGraph { vertices: 1 })
        ));
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(
            KargerBuilder::new().trials(0).build(),
            Err(Error::InvalidTrialCount)
        ));
    }

    #[test]
    fn test_default_trials() {
        let karger = Karger::builder().build().unwrap();
        assert_eq!(karger.trials(), DEFAULT_TRIALS);
    }

    #[test]
    fn test_disconnected_graph_has_empty_cut() {
        let edges = [(0, 1), (1, 2), (2, 0), (5, 6), (9, 9)];
        let cut = karger(3, 1).run(&edges).unwrap();
        assert_eq!(cut.cut_value, 0);
        assert_eq!(cut.trial, None);
        assert_eq!(cut.partition.members(1), vec![0, 1, 2]);
        assert_eq!(cut.partition.members(2), vec![5, 6, 9]);
        assert_eq!(cut.partition.crossing_edges(&edges), 0);
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let edges = two_triangles();
        let first = karger(5, 99).run(&edges).unwrap();
        let second = karger(5, 99).run(&edges).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, Some(99));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let edges = random_connected_graph(&mut rng, 12, 20);
        let sequential = karger(16, 5).run(&edges).unwrap();
        let parallel = KargerBuilder::new()
            .trials(16)
            .seed(5)
            .parallel(true)
            .build()
            .unwrap()
            .run(&edges)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_winner_is_first_smallest_trial() {
        let edges = two_triangles();
        let seed = 3;
        let cut = karger(10, seed).run(&edges).unwrap();
        let values: Vec<usize> = (0..10)
            .map(|t| run_trial(&edges, seed, t).unwrap().cut_value)
            .collect();
        let best = *values.iter().min().unwrap();
        let first = values.iter().position(|&v| v == best).unwrap();
        assert_eq!(cut.cut_value, best);
        assert_eq!(cut.trial, Some(first));
    }

    #[test]
    fn test_partition_extraction_is_idempotent() {
        let cut = karger(5, 21).run(&two_triangles()).unwrap();
        let again = Partition::from_survivors(&cut.survivors);
        assert_eq!(cut.partition, again);
        assert_eq!(again, Partition::from_survivors(&cut.survivors));
        assert_eq!(cut.partition.len(), 6);
    }

    #[test]
    fn test_matches_brute_force_on_small_graphs() {
        let mut rng = ChaCha20Rng::seed_from_u64(1234);
        for round in 0..10 {
            let n = 5 + round % 3;
            let edges = random_connected_graph(&mut rng, n, 2 * n);
            let exact = brute_force_min_cut(n, &edges);
            let cut = karger(300, round as u64).run(&edges).unwrap();
            assert_eq!(cut.cut_value, exact, "edges: {edges:?}");
            assert_eq!(cut.partition.crossing_edges(&edges), exact);
        }
    }

    #[test]
    fn test_every_trial_is_a_real_cut() {
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        let edges = random_connected_graph(&mut rng, 7, 10);
        let exact = brute_force_min_cut(7, &edges);
        for trial in 0..50 {
            let candidate = run_trial(&edges, 0, trial).unwrap();
            assert!(candidate.cut_value >= exact);
            assert_eq!(candidate.steps, 5);
        }
    }
}

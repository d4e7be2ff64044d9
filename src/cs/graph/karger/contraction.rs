use log::error;
use rand::Rng;

use super::multigraph::Multigraph;
use super::super_vertex::SuperVertex;
use crate::error::{Error, Result};

/// Phase of a contraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Three or more super-vertices remain.
    Active,
    /// Exactly two super-vertices remain.
    Terminal,
}

/// What a finished contraction run leaves behind: the two surviving
/// super-vertices and the number of edges between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutCandidate {
    pub cut_value: usize,
    pub survivors: (SuperVertex, SuperVertex),
    pub steps: usize,
}

/// Drives one randomized contraction sequence over a privately owned graph.
///
/// Each [`step`](Contraction::step) samples an edge proportionally to
/// multiplicity and contracts it completely before returning, so a run can be
/// abandoned between any two steps.
pub struct Contraction<R> {
    graph: Multigraph,
    rng: R,
    steps: usize,
}

impl<R: Rng> Contraction<R> {
    pub fn new(graph: Multigraph, rng: R) -> Result<Self> {
        if graph.vertex_count() < 2 {
            return Err(Error::InsufficientGraph {
                vertices: graph.vertex_count(),
            });
        }
        Ok(Contraction {
            graph,
            rng,
            steps: 0,
        })
    }

    pub fn state(&self) -> State {
        if self.graph.vertex_count() > 2 {
            State::Active
        } else {
            State::Terminal
        }
    }

    pub fn graph(&self) -> &Multigraph {
        &self.graph
    }

    /// Contractions performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Performs one contraction. Does nothing once the run is terminal.
    pub fn step(&mut self) -> Result<State> {
        if self.state() == State::Terminal {
            return Ok(State::Terminal);
        }
        let (a, b) = self.graph.sample_pair(&mut self.rng)?.endpoints();
        self.graph.contract(a, b)?;
        self.steps += 1;
        Ok(self.state())
    }

    /// Contracts until two super-vertices remain and returns the cut they define.
    pub fn run(mut self) -> Result<CutCandidate> {
        while self.step()? == State::Active {}
        self.finish()
    }

    /// Reads the terminal state. Fails unless exactly two super-vertices joined
    /// by exactly one live pair remain.
    pub fn finish(self) -> Result<CutCandidate> {
        if self.state() != State::Terminal {
            return Err(violation(format!(
                "finish called with {} super-vertices left",
                self.graph.vertex_count()
            )));
        }
        let pairs: Vec<_> = self.graph.live_pairs().collect();
        let &[(key, cut_value)] = pairs.as_slice() else {
            return Err(violation(format!(
                "terminal graph has {} live pairs instead of 1",
                pairs.len()
            )));
        };
        let (low, high) = key.endpoints();
        Ok(CutCandidate {
            cut_value,
            survivors: (
                self.graph.vertex(low)?.clone(),
                self.graph.vertex(high)?.clone(),
            ),
            steps: self.steps,
        })
    }
}

fn violation(message: String) -> Error {
    error!("{message}");
    Error::InvariantViolation(message)
}

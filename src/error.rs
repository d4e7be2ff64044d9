use thiserror::Error;

/// Errors produced while building graphs, contracting them and reading edge lists.
#[derive(Debug, Error)]
pub enum Error {
    /// The edge list names fewer than two distinct vertices, so no cut exists.
    #[error("insufficient graph: found {vertices} distinct vertices, at least 2 are required")]
    InsufficientGraph { vertices: usize },

    #[error("trial count must be a positive integer")]
    InvalidTrialCount,

    /// An edge was requested between a vertex and itself.
    #[error("self-loop on vertex {vertex} cannot be stored")]
    SelfLoop { vertex: usize },

    /// The pair does not currently carry any edge.
    #[error("no live edge between vertex {u} and vertex {v}")]
    MissingEdge { u: usize, v: usize },

    #[error("vertex {vertex} is not live in this graph")]
    UnknownVertex { vertex: usize },

    /// Graph bookkeeping went wrong. Always a bug, never bad input.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

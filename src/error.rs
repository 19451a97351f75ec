//! Error types for grid construction and path queries.

use grid_util::point::Point;
use thiserror::Error;

/// Which endpoint of a query was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Invalid input or an aborted search. An exhausted search is not an error,
/// it is reported as `Ok(None)` by the finder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("{endpoint} {point} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        point: Point,
        rows: usize,
        cols: usize,
    },

    #[error("search gave up after expanding {expanded} nodes")]
    SearchLimitReached { expanded: usize },
}

pub type Result<T> = std::result::Result<T, PathError>;

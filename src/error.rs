// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error types for path ingestion and clipping runs.
//
// Two tiers: `ClipError` covers expected rejections (degenerate input, a
// locked engine, an exhausted queue), and `InvariantError` covers states the
// sweep should never reach. An invariant error aborts the whole run.

use thiserror::Error;

/// Errors returned by the clipping engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// Fewer than 3 distinct vertices survived duplicate and collinear removal.
    #[error("path has fewer than 3 distinct vertices")]
    TooFewVertices,
    /// Every vertex of the ring shares the same y coordinate.
    #[error("path is flat: all vertices lie on one horizontal line")]
    FlatPath,
    /// `execute` was called while another run still held the lock.
    #[error("execute called while another clipping run is in progress")]
    Reentrant,
    /// A queue was popped with nothing left in it.
    #[error("{0} queue is empty")]
    EmptyQueue(&'static str),
    /// The sweep hit an unreachable state and was aborted.
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

/// Sweep states the algorithm treats as unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// Intersections in a band could not be ordered so that each pair is adjacent.
    #[error("intersection error: crossings in the band cannot be applied between neighbours")]
    Intersection,
    /// A horizontal edge could not be promoted to its bound successor.
    #[error("horizontal processing error")]
    Horizontal,
    /// A maxima pair was found with only one of its edges assigned to a ring.
    #[error("local maximum error: maxima pair disagrees on output ring assignment")]
    LocalMaximum,
    /// An edge was advanced past the top of its bound.
    #[error("edge has no successor in its bound")]
    MissingBoundSuccessor,
}

pub type ClipResult<T> = Result<T, ClipError>;

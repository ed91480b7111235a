use grid_util::point::Point;
use thiserror::Error;

/// Errors raised when a world, a search request or a configuration violates its preconditions.
/// An unreachable goal is not an error: it is reported as an empty [Path](crate::Path).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("cell {cell} is outside of the {size}x{size} grid")]
    OutOfBounds { cell: Point, size: usize },
    #[error("cell {0} is blocked and cannot be used as an endpoint")]
    BlockedEndpoint(Point),
    #[error("start and goal are both {0}")]
    StartEqualsGoal(Point),
    #[error("grid size {0} is not supported")]
    InvalidSize(usize),
    #[error("invalid map: {0}")]
    InvalidMap(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

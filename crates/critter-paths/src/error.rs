use thiserror::Error;

/// Programming errors surfaced by the queue and the pathfinder.
///
/// An unreachable target is not an error: [`Pathfinder::find_path`] returns
/// an empty path for it.
///
/// [`Pathfinder::find_path`]: crate::Pathfinder::find_path
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("priority queue is empty")]
    EmptyQueue,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

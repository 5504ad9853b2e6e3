use critter_core::Point;
use thiserror::Error;

/// Errors building or editing a [`World`](crate::World).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("world size must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    #[error("line {line} is {found} cells wide, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph \u{201c}{ch}\u{201d} at {pos}")]
    InvalidGlyph { ch: char, pos: Point },
    #[error("{0} is outside the world")]
    OutOfBounds(Point),
    #[error("no food at {0}")]
    NotFood(Point),
    #[error("food quantity must be finite and positive, got {0}")]
    InvalidQuantity(f64),
    #[error("scatter densities must be non-negative and sum to at most 1, got {0}")]
    InvalidDensity(f64),
}

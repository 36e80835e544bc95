//! Common types shared across Pocket Quest crates.

/// Simple 2D coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new [`Point`].
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `delta`.
    pub fn offset(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    /// Manhattan distance between two points.
    pub fn manhattan(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Source of randomness for game rules.
///
/// Implemented by the engine's seeded generator and by scripted dice in tests.
pub trait Dice {
    /// Uniform integer in `min..=max`.
    fn roll(&mut self, min: i32, max: i32) -> i32;
    /// Uniform float in `[0, 1)`.
    fn chance(&mut self) -> f64;
}

/// Unified error type for the ambient layers around the simulation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_new_sets_coordinates() {
        let p = Point::new(2, 3);
        assert_eq!(p.x, 2);
        assert_eq!(p.y, 3);
    }

    #[test]
    fn offset_and_manhattan() {
        let p = Point::new(9, 10).offset(Point::new(0, -1));
        assert_eq!(p, Point::new(9, 9));
        assert_eq!(p.manhattan(Point::new(9, 10)), 1);
        assert_eq!(Point::new(0, 0).manhattan(Point::new(-2, 3)), 5);
    }

    #[test]
    fn io_error_converts() {
        let err: GameError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, GameError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}

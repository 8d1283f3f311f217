use std::fmt;

use crate::env::types::MoveDirection;

/// signed cell coordinate relative to where the solve started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub row: isize,
    pub col: isize,
}

impl Coord {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => Self::new(self.row - 1, self.col),
            MoveDirection::Right => Self::new(self.row, self.col + 1),
            MoveDirection::Down => Self::new(self.row + 1, self.col),
            MoveDirection::Left => Self::new(self.row, self.col - 1),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_then_opposite_returns_home() {
        let start = Coord::new(-3, 5);
        for direction in MoveDirection::ALL {
            assert_eq!(start.step(direction).step(direction.opposite()), start);
        }
    }

    #[test]
    fn up_decreases_row() {
        assert_eq!(Coord::ORIGIN.step(MoveDirection::Up), Coord::new(-1, 0));
        assert_eq!(Coord::ORIGIN.step(MoveDirection::Left), Coord::new(0, -1));
    }
}

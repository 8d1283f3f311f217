use crate::env::types::MoveDirection;

/// unsigned grid position inside a [`super::BoundedMaze`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn to_index(self, width: usize) -> usize {
        self.row * width + self.col
    }

    pub fn from_index(index: usize, width: usize) -> Self {
        Self::new(index / width, index % width)
    }

    pub fn move_in_direction(
        self,
        direction: MoveDirection,
        bounds: (usize, usize),
    ) -> Option<Self> {
        let (height, width) = bounds;
        match direction {
            MoveDirection::Up if self.row > 0 => Some(Self::new(self.row - 1, self.col)),
            MoveDirection::Down if self.row + 1 < height => Some(Self::new(self.row + 1, self.col)),
            MoveDirection::Left if self.col > 0 => Some(Self::new(self.row, self.col - 1)),
            MoveDirection::Right if self.col + 1 < width => Some(Self::new(self.row, self.col + 1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_stop_at_the_grid_edge() {
        let bounds = (3, 3);
        let corner = Position::new(0, 0);
        assert_eq!(corner.move_in_direction(MoveDirection::Up, bounds), None);
        assert_eq!(corner.move_in_direction(MoveDirection::Left, bounds), None);
        assert_eq!(
            corner.move_in_direction(MoveDirection::Right, bounds),
            Some(Position::new(0, 1))
        );

        let far = Position::new(2, 2);
        assert_eq!(far.move_in_direction(MoveDirection::Down, bounds), None);
        assert_eq!(far.move_in_direction(MoveDirection::Right, bounds), None);
    }

    #[test]
    fn index_round_trips() {
        let pos = Position::new(4, 7);
        assert_eq!(Position::from_index(pos.to_index(9), 9), pos);
    }
}

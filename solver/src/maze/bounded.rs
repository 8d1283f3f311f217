use std::fmt;

use super::{cell::Cell, position::Position};
use crate::env::types::MoveDirection;

/// fully known rectangular maze, used to simulate the robot's surroundings
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Vec<Cell>,
    width: usize,
    height: usize,
    start: Position,
    exit: Option<Position>,
}

impl Maze {
    /// parses one row per line: `#` wall, `.` free, `S` start, `E` exit.
    /// short rows are padded with walls.
    pub fn parse(text: &str) -> eyre::Result<Self> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if rows.is_empty() {
            eyre::bail!("maze is empty");
        }

        let height = rows.len();
        let width = rows
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut grid = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let mut count = 0;
            for (col, c) in line.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    eyre::eyre!(
                        "unexpected character {:?} at line {}, column {}",
                        c,
                        row + 1,
                        col + 1
                    )
                })?;
                grid.push(cell);
                count += 1;
            }
            grid.extend(std::iter::repeat_n(Cell::Blocked, width - count));
        }

        Self::from_grid(grid, height, width)
    }

    pub fn from_grid(grid: Vec<Cell>, height: usize, width: usize) -> eyre::Result<Self> {
        if grid.len() != width * height {
            eyre::bail!(
                "grid size mismatch: expected {}, got {}",
                width * height,
                grid.len()
            );
        }

        let find_all = |wanted: Cell| -> Vec<Position> {
            grid.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell == wanted)
                .map(|(idx, _)| Position::from_index(idx, width))
                .collect()
        };

        let start = match find_all(Cell::Robot).as_slice() {
            [start] => *start,
            [] => eyre::bail!("maze has no start cell"),
            many => eyre::bail!("maze has {} start cells, expected one", many.len()),
        };

        let exit = match find_all(Cell::Target).as_slice() {
            [] => None,
            [exit] => Some(*exit),
            many => eyre::bail!("maze has {} exit cells, expected at most one", many.len()),
        };

        Ok(Self {
            grid,
            width,
            height,
            start,
            exit,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn exit(&self) -> Option<Position> {
        self.exit
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.row < self.height && pos.col < self.width {
            Some(self.grid[pos.to_index(self.width)])
        } else {
            None
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| cell.is_walkable())
    }

    /// walkable neighbor reached by moving once in `direction`
    pub fn neighbor(&self, pos: Position, direction: MoveDirection) -> Option<Position> {
        pos.move_in_direction(direction, self.bounds())
            .filter(|&next| self.is_walkable(next))
    }

    /// undirected passages between horizontally or vertically adjacent walkable cells
    pub fn passage_count(&self) -> usize {
        (0..self.grid.len())
            .map(|idx| Position::from_index(idx, self.width))
            .filter(|&pos| self.is_walkable(pos))
            .map(|pos| {
                [MoveDirection::Right, MoveDirection::Down]
                    .into_iter()
                    .filter(|&direction| self.neighbor(pos, direction).is_some())
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.chunks(self.width) {
            let line: String = row.iter().map(|cell| cell.as_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

mod bounded;
mod cell;
mod coord;
mod generate;
mod position;

pub use bounded::Maze as BoundedMaze;
pub use cell::Cell;
pub use coord::Coord;
pub use generate::generate;
pub use position::Position;

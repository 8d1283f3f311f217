//! Per-cell record of which directions the robot has already left each cell in.

mod dense;
mod sparse;

use bitflags::bitflags;

use crate::{env::types::MoveDirection, error::LedgerError, maze::Coord};

pub use dense::DenseLedger;
pub use sparse::SparseLedger;

bitflags! {
    /// outbound traversals recorded for one cell; flags are only ever added
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Departures: u8 {
        const UP = 0b0001;
        const RIGHT = 0b0010;
        const DOWN = 0b0100;
        const LEFT = 0b1000;
    }
}

impl Departures {
    pub fn has_departed(self, direction: MoveDirection) -> bool {
        self.contains(direction.departure())
    }

    /// true until the robot has left the cell at least once
    pub fn is_untouched(self) -> bool {
        self.is_empty()
    }
}

pub trait TraversalLedger {
    /// record for `coord`, growing storage to cover it first
    fn record_at(&mut self, coord: Coord) -> Result<Departures, LedgerError>;

    /// record for `coord` without growing; uncovered cells read as untouched
    fn peek(&self, coord: Coord) -> Departures;

    /// sets the departure flag, returning whether it was newly set
    fn mark_departure(
        &mut self,
        coord: Coord,
        direction: MoveDirection,
    ) -> Result<bool, LedgerError>;

    fn ensure_capacity(&mut self, coord: Coord) -> Result<(), LedgerError>;

    /// number of cells departed from at least once
    fn visited_cells(&self) -> usize;

    fn name(&self) -> &'static str;
}

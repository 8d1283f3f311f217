//! Pure move decisions: explore untouched cells first, otherwise retreat along the
//! single edge that still leads back toward where the robot came from.
//!
//! A neighbor counts as untouched when it has never been departed from. Only
//! untouched neighbors are entered going forward, so walking into a part of the
//! maze already explored is treated as a wall and every cycle is broken at the
//! point where it would close. Retreating uses the edge the neighbor once left
//! toward us and we have not yet taken back; edges crossed both ways lead into
//! exhausted branches and are never taken again.

use crate::{
    env::types::{MoveDirection, Surroundings},
    error::LedgerError,
    ledger::{Departures, TraversalLedger},
    maze::Coord,
};

/// records of the four cardinal neighbors, indexed by direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborRecords([Departures; 4]);

impl NeighborRecords {
    /// reads the records of every open neighbor of `at`, growing the ledger as needed
    pub fn gather<L: TraversalLedger>(
        ledger: &mut L,
        at: Coord,
        open: &Surroundings,
    ) -> Result<Self, LedgerError> {
        let mut records = Self::default();
        for direction in open.open_directions() {
            records.0[direction.index()] = ledger.record_at(at.step(direction))?;
        }
        Ok(records)
    }

    pub fn with(mut self, direction: MoveDirection, record: Departures) -> Self {
        self.0[direction.index()] = record;
        self
    }

    pub fn get(&self, direction: MoveDirection) -> Departures {
        self.0[direction.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Forward(MoveDirection),
    Backtrack(MoveDirection),
}

impl Move {
    pub fn direction(self) -> MoveDirection {
        match self {
            Self::Forward(direction) | Self::Backtrack(direction) => direction,
        }
    }
}

pub fn find_forward_move(
    open: &Surroundings,
    neighbors: &NeighborRecords,
) -> Option<MoveDirection> {
    open.open_directions()
        .find(|&direction| neighbors.get(direction).is_untouched())
}

/// every open direction whose neighbor has left toward us while we have not
/// yet left toward it
pub fn backtrack_candidates<'a>(
    open: &'a Surroundings,
    neighbors: &'a NeighborRecords,
    current: Departures,
) -> impl Iterator<Item = MoveDirection> + 'a {
    open.open_directions().filter(move |&direction| {
        neighbors
            .get(direction)
            .has_departed(direction.opposite())
            && !current.has_departed(direction)
    })
}

pub fn find_backtrack_move(
    open: &Surroundings,
    neighbors: &NeighborRecords,
    current: Departures,
) -> Option<MoveDirection> {
    backtrack_candidates(open, neighbors, current).next()
}

pub fn select_move(
    open: &Surroundings,
    neighbors: &NeighborRecords,
    current: Departures,
) -> Option<Move> {
    find_forward_move(open, neighbors)
        .map(Move::Forward)
        .or_else(|| find_backtrack_move(open, neighbors, current).map(Move::Backtrack))
}

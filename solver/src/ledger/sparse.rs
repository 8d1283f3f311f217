use std::collections::HashMap;

use super::{Departures, TraversalLedger};
use crate::{env::types::MoveDirection, error::LedgerError, maze::Coord};

/// coordinate-keyed store; only departed cells take up memory
#[derive(Debug, Clone, Default)]
pub struct SparseLedger {
    cells: HashMap<Coord, Departures>,
}

impl SparseLedger {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }
}

impl TraversalLedger for SparseLedger {
    fn record_at(&mut self, coord: Coord) -> Result<Departures, LedgerError> {
        Ok(self.peek(coord))
    }

    fn peek(&self, coord: Coord) -> Departures {
        self.cells.get(&coord).copied().unwrap_or_default()
    }

    fn mark_departure(
        &mut self,
        coord: Coord,
        direction: MoveDirection,
    ) -> Result<bool, LedgerError> {
        self.ensure_capacity(coord)?;
        let record = self.cells.entry(coord).or_default();
        let fresh = !record.has_departed(direction);
        record.insert(direction.departure());
        Ok(fresh)
    }

    fn ensure_capacity(&mut self, coord: Coord) -> Result<(), LedgerError> {
        if self.cells.contains_key(&coord) {
            return Ok(());
        }
        self.cells
            .try_reserve(1)
            .map_err(|_| LedgerError::CapacityExhausted {
                cells: self.cells.len().saturating_add(1),
            })
    }

    fn visited_cells(&self) -> usize {
        self.cells.len()
    }

    fn name(&self) -> &'static str {
        "sparse"
    }
}

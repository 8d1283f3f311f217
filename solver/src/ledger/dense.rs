use super::{Departures, TraversalLedger};
use crate::{env::types::MoveDirection, error::LedgerError, maze::Coord};

const INITIAL_HALF_EXTENT: usize = 1;

/// row-major buffer centred on the origin, covering `-half..=half` in each axis.
/// a dimension doubles whenever a coordinate falls outside it.
#[derive(Debug, Clone)]
pub struct DenseLedger {
    cells: Vec<Departures>,
    half_rows: usize,
    half_cols: usize,
    visited: usize,
}

impl DenseLedger {
    pub fn new() -> Self {
        let side = INITIAL_HALF_EXTENT * 2 + 1;
        Self {
            cells: vec![Departures::empty(); side * side],
            half_rows: INITIAL_HALF_EXTENT,
            half_cols: INITIAL_HALF_EXTENT,
            visited: 0,
        }
    }

    /// (rows, cols) currently backed by storage
    pub fn dimensions(&self) -> (usize, usize) {
        (self.half_rows * 2 + 1, self.half_cols * 2 + 1)
    }

    fn width(&self) -> usize {
        self.half_cols * 2 + 1
    }

    fn covers(&self, coord: Coord) -> bool {
        coord.row.unsigned_abs() <= self.half_rows && coord.col.unsigned_abs() <= self.half_cols
    }

    // caller guarantees `covers(coord)`
    fn offset(&self, coord: Coord) -> usize {
        let row = (coord.row + self.half_rows as isize) as usize;
        let col = (coord.col + self.half_cols as isize) as usize;
        row * self.width() + col
    }
}

impl Default for DenseLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn grow_extent(mut half: usize, needed: usize) -> Option<usize> {
    while half < needed {
        half = half.checked_mul(2)?;
    }
    Some(half)
}

fn side(half: usize) -> Option<usize> {
    half.checked_mul(2)?.checked_add(1)
}

impl TraversalLedger for DenseLedger {
    fn record_at(&mut self, coord: Coord) -> Result<Departures, LedgerError> {
        self.ensure_capacity(coord)?;
        Ok(self.cells[self.offset(coord)])
    }

    fn peek(&self, coord: Coord) -> Departures {
        if self.covers(coord) {
            self.cells[self.offset(coord)]
        } else {
            Departures::empty()
        }
    }

    fn mark_departure(
        &mut self,
        coord: Coord,
        direction: MoveDirection,
    ) -> Result<bool, LedgerError> {
        self.ensure_capacity(coord)?;
        let offset = self.offset(coord);
        let record = &mut self.cells[offset];

        if record.has_departed(direction) {
            return Ok(false);
        }
        if record.is_untouched() {
            self.visited += 1;
        }
        record.insert(direction.departure());
        Ok(true)
    }

    fn ensure_capacity(&mut self, coord: Coord) -> Result<(), LedgerError> {
        if self.covers(coord) {
            return Ok(());
        }

        let grown = grow_extent(self.half_rows, coord.row.unsigned_abs())
            .zip(grow_extent(self.half_cols, coord.col.unsigned_abs()))
            .and_then(|(half_rows, half_cols)| {
                let len = side(half_rows)?.checked_mul(side(half_cols)?)?;
                Some((half_rows, half_cols, len))
            });
        let Some((half_rows, half_cols, len)) = grown else {
            return Err(LedgerError::CapacityExhausted { cells: usize::MAX });
        };

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| LedgerError::CapacityExhausted { cells: len })?;
        cells.resize(len, Departures::empty());

        let old_width = self.width();
        let new_width = half_cols * 2 + 1;
        let row_shift = half_rows - self.half_rows;
        let col_shift = half_cols - self.half_cols;

        for (old_row, chunk) in self.cells.chunks_exact(old_width).enumerate() {
            let start = (old_row + row_shift) * new_width + col_shift;
            cells[start..start + old_width].copy_from_slice(chunk);
        }

        let (old_rows, old_cols) = self.dimensions();
        self.cells = cells;
        self.half_rows = half_rows;
        self.half_cols = half_cols;

        log::debug!(
            "ledger grew from {}x{} to {}x{} to cover {}",
            old_rows,
            old_cols,
            half_rows * 2 + 1,
            new_width,
            coord
        );

        Ok(())
    }

    fn visited_cells(&self) -> usize {
        self.visited
    }

    fn name(&self) -> &'static str {
        "dense"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_three_by_three() {
        let ledger = DenseLedger::new();
        assert_eq!(ledger.dimensions(), (3, 3));
        assert_eq!(ledger.peek(Coord::new(1, -1)), Departures::empty());
    }

    #[test]
    fn only_the_overflowing_dimension_doubles() {
        let mut ledger = DenseLedger::new();
        ledger.ensure_capacity(Coord::new(0, 2)).unwrap();
        assert_eq!(ledger.dimensions(), (3, 5));

        ledger.ensure_capacity(Coord::new(-5, 0)).unwrap();
        assert_eq!(ledger.dimensions(), (17, 5));

        // already covered: no change
        ledger.ensure_capacity(Coord::new(8, -2)).unwrap();
        assert_eq!(ledger.dimensions(), (17, 5));
    }

    #[test]
    fn growth_preserves_every_record() {
        let mut ledger = DenseLedger::new();
        let marks = [
            (Coord::new(0, 0), MoveDirection::Right),
            (Coord::new(-1, 1), MoveDirection::Up),
            (Coord::new(1, -1), MoveDirection::Left),
            (Coord::new(1, 1), MoveDirection::Down),
            (Coord::new(-1, -1), MoveDirection::Down),
        ];
        for (coord, direction) in marks {
            ledger.mark_departure(coord, direction).unwrap();
        }

        let snapshot: Vec<_> = (-1..=1)
            .flat_map(|row| (-1..=1).map(move |col| Coord::new(row, col)))
            .map(|coord| (coord, ledger.peek(coord)))
            .collect();

        ledger.record_at(Coord::new(-9, 33)).unwrap();
        ledger.record_at(Coord::new(70, -2)).unwrap();
        assert_eq!(ledger.dimensions(), (257, 129));

        for (coord, record) in snapshot {
            assert_eq!(ledger.peek(coord), record, "record at {} changed", coord);
        }
        assert_eq!(ledger.visited_cells(), marks.len());
    }

    #[test]
    fn records_at_the_far_edge_survive_later_growth() {
        let mut ledger = DenseLedger::new();
        let edge = Coord::new(-4, 4);
        ledger.mark_departure(edge, MoveDirection::Up).unwrap();
        ledger.mark_departure(Coord::new(4, -4), MoveDirection::Right).unwrap();

        ledger.ensure_capacity(Coord::new(1000, 1000)).unwrap();

        assert_eq!(ledger.peek(edge), Departures::UP);
        assert_eq!(ledger.peek(Coord::new(4, -4)), Departures::RIGHT);
        assert_eq!(ledger.peek(Coord::new(-4, -4)), Departures::empty());
    }

    #[test]
    fn impossible_extent_reports_exhaustion() {
        let mut ledger = DenseLedger::new();
        let err = ledger
            .ensure_capacity(Coord::new(isize::MIN, isize::MIN))
            .unwrap_err();
        assert!(matches!(err, LedgerError::CapacityExhausted { .. }));
        // storage untouched
        assert_eq!(ledger.dimensions(), (3, 3));
    }
}

use std::time::Duration;

use thiserror::Error;

use crate::{env::types::MoveDirection, ledger::Departures, maze::Coord};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger storage exhausted: could not allocate room for {cells} cells")]
    CapacityExhausted { cells: usize },
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("no exit reachable: stuck at {at} with open neighbors {neighbors:?}")]
    NoExitReachable {
        at: Coord,
        neighbors: Vec<(MoveDirection, Departures)>,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("move {direction} from {at} was not confirmed within {timeout:?}")]
    MoveTimeout {
        at: Coord,
        direction: MoveDirection,
        timeout: Duration,
    },

    #[error("environment rejected move {direction} from {at}")]
    MoveRejected { at: Coord, direction: MoveDirection },

    #[error("environment dropped the confirmation for move {direction} from {at}")]
    ConfirmationDropped { at: Coord, direction: MoveDirection },

    #[error("gave up after {limit} steps")]
    StepLimit { limit: usize },
}

//! The world the robot walks in. The solver only senses, asks whether it stands on
//! the exit, and requests single-cell moves.

mod grid;
pub mod types;

use futures::channel::oneshot;

use types::{MoveDirection, MoveResponse, Surroundings};

pub use grid::GridEnvironment;

/// resolves once the requested move has taken effect
pub type MoveTicket = oneshot::Receiver<MoveResponse>;

pub trait Environment {
    /// passability of the four cells around the robot
    fn sense(&self) -> Surroundings;

    fn is_at_exit(&self) -> bool;

    /// `direction` must be one `sense` reported as free
    fn request_move(&mut self, direction: MoveDirection) -> MoveTicket;
}

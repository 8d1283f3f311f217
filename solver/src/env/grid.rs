use std::time::Duration;

use futures::channel::oneshot;

use super::{
    Environment, MoveTicket,
    types::{MoveDirection, MoveResponse, Surroundings},
};
use crate::maze::{BoundedMaze, Position};

/// simulates a robot inside a fully known maze
pub struct GridEnvironment {
    maze: BoundedMaze,
    robot: Position,
    animation: Duration,
    trail: Vec<(Position, MoveDirection)>,
}

impl GridEnvironment {
    pub fn new(maze: BoundedMaze) -> Self {
        let robot = maze.start();
        Self {
            maze,
            robot,
            animation: Duration::ZERO,
            trail: Vec::new(),
        }
    }

    /// time each move takes before it is confirmed
    pub fn with_animation(mut self, animation: Duration) -> Self {
        self.animation = animation;
        self
    }

    pub fn maze(&self) -> &BoundedMaze {
        &self.maze
    }

    pub fn robot(&self) -> Position {
        self.robot
    }

    /// every accepted move, as the cell it was made from and its direction
    pub fn trail(&self) -> &[(Position, MoveDirection)] {
        &self.trail
    }

    pub fn reset(&mut self) {
        self.robot = self.maze.start();
        self.trail.clear();
    }
}

impl Environment for GridEnvironment {
    fn sense(&self) -> Surroundings {
        Surroundings::from_fn(|direction| self.maze.neighbor(self.robot, direction).is_some().into())
    }

    fn is_at_exit(&self) -> bool {
        self.maze.exit() == Some(self.robot)
    }

    fn request_move(&mut self, direction: MoveDirection) -> MoveTicket {
        let (tx, rx) = oneshot::channel();

        let Some(next) = self.maze.neighbor(self.robot, direction) else {
            log::warn!(
                "rejected move {} into a wall at ({}, {})",
                direction,
                self.robot.row,
                self.robot.col
            );
            let _ = tx.send(MoveResponse { success: false });
            return rx;
        };

        self.trail.push((self.robot, direction));
        self.robot = next;

        if self.animation.is_zero() {
            let _ = tx.send(MoveResponse { success: true });
        } else {
            let animation = self.animation;
            tokio::spawn(async move {
                tokio::time::sleep(animation).await;
                let _ = tx.send(MoveResponse { success: true });
            });
        }

        rx
    }
}

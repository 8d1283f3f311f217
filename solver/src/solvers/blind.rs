use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::{
    env::{Environment, types::Surroundings},
    error::SolveError,
    ledger::TraversalLedger,
    maze::Coord,
    selector::{self, Move, NeighborRecords},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    Running,
    AtExit,
    Failed,
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// pause before issuing each move
    pub delay: Duration,
    /// how long a move may go unconfirmed before the solve fails
    pub move_timeout: Duration,
    pub max_steps: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            move_timeout: Duration::from_secs(5),
            max_steps: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub steps: usize,
    pub forward_moves: usize,
    pub backtrack_moves: usize,
    pub cells_visited: usize,
    /// where the exit lies relative to the start
    pub exit: Coord,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
}

/// walks a maze it cannot see, remembering only which way it left each cell
pub struct BlindSolver<L: TraversalLedger> {
    ledger: L,
    position: Coord,
    state: SolveState,
    config: SolverConfig,
    steps: usize,
    forward_moves: usize,
    backtrack_moves: usize,
    started_at: DateTime<Local>,
    started: Instant,
}

impl<L: TraversalLedger> BlindSolver<L> {
    pub fn new(ledger: L, config: SolverConfig) -> Self {
        Self {
            ledger,
            position: Coord::ORIGIN,
            state: SolveState::Running,
            config,
            steps: 0,
            forward_moves: 0,
            backtrack_moves: 0,
            started_at: Local::now(),
            started: Instant::now(),
        }
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub async fn solve<E: Environment>(mut self, env: &mut E) -> Result<SolveReport, SolveError> {
        log::debug!("starting blind solve with the {} ledger", self.ledger.name());
        self.started_at = Local::now();
        self.started = Instant::now();

        while self.step(env).await? == SolveState::Running {}

        Ok(self.report())
    }

    /// runs one sense-decide-move cycle; terminal states are left untouched
    pub async fn step<E: Environment>(&mut self, env: &mut E) -> Result<SolveState, SolveError> {
        if self.state != SolveState::Running {
            return Ok(self.state);
        }

        match self.advance(env).await {
            Ok(state) => {
                self.state = state;
                Ok(state)
            }
            Err(e) => {
                self.state = SolveState::Failed;
                Err(e)
            }
        }
    }

    async fn advance<E: Environment>(&mut self, env: &mut E) -> Result<SolveState, SolveError> {
        let open = env.sense();
        log::trace!("sensed {:?} at {}", open, self.position);

        if env.is_at_exit() {
            log::info!("reached exit at {} after {} steps", self.position, self.steps);
            return Ok(SolveState::AtExit);
        }

        if let Some(limit) = self.config.max_steps
            && self.steps >= limit
        {
            return Err(SolveError::StepLimit { limit });
        }

        let current = self.ledger.record_at(self.position)?;
        let neighbors = NeighborRecords::gather(&mut self.ledger, self.position, &open)?;

        let chosen = match selector::find_forward_move(&open, &neighbors) {
            Some(direction) => Move::Forward(direction),
            None => {
                let mut candidates = selector::backtrack_candidates(&open, &neighbors, current);
                let Some(direction) = candidates.next() else {
                    return Err(self.stuck(&open, &neighbors));
                };
                if let Some(other) = candidates.next() {
                    log::warn!(
                        "ambiguous backtrack at {}: both {} and {} qualify",
                        self.position,
                        direction,
                        other
                    );
                }
                Move::Backtrack(direction)
            }
        };
        let direction = chosen.direction();

        // the record belongs to the cell being left
        if !self.ledger.mark_departure(self.position, direction)? {
            log::warn!(
                "departure {} from {} was already recorded",
                direction,
                self.position
            );
        }

        let from = self.position;
        self.position = from.step(direction);
        self.steps += 1;
        match chosen {
            Move::Forward(_) => self.forward_moves += 1,
            Move::Backtrack(_) => self.backtrack_moves += 1,
        }

        log::debug!("step {}: {:?} from {}", self.steps, chosen, from);

        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        let ticket = env.request_move(direction);
        match tokio::time::timeout(self.config.move_timeout, ticket).await {
            Err(_) => Err(SolveError::MoveTimeout {
                at: from,
                direction,
                timeout: self.config.move_timeout,
            }),
            Ok(Err(_)) => Err(SolveError::ConfirmationDropped {
                at: from,
                direction,
            }),
            Ok(Ok(response)) if !response.success => Err(SolveError::MoveRejected {
                at: from,
                direction,
            }),
            Ok(Ok(_)) => Ok(SolveState::Running),
        }
    }

    fn stuck(&self, open: &Surroundings, neighbors: &NeighborRecords) -> SolveError {
        let neighbors: Vec<_> = open
            .open_directions()
            .map(|direction| (direction, neighbors.get(direction)))
            .collect();

        log::debug!(
            "no forward or backtrack move at {} after {} steps",
            self.position,
            self.steps
        );

        SolveError::NoExitReachable {
            at: self.position,
            neighbors,
        }
    }

    fn report(&self) -> SolveReport {
        SolveReport {
            steps: self.steps,
            forward_moves: self.forward_moves,
            backtrack_moves: self.backtrack_moves,
            cells_visited: self.ledger.visited_cells(),
            exit: self.position,
            started_at: self.started_at,
            elapsed: self.started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::channel::oneshot;

    use super::*;
    use crate::{
        env::{
            GridEnvironment, MoveTicket,
            types::{MoveDirection, MoveResponse},
        },
        ledger::{Departures, DenseLedger, SparseLedger},
        maze::BoundedMaze,
    };

    fn grid(text: &str) -> GridEnvironment {
        GridEnvironment::new(BoundedMaze::parse(text).unwrap())
    }

    /// accepts every move but never confirms it
    struct Stalled {
        inner: GridEnvironment,
        pending: Vec<oneshot::Sender<MoveResponse>>,
    }

    impl Environment for Stalled {
        fn sense(&self) -> Surroundings {
            self.inner.sense()
        }

        fn is_at_exit(&self) -> bool {
            self.inner.is_at_exit()
        }

        fn request_move(&mut self, _direction: MoveDirection) -> MoveTicket {
            let (tx, rx) = oneshot::channel();
            self.pending.push(tx);
            rx
        }
    }

    /// drops the confirmation without answering
    struct Forgetful(GridEnvironment);

    impl Environment for Forgetful {
        fn sense(&self) -> Surroundings {
            self.0.sense()
        }

        fn is_at_exit(&self) -> bool {
            self.0.is_at_exit()
        }

        fn request_move(&mut self, _direction: MoveDirection) -> MoveTicket {
            oneshot::channel().1
        }
    }

    /// starts on the exit
    struct Arrived;

    impl Environment for Arrived {
        fn sense(&self) -> Surroundings {
            Surroundings::from_fn(|_| false.into())
        }

        fn is_at_exit(&self) -> bool {
            true
        }

        fn request_move(&mut self, _direction: MoveDirection) -> MoveTicket {
            oneshot::channel().1
        }
    }

    /// senses an opening that is really a wall
    struct Lying(GridEnvironment);

    impl Environment for Lying {
        fn sense(&self) -> Surroundings {
            let mut around = self.0.sense();
            around.up = true.into();
            around
        }

        fn is_at_exit(&self) -> bool {
            self.0.is_at_exit()
        }

        fn request_move(&mut self, direction: MoveDirection) -> MoveTicket {
            self.0.request_move(direction)
        }
    }

    #[tokio::test]
    async fn already_at_exit_takes_no_steps() {
        let mut env = Arrived;
        let report = BlindSolver::new(DenseLedger::new(), SolverConfig::default())
            .solve(&mut env)
            .await
            .unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(report.exit, Coord::ORIGIN);
        assert_eq!(report.cells_visited, 0);
    }

    #[tokio::test]
    async fn records_departure_at_the_cell_being_left() {
        let mut env = grid("S.E\n");
        let mut solver = BlindSolver::new(SparseLedger::new(), SolverConfig::default());

        assert_eq!(solver.step(&mut env).await.unwrap(), SolveState::Running);
        assert_eq!(solver.position(), Coord::new(0, 1));
        assert_eq!(solver.ledger().peek(Coord::ORIGIN), Departures::RIGHT);
        assert_eq!(solver.ledger().peek(Coord::new(0, 1)), Departures::empty());

        assert_eq!(solver.step(&mut env).await.unwrap(), SolveState::Running);
        assert_eq!(solver.step(&mut env).await.unwrap(), SolveState::AtExit);
        assert_eq!(solver.steps(), 2);

        // terminal states stay put
        assert_eq!(solver.step(&mut env).await.unwrap(), SolveState::AtExit);
        assert_eq!(solver.steps(), 2);
    }

    #[tokio::test]
    async fn failure_reports_position_and_neighbor_records() {
        let mut env = grid("S..\n");
        let err = BlindSolver::new(DenseLedger::new(), SolverConfig::default())
            .solve(&mut env)
            .await
            .unwrap_err();

        match err {
            SolveError::NoExitReachable { at, neighbors } => {
                assert_eq!(at, Coord::ORIGIN);
                assert_eq!(
                    neighbors,
                    vec![(MoveDirection::Right, Departures::RIGHT | Departures::LEFT)]
                );
            }
            other => panic!("unexpected error: {}", other),
        }
        // out to the end and back again
        assert_eq!(env.trail().len(), 4);
    }

    #[tokio::test]
    async fn failed_state_is_terminal() {
        let mut env = grid("S\n");
        let mut solver = BlindSolver::new(DenseLedger::new(), SolverConfig::default());
        assert!(solver.step(&mut env).await.is_err());
        assert_eq!(solver.state(), SolveState::Failed);
        assert_eq!(solver.step(&mut env).await.unwrap(), SolveState::Failed);
    }

    #[tokio::test]
    async fn unconfirmed_move_times_out() {
        let mut env = Stalled {
            inner: grid("S.E\n"),
            pending: Vec::new(),
        };
        let config = SolverConfig {
            move_timeout: Duration::from_millis(20),
            ..SolverConfig::default()
        };
        let err = BlindSolver::new(DenseLedger::new(), config)
            .solve(&mut env)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::MoveTimeout {
                direction: MoveDirection::Right,
                ..
            }
        ));
        assert_eq!(env.pending.len(), 1);
    }

    #[tokio::test]
    async fn dropped_confirmation_fails() {
        let mut env = Forgetful(grid("S.E\n"));
        let err = BlindSolver::new(DenseLedger::new(), SolverConfig::default())
            .solve(&mut env)
            .await
            .unwrap_err();
        assert!(matches!(err, SolveError::ConfirmationDropped { .. }));
    }

    #[tokio::test]
    async fn rejected_move_fails() {
        let mut env = Lying(grid("#\nS.E\n"));
        let err = BlindSolver::new(DenseLedger::new(), SolverConfig::default())
            .solve(&mut env)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::MoveRejected {
                direction: MoveDirection::Up,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn step_limit_stops_the_solve() {
        let mut env = grid("S....E\n");
        let config = SolverConfig {
            max_steps: Some(3),
            ..SolverConfig::default()
        };
        let err = BlindSolver::new(SparseLedger::new(), config)
            .solve(&mut env)
            .await
            .unwrap_err();
        assert!(matches!(err, SolveError::StepLimit { limit: 3 }));
        assert_eq!(env.trail().len(), 3);
    }

    #[tokio::test]
    async fn report_counts_moves() {
        // right is scanned before left, so the dead end is never entered
        let mut env = grid("..S.E\n");
        let report = BlindSolver::new(DenseLedger::new(), SolverConfig::default())
            .solve(&mut env)
            .await
            .unwrap();
        assert_eq!(report.steps, 2);
        assert_eq!(report.forward_moves, 2);
        assert_eq!(report.backtrack_moves, 0);
        assert_eq!(report.exit, Coord::new(0, 2));
        assert_eq!(report.cells_visited, 2);
    }
}

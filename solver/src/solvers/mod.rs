mod blind;

pub use blind::{BlindSolver, SolveReport, SolveState, SolverConfig};

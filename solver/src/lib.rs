pub mod env;
pub mod error;
pub mod ledger;
pub mod maze;
pub mod selector;
pub mod solvers;

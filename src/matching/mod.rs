pub mod data_structures;
pub mod error;
pub mod exchange;
pub mod solver;

#[cfg(test)]
pub mod test_fixtures;

pub use data_structures::{MatchSet, MatchingInputs};
pub use error::MatchingError;
pub use exchange::{select_cycles, CompatibilityEdge, ExchangeInstance, PairVertex};
pub use solver::solve;

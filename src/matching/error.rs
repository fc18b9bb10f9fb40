use crate::elgamal::ElGamalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("recomputed input commitment does not match the supplied one")]
    CommitmentMismatch,

    #[error("no stable assignment exists for the given inputs")]
    SolverUnsatisfiable,

    #[error("encryption error: {0}")]
    Encryption(#[from] ElGamalError),
}

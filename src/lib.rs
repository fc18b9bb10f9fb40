//! Privacy-preserving stable matching over the Grumpkin embedded curve.
//!
//! The engine takes two populations' preference lists and public keys,
//! solves the capacitated stable-matching problem over rerandomized
//! indices, and emits one exponential-ElGamal notification per participant
//! slot together with a Merkle root that lets any participant prove their
//! own match without revealing anyone else's.

pub mod commitment;
pub mod config;
pub mod crypto_serde;
pub mod curve;
pub mod elgamal;
pub mod matching;
pub mod params;
pub mod permutation;
pub mod session;

pub use config::poseidon_config;
pub use params::*;
pub use session::{MatchReceipt, MatchingSession, Operation, SessionOutput, SolveRequest};

pub mod codec;
pub mod data_structures;
pub mod error;

pub use codec::{decrypt_match, decrypt_to_scalar, derive_encryption_randomness, encrypt};
pub use data_structures::{ElGamalCiphertext, ElGamalKeys};
pub use error::ElGamalError;

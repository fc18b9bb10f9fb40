use crate::curve::DlogError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElGamalError {
    #[error("plaintext {value} does not fit in {bits} bits")]
    InvalidPlaintext { value: u64, bits: u32 },

    #[error(transparent)]
    DlSearchExhausted(#[from] DlogError),

    #[error("ciphertext did not decrypt within the discrete-log window")]
    DecryptionFailed,
}

//! Engine-wide constants and the concrete curve binding.
//!
//! Every array bound in the engine is fixed at compile time; unused slots
//! carry the [`UNMATCHED`] sentinel. The embedded curve is Grumpkin, whose
//! base field equals BN254's scalar field, so all hashing and commitment
//! arithmetic stays native to the outer proof field.

/// The embedded curve the engine encrypts and commits over.
pub type MatchCurve = ark_grumpkin::Projective;

/// Affine representation of [`MatchCurve`] points.
pub type MatchAffine = ark_grumpkin::Affine;

/// The proof field: Grumpkin's base field (= BN254's scalar field).
pub type Field = ark_grumpkin::Fq;

/// The curve's scalar field, used for secret keys and encryption randomness.
pub type Scalar = ark_grumpkin::Fr;

/// Number of proposer-side participants (students).
pub const N_S: usize = 5;

/// Number of receiver-side participants (colleges).
pub const N_C: usize = 5;

/// Length of a student preference row.
pub const MAX_PREFS: usize = 5;

/// Maximum per-college capacity.
pub const MAX_CAP: usize = 3;

/// Total number of ciphertext slots emitted per round.
pub const TOTAL_CAP: usize = N_S + N_C * MAX_CAP;

/// Height of the match commitment tree; 2^MERKLE_HEIGHT leaves must cover
/// every ciphertext slot.
pub const MERKLE_HEIGHT: usize = 5;

/// Sentinel index marking "no match / padding". Never a valid participant id.
pub const UNMATCHED: u16 = 999;

/// Plaintext budget for exponential ElGamal; decryption solves a discrete
/// log bounded by 2^BITS_DL.
pub const BITS_DL: u32 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_layout_fits_the_tree() {
        assert!(TOTAL_CAP <= 1 << MERKLE_HEIGHT);
        assert_eq!(TOTAL_CAP, N_S + N_C * MAX_CAP);
    }

    #[test]
    fn sentinel_is_out_of_range() {
        assert!((UNMATCHED as usize) >= N_S.max(N_C));
        // The +1-offset sentinel plaintext must stay inside the DL budget.
        assert!((UNMATCHED as u64 + 1) < (1 << BITS_DL));
    }

    #[test]
    fn grumpkin_is_embedded_in_bn254() {
        // The whole design rests on curve coordinates living in the outer
        // proof field.
        assert_eq!(
            std::any::TypeId::of::<Field>(),
            std::any::TypeId::of::<ark_bn254::Fr>()
        );
    }
}

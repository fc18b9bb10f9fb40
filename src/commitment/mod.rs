//! Algebraic commitments binding a round's outputs to its inputs.
//!
//! Everything here is one Poseidon sponge away from the raw data: the
//! pubkey handle `H(x, y)`, the canonical input flattening, the per-match
//! nonce and the Merkle leaves built from it. The flattening order is part
//! of the public contract; reordering any section changes the commitment.

pub mod merkle;

pub use merkle::{verify_path, MerkleTree};

use crate::config::poseidon_config;
use crate::curve::affine_coords;
use crate::matching::MatchingInputs;
use crate::params::{Field, MatchCurve};
use ark_crypto_primitives::sponge::{poseidon::PoseidonSponge, CryptographicSponge};
use ark_std::Zero;

/// Field-sized handle for a public key: `H(x, y)` of the affine point,
/// zero for the point at infinity (unused slot).
pub fn hash_pubkey(public_key: &MatchCurve) -> Field {
    let (x, y, infinity) = affine_coords(public_key);
    if infinity {
        return Field::zero();
    }
    let config = poseidon_config::<Field>();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(&x);
    sponge.absorb(&y);
    sponge.squeeze_field_elements(1)[0]
}

/// Commit to a round's public inputs: student preferences row-major, then
/// college preferences row-major, then capacities, then the pubkey handles
/// of both populations.
pub fn input_commitment(inputs: &MatchingInputs) -> Field {
    let config = poseidon_config::<Field>();
    let mut sponge = PoseidonSponge::new(&config);

    for row in &inputs.student_prefs {
        for &entry in row {
            sponge.absorb(&Field::from(entry as u64));
        }
    }
    for row in &inputs.college_prefs {
        for &entry in row {
            sponge.absorb(&Field::from(entry as u64));
        }
    }
    for &capacity in &inputs.college_capacities {
        sponge.absorb(&Field::from(capacity as u64));
    }
    for public_key in &inputs.student_pubkeys {
        sponge.absorb(&hash_pubkey(public_key));
    }
    for public_key in &inputs.college_pubkeys {
        sponge.absorb(&hash_pubkey(public_key));
    }

    sponge.squeeze_field_elements(1)[0]
}

/// Per-match nonce, shared by both sides of the match:
/// `H(s_id, c_id, nonce_seed)`.
pub fn match_nonce(student_id: u16, college_id: u16, nonce_seed: &Field) -> Field {
    let config = poseidon_config::<Field>();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(&Field::from(student_id as u64));
    sponge.absorb(&Field::from(college_id as u64));
    sponge.absorb(nonce_seed);
    sponge.squeeze_field_elements(1)[0]
}

/// Merkle leaf for one side of a match: `H(recipient_id, match_id, nonce)`.
pub fn leaf_hash(recipient_id: u16, match_id: u16, nonce: &Field) -> Field {
    let config = poseidon_config::<Field>();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(&Field::from(recipient_id as u64));
    sponge.absorb(&Field::from(match_id as u64));
    sponge.absorb(nonce);
    sponge.squeeze_field_elements(1)[0]
}

/// Two-to-one Poseidon compression for internal tree nodes.
pub fn hash_pair(left: &Field, right: &Field) -> Field {
    let config = poseidon_config::<Field>();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(left);
    sponge.absorb(right);
    sponge.squeeze_field_elements(1)[0]
}

//! Range-checked exponential ElGamal on top of the raw ciphertext type.
//!
//! Plaintexts are bounded integers (`< 2^BITS_DL`) embedded as `msg * G`.
//! Encryption randomness is never sampled here: the engine derives it
//! deterministically from the nonce seed so that witness generation is
//! reproducible bit for bit. Semantic security then rests on the nonce
//! seed staying a secret witness and Poseidon acting as a random oracle.

use super::data_structures::ElGamalCiphertext;
use super::error::ElGamalError;
use crate::config::poseidon_config;
use crate::curve::{babystep_giantstep, scalar_from_field, CurveAbsorb};
use crate::params::{BITS_DL, UNMATCHED};
use ark_crypto_primitives::sponge::{poseidon::PoseidonSponge, Absorb, CryptographicSponge};
use ark_ec::CurveGroup;
use ark_ff::PrimeField;

const LOG_TARGET: &str = "sealed_match::elgamal";

/// Encrypt a bounded integer under `public_key` with caller-supplied
/// randomness. Rejects plaintexts outside the `BITS_DL` window.
pub fn encrypt<C: CurveGroup>(
    public_key: C,
    msg: u64,
    randomness: C::ScalarField,
) -> Result<ElGamalCiphertext<C>, ElGamalError> {
    if msg >= 1u64 << BITS_DL {
        return Err(ElGamalError::InvalidPlaintext { value: msg, bits: BITS_DL });
    }
    Ok(ElGamalCiphertext::encrypt_scalar(
        C::ScalarField::from(msg),
        randomness,
        public_key,
    ))
}

/// Decrypt back to the bounded integer. Fails with `DlSearchExhausted` when
/// the point does not lie in the `BITS_DL` window.
pub fn decrypt_to_scalar<C: CurveGroup>(
    private_key: C::ScalarField,
    ciphertext: &ElGamalCiphertext<C>,
) -> Result<u64, ElGamalError> {
    let point = ciphertext.decrypt_to_point(private_key);
    Ok(babystep_giantstep(&point, BITS_DL)?)
}

/// Derive the randomness for the `slot`-th encryption of a round:
/// `H(msg, pk.x, pk.y, recipient_id, slot, nonce_seed)` reduced into the
/// scalar field. Distinct slots give independent sponge inputs, so a nonce
/// seed is never reused across encryptions within a round.
pub fn derive_encryption_randomness<C>(
    msg: u64,
    public_key: &C,
    recipient_id: u16,
    slot: usize,
    nonce_seed: &C::BaseField,
) -> C::ScalarField
where
    C: CurveGroup + CurveAbsorb<C::BaseField>,
    C::BaseField: PrimeField + Absorb,
{
    let config = poseidon_config::<C::BaseField>();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(&C::BaseField::from(msg));
    public_key.curve_absorb(&mut sponge);
    sponge.absorb(&C::BaseField::from(recipient_id as u64));
    sponge.absorb(&C::BaseField::from(slot as u64));
    sponge.absorb(nonce_seed);
    let digest: C::BaseField = sponge.squeeze_field_elements(1)[0];
    scalar_from_field::<C>(&digest)
}

/// Host-side decryption of a match notification.
///
/// Plaintexts carry a `+1` offset so that zero never encodes a real match;
/// a zero plaintext (the padding ciphertext decrypts to the identity) and
/// the offset sentinel both come back as `UNMATCHED`.
pub fn decrypt_match<C: CurveGroup>(
    private_key: C::ScalarField,
    ciphertext: &ElGamalCiphertext<C>,
) -> Result<u16, ElGamalError> {
    let plaintext = decrypt_to_scalar(private_key, ciphertext).map_err(|err| {
        tracing::warn!(target: LOG_TARGET, %err, "match decryption failed");
        ElGamalError::DecryptionFailed
    })?;

    // Only plaintexts in [1, 2^BITS_DL] carry a match id; zero is padding
    // and anything past the window is an overshoot of the search, not a
    // real notification.
    if plaintext == 0 || plaintext > 1u64 << BITS_DL {
        return Ok(UNMATCHED);
    }
    Ok((plaintext - 1) as u16)
}

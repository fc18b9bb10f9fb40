//! Scalar and point helpers over the embedded curve.
//!
//! Point arithmetic itself comes from arkworks; this module adds the few
//! operations the engine needs on top: field-to-scalar reduction, the affine
//! `(x, y, is_infinity)` encoding, sponge absorption of points and bounded
//! discrete-log recovery.

pub mod dlog;

pub use dlog::{babystep_giantstep, DlogError};

use ark_crypto_primitives::sponge::{poseidon::PoseidonSponge, Absorb, CryptographicSponge};
use ark_ec::{
    short_weierstrass::{Projective, SWCurveConfig},
    CurveGroup,
};
use ark_ff::{AdditiveGroup, BigInteger, PrimeField};

/// Reduce a base-field element into the curve's scalar field.
///
/// Interprets the element's little-endian bytes modulo the scalar field
/// order. Truncation mod `r` is accepted; callers that need uniformity get
/// it from the sponge output being close to field-sized.
pub fn scalar_from_field<C: CurveGroup>(value: &C::BaseField) -> C::ScalarField
where
    C::BaseField: PrimeField,
{
    let bytes = value.into_bigint().to_bytes_le();
    C::ScalarField::from_le_bytes_mod_order(&bytes)
}

/// `k * G` for the curve generator.
pub fn fixed_base_mul<C: CurveGroup>(k: C::ScalarField) -> C {
    C::generator() * k
}

/// `k * P` for an arbitrary point.
pub fn var_base_mul<C: CurveGroup>(point: C, k: C::ScalarField) -> C {
    point * k
}

pub fn point_add<C: CurveGroup>(p: C, q: C) -> C {
    p + q
}

pub fn point_neg<C: CurveGroup>(p: C) -> C {
    -p
}

/// Affine `(x, y, is_infinity)` encoding of a point. The point at infinity
/// encodes as `(0, 0, true)`.
pub fn affine_coords<P: SWCurveConfig>(point: &Projective<P>) -> (P::BaseField, P::BaseField, bool) {
    let affine = point.into_affine();
    if affine.infinity {
        (P::BaseField::ZERO, P::BaseField::ZERO, true)
    } else {
        (affine.x, affine.y, false)
    }
}

/// Absorbing native curve points into a Poseidon sponge over the curve's
/// base field. Coordinates are fed in as `(x, y, is_infinity)` so the
/// encoding matches the engine's point serialization.
pub trait CurveAbsorb<F: PrimeField> {
    fn curve_absorb(&self, sponge: &mut PoseidonSponge<F>);
}

impl<P> CurveAbsorb<P::BaseField> for Projective<P>
where
    P: SWCurveConfig,
    P::BaseField: PrimeField + Absorb,
{
    fn curve_absorb(&self, sponge: &mut PoseidonSponge<P::BaseField>) {
        let (x, y, infinity) = affine_coords(self);
        sponge.absorb(&x);
        sponge.absorb(&y);
        sponge.absorb(&P::BaseField::from(infinity));
    }
}

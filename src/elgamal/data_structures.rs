use ark_ec::CurveGroup;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::Rng;
use ark_std::UniformRand;

/// Exponential ElGamal ciphertext: a pair of curve points. The padding
/// ciphertext for unused slots is `(infinity, infinity)`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ElGamalCiphertext<C: CurveGroup> {
    pub c1: C,
    pub c2: C,
}

impl<C: CurveGroup> ElGamalCiphertext<C> {
    pub fn new(c1: C, c2: C) -> Self {
        Self { c1, c2 }
    }

    /// The `(infinity, infinity)` ciphertext used to pad unused slots.
    pub fn padding() -> Self {
        Self { c1: C::zero(), c2: C::zero() }
    }

    pub fn is_padding(&self) -> bool {
        self.c1.is_zero() && self.c2.is_zero()
    }

    /// Encrypt a message (curve point) under `public_key`:
    /// `(r*G, M + r*PK)`.
    pub fn encrypt(message: C, randomness: C::ScalarField, public_key: C) -> Self {
        let identity = C::zero();
        let initial_ciphertext = Self::new(identity, message);
        initial_ciphertext.add_encryption_layer(randomness, public_key)
    }

    /// Encrypt a scalar message by embedding it as `message * G` first.
    pub fn encrypt_scalar(
        message: C::ScalarField,
        randomness: C::ScalarField,
        public_key: C,
    ) -> Self {
        let generator = C::generator();
        let message_point = generator * message;
        Self::encrypt(message_point, randomness, public_key)
    }

    pub fn add_encryption_layer(&self, randomness: C::ScalarField, public_key: C) -> Self {
        let generator = C::generator();

        Self {
            c1: self.c1 + generator * randomness,
            c2: self.c2 + public_key * randomness,
        }
    }

    /// Strip the encryption layer with the private key, leaving `msg * G`.
    pub fn decrypt_to_point(&self, private_key: C::ScalarField) -> C {
        self.c2 - self.c1 * private_key
    }

    /// Homomorphic addition. The plaintext sum must stay inside the caller's
    /// discrete-log budget; nothing here can check that.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            c1: self.c1 + other.c1,
            c2: self.c2 + other.c2,
        }
    }
}

/// A participant keypair on the embedded curve.
#[derive(Clone, Debug)]
pub struct ElGamalKeys<C: CurveGroup> {
    pub private_key: C::ScalarField,
    pub public_key: C,
}

impl<C: CurveGroup> ElGamalKeys<C> {
    pub fn new(private_key: C::ScalarField) -> Self {
        let generator = C::generator();
        let public_key = generator * private_key;
        Self { private_key, public_key }
    }

    /// Draw a fresh keypair. The engine itself never calls this; key
    /// material is sampled by the host before a round starts.
    pub fn rand<R: Rng>(rng: &mut R) -> Self {
        Self::new(C::ScalarField::rand(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MatchCurve, Scalar};
    use ark_ec::PrimeGroup;
    use ark_std::{test_rng, Zero};

    #[test]
    fn decrypt_strips_the_layer() {
        let mut rng = test_rng();
        let keys = ElGamalKeys::<MatchCurve>::rand(&mut rng);
        let message = MatchCurve::generator() * Scalar::from(7u64);

        let ct = ElGamalCiphertext::encrypt(message, Scalar::rand(&mut rng), keys.public_key);
        assert_eq!(ct.decrypt_to_point(keys.private_key), message);
    }

    #[test]
    fn padding_round_trip() {
        let ct = ElGamalCiphertext::<MatchCurve>::padding();
        assert!(ct.is_padding());
        assert!(ct.decrypt_to_point(Scalar::from(123u64)).is_zero());
    }
}

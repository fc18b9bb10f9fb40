//! Index permutations shielding participant identities from the solver.
//!
//! Both populations are rerandomized before matching and the permutation is
//! reversed on the way out, so the solver only ever sees permuted indices.
//! The permutations are derived from a single field-element seed by
//! Fisher-Yates over a keyed LCG. The LCG is deliberately not a CSPRNG: the
//! permutation is a private witness, so it only has to be a bijection. The
//! same seed must never feed nonce or key derivation.

use ark_ff::{BigInteger, PrimeField};

use crate::params::UNMATCHED;

const LOG_TARGET: &str = "sealed_match::permutation";

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MODULUS: u64 = (1 << 31) - 1;

/// Stateless keyed PRG: `rand(seed, i) = (seed * A + B + i) mod M`.
fn keyed_rand(seed: u64, i: u64) -> u64 {
    let seed = seed % LCG_MODULUS;
    (seed * LCG_MULTIPLIER + LCG_INCREMENT + i) % LCG_MODULUS
}

/// Reduce a field element to an LCG seed: little-endian bytes mod `M`.
pub fn lcg_seed_from_field<F: PrimeField>(seed: &F) -> u64 {
    let bytes = seed.into_bigint().to_bytes_le();
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, byte| (acc * 256 + *byte as u64) % LCG_MODULUS)
}

/// A bijection on `[0, len)`. Slot `i` maps to `self.0[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Fisher-Yates over the active prefix `[0, active)`, identity on the
    /// padding slots `[active, len)`. Keeping padding fixed preserves the
    /// active-prefix row invariant the solver relies on.
    pub fn derive_prefix(seed: u64, active: usize, len: usize) -> Self {
        assert!(active <= len, "active prefix exceeds domain");
        let mut indices: Vec<usize> = (0..len).collect();
        if active > 1 {
            for i in (1..active).rev() {
                let j = (keyed_rand(seed, i as u64) as usize) % (i + 1);
                indices.swap(i, j);
            }
        }
        tracing::trace!(target: LOG_TARGET, seed, active, len, "derived permutation");
        Self(indices)
    }

    /// Full-domain shuffle of `[0, len)`.
    pub fn derive(seed: u64, len: usize) -> Self {
        Self::derive_prefix(seed, len, len)
    }

    /// The two population permutations of a round, derived from a single
    /// field-element seed. The second population advances the integer seed
    /// by one so the streams stay independent.
    pub fn derive_populations<F: PrimeField>(
        seed: &F,
        (active_rows, rows): (usize, usize),
        (active_cols, cols): (usize, usize),
    ) -> (Self, Self) {
        let base = lcg_seed_from_field(seed);
        (
            Self::derive_prefix(base, active_rows, rows),
            Self::derive_prefix((base + 1) % LCG_MODULUS, active_cols, cols),
        )
    }

    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Image of slot `i`.
    pub fn index(&self, i: usize) -> usize {
        self.0[i]
    }

    pub fn inverse(&self) -> Self {
        let mut inverted = vec![0usize; self.0.len()];
        for (i, &image) in self.0.iter().enumerate() {
            inverted[image] = i;
        }
        Self(inverted)
    }

    /// Map a participant id through the permutation, letting the sentinel
    /// pass through untouched.
    pub fn map_id(&self, id: u16) -> u16 {
        if id == UNMATCHED {
            UNMATCHED
        } else {
            self.0[id as usize] as u16
        }
    }

    /// Permute per-participant slot values: output slot `pi[i]` receives
    /// `values[i]`.
    pub fn apply_slots<T: Clone, const N: usize>(&self, values: &[T; N]) -> [T; N] {
        assert_eq!(self.0.len(), N, "permutation domain mismatch");
        let mut out = values.clone();
        for (i, value) in values.iter().enumerate() {
            out[self.0[i]] = value.clone();
        }
        out
    }

    /// Permute a preference table: row `pi_self[i]` of the output holds row
    /// `i` of the input with every real entry mapped through `pi_other`.
    pub fn apply_prefs<const ROWS: usize, const COLS: usize>(
        prefs: &[[u16; COLS]; ROWS],
        pi_self: &Permutation,
        pi_other: &Permutation,
    ) -> [[u16; COLS]; ROWS] {
        assert_eq!(pi_self.len(), ROWS, "row permutation domain mismatch");
        let mut out = [[UNMATCHED; COLS]; ROWS];
        for (i, row) in prefs.iter().enumerate() {
            let target = pi_self.index(i);
            for (j, &entry) in row.iter().enumerate() {
                out[target][j] = pi_other.map_id(entry);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Field;

    #[test]
    fn derived_permutation_is_a_bijection() {
        for seed in [0u64, 1, 77, 0x87654321 % LCG_MODULUS] {
            let pi = Permutation::derive(seed, 16);
            let mut seen = [false; 16];
            for i in 0..16 {
                seen[pi.index(i)] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn inverse_round_trips() {
        let seed = lcg_seed_from_field(&Field::from(0x87654321u64));
        let pi = Permutation::derive(seed, 11);
        let inv = pi.inverse();
        for i in 0..11 {
            assert_eq!(inv.index(pi.index(i)), i);
            assert_eq!(pi.index(inv.index(i)), i);
        }
    }

    #[test]
    fn prefix_derivation_fixes_padding_slots() {
        let pi = Permutation::derive_prefix(99, 3, 8);
        for i in 3..8 {
            assert_eq!(pi.index(i), i);
        }
        let mut seen = [false; 3];
        for i in 0..3 {
            let image = pi.index(i);
            assert!(image < 3);
            seen[image] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn seed_reduction_is_stable_and_in_range() {
        let a = lcg_seed_from_field(&Field::from(0x87654321u64));
        let b = lcg_seed_from_field(&Field::from(0x87654321u64));
        assert_eq!(a, b);
        assert!(a < LCG_MODULUS);
        assert_ne!(a, lcg_seed_from_field(&Field::from(0x12345678u64)));
    }

    #[test]
    fn slots_round_trip_through_inverse() {
        let pi = Permutation::derive(5, 6);
        let values: [u32; 6] = [10, 11, 12, 13, 14, 15];
        let shuffled = pi.apply_slots(&values);
        let restored = pi.inverse().apply_slots(&shuffled);
        assert_eq!(restored, values);
        // Slot pi[i] carries what slot i held before.
        for i in 0..6 {
            assert_eq!(shuffled[pi.index(i)], values[i]);
        }
    }

    #[test]
    fn pref_rows_move_and_entries_remap() {
        let prefs: [[u16; 3]; 4] = [
            [1, 0, UNMATCHED],
            [0, UNMATCHED, UNMATCHED],
            [1, UNMATCHED, UNMATCHED],
            [UNMATCHED; 3],
        ];
        let pi_self = Permutation::derive(7, 4);
        let pi_other = Permutation::derive(8, 2);
        let permuted = Permutation::apply_prefs(&prefs, &pi_self, &pi_other);

        for (i, row) in prefs.iter().enumerate() {
            let target = pi_self.index(i);
            for (j, &entry) in row.iter().enumerate() {
                if entry == UNMATCHED {
                    assert_eq!(permuted[target][j], UNMATCHED);
                } else {
                    assert_eq!(permuted[target][j] as usize, pi_other.index(entry as usize));
                }
            }
        }
    }
}

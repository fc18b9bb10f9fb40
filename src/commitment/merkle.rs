//! Fixed-height Merkle tree over match leaves.
//!
//! The tree shape is a compile-time constant: `2^MERKLE_HEIGHT` leaves,
//! zero Field beyond the supplied prefix, parents `H(left, right)`. Leaf
//! positions are fixed by the ciphertext slot layout, so an authentication
//! path plus `(recipient_id, match_id, nonce)` is a self-contained match
//! proof against the published root.

use super::hash_pair;
use crate::params::{Field, MERKLE_HEIGHT};
use ark_std::Zero;

const LOG_TARGET: &str = "sealed_match::commitment::merkle";

pub const LEAF_COUNT: usize = 1 << MERKLE_HEIGHT;

#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// `layers[0]` holds the padded leaves; each following layer halves,
    /// down to `layers[MERKLE_HEIGHT]` holding only the root.
    layers: Vec<Vec<Field>>,
}

impl MerkleTree {
    /// Build the tree from at most `LEAF_COUNT` leaves, zero-padding the
    /// rest. Supplying more is a design bug in the slot layout.
    pub fn build(leaves: &[Field]) -> Self {
        assert!(leaves.len() <= LEAF_COUNT, "leaf count exceeds tree width");

        let mut padded = vec![Field::zero(); LEAF_COUNT];
        padded[..leaves.len()].copy_from_slice(leaves);

        let mut layers = Vec::with_capacity(MERKLE_HEIGHT + 1);
        layers.push(padded);
        for _ in 0..MERKLE_HEIGHT {
            let below = layers.last().expect("layers never empty");
            let above: Vec<Field> = below
                .chunks_exact(2)
                .map(|pair| hash_pair(&pair[0], &pair[1]))
                .collect();
            layers.push(above);
        }

        tracing::trace!(target: LOG_TARGET, leaves = leaves.len(), "built commitment tree");
        Self { layers }
    }

    pub fn root(&self) -> Field {
        self.layers[MERKLE_HEIGHT][0]
    }

    pub fn leaf(&self, index: usize) -> Field {
        self.layers[0][index]
    }

    /// Sibling hashes along the leaf-to-root walk, leaf level first.
    pub fn authentication_path(&self, index: usize) -> [Field; MERKLE_HEIGHT] {
        assert!(index < LEAF_COUNT, "leaf index out of range");
        let mut path = [Field::zero(); MERKLE_HEIGHT];
        let mut position = index;
        for (level, sibling) in path.iter_mut().enumerate() {
            *sibling = self.layers[level][position ^ 1];
            position >>= 1;
        }
        path
    }
}

/// Recompute the root from a claimed leaf and path; true iff it reproduces
/// `root`.
pub fn verify_path(root: &Field, leaf: &Field, index: u32, path: &[Field; MERKLE_HEIGHT]) -> bool {
    if (index as usize) >= LEAF_COUNT {
        tracing::warn!(target: LOG_TARGET, index, "leaf index outside the tree");
        return false;
    }
    let mut acc = *leaf;
    let mut position = index as usize;
    for sibling in path {
        acc = if position & 1 == 0 {
            hash_pair(&acc, sibling)
        } else {
            hash_pair(sibling, &acc)
        };
        position >>= 1;
    }
    acc == *root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_leaves() -> Vec<Field> {
        (1..=7u64).map(Field::from).collect()
    }

    #[test]
    fn every_leaf_proves_membership() {
        let tree = MerkleTree::build(&sample_leaves());
        let root = tree.root();
        for index in 0..LEAF_COUNT {
            let path = tree.authentication_path(index);
            assert!(verify_path(&root, &tree.leaf(index), index as u32, &path));
        }
    }

    #[test]
    fn tampered_leaf_or_path_fails() {
        let tree = MerkleTree::build(&sample_leaves());
        let root = tree.root();
        let index = 3u32;
        let path = tree.authentication_path(index as usize);
        let leaf = tree.leaf(index as usize);

        let wrong_leaf = leaf + Field::from(1u64);
        assert!(!verify_path(&root, &wrong_leaf, index, &path));

        for level in 0..MERKLE_HEIGHT {
            let mut wrong_path = path;
            wrong_path[level] += Field::from(1u64);
            assert!(!verify_path(&root, &leaf, index, &wrong_path));
        }

        assert!(!verify_path(&root, &leaf, index + 1, &path));
    }

    #[test]
    fn empty_tree_root_is_the_zero_leaf_root() {
        let empty = MerkleTree::build(&[]);
        let zeros = MerkleTree::build(&vec![Field::zero(); LEAF_COUNT]);
        assert_eq!(empty.root(), zeros.root());
        assert!(!empty.root().is_zero());
    }

    #[test]
    fn roots_differ_per_leaf_position() {
        let mut a = vec![Field::zero(); 4];
        a[0] = Field::from(9u64);
        let mut b = vec![Field::zero(); 4];
        b[1] = Field::from(9u64);
        assert_ne!(MerkleTree::build(&a).root(), MerkleTree::build(&b).root());
    }
}

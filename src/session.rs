//! One matching round, end to end.
//!
//! A [`MatchingSession`] owns the validated inputs and both private seeds
//! and threads them through the full pipeline: rerandomize indices, run
//! deferred acceptance on the blinded instance, unblind the result, encrypt
//! one notification per ciphertext slot and commit the matches into the
//! Merkle tree. The run is straight-line and deterministic; two sessions
//! over identical inputs emit byte-identical outputs.

use crate::commitment::{
    input_commitment, leaf_hash, match_nonce, merkle::LEAF_COUNT, verify_path, MerkleTree,
};
use crate::elgamal::{self, derive_encryption_randomness, ElGamalCiphertext};
use crate::matching::{solve, MatchSet, MatchingError, MatchingInputs};
use crate::params::{Field, MatchCurve, MAX_CAP, MERKLE_HEIGHT, N_C, N_S, TOTAL_CAP, UNMATCHED};
use crate::permutation::Permutation;
use ark_std::Zero;
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "sealed_match::session";

/// The three modes the engine multiplexes over one input record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Solve, encrypt and commit.
    Solve,
    /// Additionally check `merkle_leaf` + `merkle_path` against the root.
    VerifyPath,
    /// Additionally emit the authentication path for `merkle_index`.
    GeneratePath,
}

impl Operation {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Solve),
            1 => Some(Self::VerifyPath),
            2 => Some(Self::GeneratePath),
            _ => None,
        }
    }
}

/// The full input record for one round. Field order mirrors the commitment
/// flattening; the seeds are private witnesses, the commitment is the
/// public binding.
#[derive(Clone, Debug)]
pub struct SolveRequest {
    pub inputs: MatchingInputs,
    pub nonce_seed: Field,
    pub permutation_seed: Field,
    pub input_commitment: Field,
    pub merkle_path: [Field; MERKLE_HEIGHT],
    pub merkle_index: u32,
    pub merkle_leaf: Field,
}

/// Public outputs of a run. `verified` is populated by
/// [`Operation::VerifyPath`], `path` by [`Operation::GeneratePath`].
#[derive(Clone, Debug)]
pub struct SessionOutput {
    pub ciphertexts: [ElGamalCiphertext<MatchCurve>; TOTAL_CAP],
    pub merkle_root: Field,
    pub verified: Option<bool>,
    pub path: Option<[Field; MERKLE_HEIGHT]>,
}

/// What a participant persists to later prove their match to a third party:
/// the three leaf values plus the authentication path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReceipt {
    pub recipient_id: u16,
    pub match_id: u16,
    #[serde(with = "crate::crypto_serde::field")]
    pub nonce: Field,
    pub leaf_index: u32,
    #[serde(with = "crate::crypto_serde::field_vec")]
    pub path: Vec<Field>,
}

impl MatchReceipt {
    /// Check this receipt against a published root.
    pub fn verify(&self, root: &Field) -> bool {
        if self.path.len() != MERKLE_HEIGHT {
            return false;
        }
        let mut path = [Field::zero(); MERKLE_HEIGHT];
        path.copy_from_slice(&self.path);
        let leaf = leaf_hash(self.recipient_id, self.match_id, &self.nonce);
        verify_path(root, &leaf, self.leaf_index, &path)
    }
}

/// One matching round's state, threaded explicitly through every step.
pub struct MatchingSession {
    request: SolveRequest,
}

impl MatchingSession {
    /// Validate the row invariants and the input commitment before anything
    /// runs.
    pub fn new(request: SolveRequest) -> Result<Self, MatchingError> {
        request.inputs.validate()?;

        let recomputed = input_commitment(&request.inputs);
        if recomputed != request.input_commitment {
            tracing::warn!(target: LOG_TARGET, "input commitment mismatch");
            return Err(MatchingError::CommitmentMismatch);
        }

        Ok(Self { request })
    }

    /// Run the round in the requested mode.
    pub fn run(&self, operation: Operation) -> Result<SessionOutput, MatchingError> {
        let matches = self.solve_unblinded();
        let ciphertexts = self.encrypt_matches(&matches)?;
        let tree = self.commit_matches(&matches);
        let merkle_root = tree.root();

        let (verified, path) = match operation {
            Operation::Solve => (None, None),
            Operation::VerifyPath => {
                let ok = verify_path(
                    &merkle_root,
                    &self.request.merkle_leaf,
                    self.request.merkle_index,
                    &self.request.merkle_path,
                );
                if !ok {
                    tracing::warn!(
                        target: LOG_TARGET,
                        index = self.request.merkle_index,
                        "merkle path verification failed"
                    );
                }
                (Some(ok), None)
            }
            Operation::GeneratePath => {
                let index = self.request.merkle_index as usize;
                assert!(index < LEAF_COUNT, "merkle index outside the tree");
                (None, Some(tree.authentication_path(index)))
            }
        };

        tracing::debug!(
            target: LOG_TARGET,
            matched = matches.matched_count(),
            ?operation,
            "round finished"
        );

        Ok(SessionOutput { ciphertexts, merkle_root, verified, path })
    }

    /// Build the receipt a matched student persists alongside the public
    /// root. Returns `None` for unmatched students.
    pub fn student_receipt(&self, student: usize) -> Option<MatchReceipt> {
        assert!(student < N_S, "student index out of range");
        let matches = self.solve_unblinded();
        let college = matches.student_match[student];
        if college == UNMATCHED {
            return None;
        }
        let tree = self.commit_matches(&matches);
        Some(MatchReceipt {
            recipient_id: student as u16,
            match_id: college,
            nonce: match_nonce(student as u16, college, &self.request.nonce_seed),
            leaf_index: student as u32,
            path: tree.authentication_path(student).to_vec(),
        })
    }

    /// Rerandomize both populations, solve the blinded instance, then map
    /// the assignment back to real identities.
    pub(crate) fn solve_unblinded(&self) -> MatchSet {
        let inputs = &self.request.inputs;
        let n_students = inputs.actual_student_list as usize;
        let n_colleges = inputs.actual_uni_list as usize;

        let (pi_s, pi_c) = Permutation::derive_populations(
            &self.request.permutation_seed,
            (n_students, N_S),
            (n_colleges, N_C),
        );

        let blinded_inputs = MatchingInputs {
            student_prefs: Permutation::apply_prefs(&inputs.student_prefs, &pi_s, &pi_c),
            college_prefs: Permutation::apply_prefs(&inputs.college_prefs, &pi_c, &pi_s),
            college_capacities: pi_c.apply_slots(&inputs.college_capacities),
            student_pubkeys: pi_s.apply_slots(&inputs.student_pubkeys),
            college_pubkeys: pi_c.apply_slots(&inputs.college_pubkeys),
            actual_student_list: inputs.actual_student_list,
            actual_uni_list: inputs.actual_uni_list,
        };

        let blinded = solve(&blinded_inputs);

        let inv_s = pi_s.inverse();
        let inv_c = pi_c.inverse();
        let mut unblinded = MatchSet::unmatched();
        for s in 0..N_S {
            unblinded.student_match[s] = inv_c.map_id(blinded.student_match[pi_s.index(s)]);
        }
        for c in 0..N_C {
            let blinded_row = &blinded.college_assigned[pi_c.index(c)];
            for k in 0..MAX_CAP {
                unblinded.college_assigned[c][k] = inv_s.map_id(blinded_row[k]);
            }
        }
        unblinded
    }

    /// One ciphertext per slot, students first, then each college's seat
    /// block. Plaintexts carry the `+1` offset; recipients without a key
    /// get the padding ciphertext.
    fn encrypt_matches(
        &self,
        matches: &MatchSet,
    ) -> Result<[ElGamalCiphertext<MatchCurve>; TOTAL_CAP], MatchingError> {
        let inputs = &self.request.inputs;
        let mut out = Vec::with_capacity(TOTAL_CAP);

        for s in 0..N_S {
            out.push(self.encrypt_slot(
                inputs.student_pubkeys[s],
                s as u16,
                matches.student_match[s],
                s,
            )?);
        }
        for c in 0..N_C {
            for k in 0..MAX_CAP {
                let slot = N_S + c * MAX_CAP + k;
                out.push(self.encrypt_slot(
                    inputs.college_pubkeys[c],
                    c as u16,
                    matches.college_assigned[c][k],
                    slot,
                )?);
            }
        }

        out.try_into()
            .map_err(|_| unreachable!("slot layout emits exactly TOTAL_CAP ciphertexts"))
    }

    fn encrypt_slot(
        &self,
        public_key: MatchCurve,
        recipient_id: u16,
        match_id: u16,
        slot: usize,
    ) -> Result<ElGamalCiphertext<MatchCurve>, MatchingError> {
        if public_key.is_zero() {
            return Ok(ElGamalCiphertext::padding());
        }
        let msg = match_id as u64 + 1;
        let randomness = derive_encryption_randomness(
            msg,
            &public_key,
            recipient_id,
            slot,
            &self.request.nonce_seed,
        );
        Ok(elgamal::encrypt(public_key, msg, randomness)?)
    }

    /// Leaves sit at their ciphertext slot index; only real matches commit,
    /// everything else stays the zero leaf.
    fn commit_matches(&self, matches: &MatchSet) -> MerkleTree {
        let nonce_seed = &self.request.nonce_seed;
        let mut leaves = vec![Field::zero(); TOTAL_CAP];

        for s in 0..N_S {
            let college = matches.student_match[s];
            if college != UNMATCHED {
                let nonce = match_nonce(s as u16, college, nonce_seed);
                leaves[s] = leaf_hash(s as u16, college, &nonce);
            }
        }
        for c in 0..N_C {
            for k in 0..MAX_CAP {
                let student = matches.college_assigned[c][k];
                if student != UNMATCHED {
                    let nonce = match_nonce(student, c as u16, nonce_seed);
                    leaves[N_S + c * MAX_CAP + k] = leaf_hash(c as u16, student, &nonce);
                }
            }
        }

        MerkleTree::build(&leaves)
    }
}

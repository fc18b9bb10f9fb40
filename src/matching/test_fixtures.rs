//! Shared deterministic scenarios for solver, commitment and session tests.

use super::data_structures::MatchingInputs;
use crate::elgamal::ElGamalKeys;
use crate::params::{MatchCurve, Scalar, MAX_PREFS, N_C, N_S, UNMATCHED};
use ark_std::Zero;

/// Fixed student keypairs; index `i` uses secret `100 + i`.
pub fn student_keys() -> [ElGamalKeys<MatchCurve>; N_S] {
    std::array::from_fn(|i| ElGamalKeys::new(Scalar::from(100 + i as u64)))
}

/// Fixed college keypairs; index `c` uses secret `200 + c`.
pub fn college_keys() -> [ElGamalKeys<MatchCurve>; N_C] {
    std::array::from_fn(|c| ElGamalKeys::new(Scalar::from(200 + c as u64)))
}

/// Five students, three live colleges, capacities 3/1/1.
pub fn scenario_e1() -> MatchingInputs {
    let students = student_keys();
    let colleges = college_keys();

    let mut college_pubkeys = [MatchCurve::zero(); N_C];
    for c in 0..3 {
        college_pubkeys[c] = colleges[c].public_key;
    }

    MatchingInputs {
        student_prefs: [
            [0, 1, 2, UNMATCHED, UNMATCHED],
            [1, 0, 2, UNMATCHED, UNMATCHED],
            [1, 2, 0, UNMATCHED, UNMATCHED],
            [0, 2, 1, UNMATCHED, UNMATCHED],
            [2, 0, 1, UNMATCHED, UNMATCHED],
        ],
        college_prefs: [
            [1, 3, 0, 2, 4],
            [2, 0, 4, 1, 3],
            [0, 2, 3, 4, 1],
            [UNMATCHED; N_S],
            [UNMATCHED; N_S],
        ],
        college_capacities: [3, 1, 1, 0, 0],
        student_pubkeys: std::array::from_fn(|i| students[i].public_key),
        college_pubkeys,
        actual_student_list: 5,
        actual_uni_list: 3,
    }
}

/// One student, one college, mutual first choice.
pub fn scenario_e2() -> MatchingInputs {
    let students = student_keys();
    let colleges = college_keys();

    let mut student_pubkeys = [MatchCurve::zero(); N_S];
    student_pubkeys[0] = students[0].public_key;
    let mut college_pubkeys = [MatchCurve::zero(); N_C];
    college_pubkeys[0] = colleges[0].public_key;

    let mut student_prefs = [[UNMATCHED; MAX_PREFS]; N_S];
    student_prefs[0][0] = 0;
    let mut college_prefs = [[UNMATCHED; N_S]; N_C];
    college_prefs[0][0] = 0;

    MatchingInputs {
        student_prefs,
        college_prefs,
        college_capacities: [1, 0, 0, 0, 0],
        student_pubkeys,
        college_pubkeys,
        actual_student_list: 1,
        actual_uni_list: 1,
    }
}

/// Empty round: no live participants, every key at infinity except the
/// students, who still expect their sentinel notification.
pub fn scenario_e3() -> MatchingInputs {
    let students = student_keys();
    let colleges = college_keys();

    MatchingInputs {
        student_prefs: [[UNMATCHED; MAX_PREFS]; N_S],
        college_prefs: [[UNMATCHED; N_S]; N_C],
        college_capacities: [0; N_C],
        student_pubkeys: std::array::from_fn(|i| students[i].public_key),
        college_pubkeys: std::array::from_fn(|c| colleges[c].public_key),
        actual_student_list: 0,
        actual_uni_list: 0,
    }
}

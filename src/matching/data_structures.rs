use super::error::MatchingError;
use crate::params::{MatchCurve, MAX_CAP, MAX_PREFS, N_C, N_S, UNMATCHED};

/// One round's worth of matching inputs, with fixed array bounds and
/// sentinel-padded inactive slots.
#[derive(Clone, Debug)]
pub struct MatchingInputs {
    /// Ordered college preferences per student, most preferred first,
    /// `UNMATCHED`-padded.
    pub student_prefs: [[u16; MAX_PREFS]; N_S],
    /// Ordered student preferences per college, most preferred first,
    /// `UNMATCHED`-padded.
    pub college_prefs: [[u16; N_S]; N_C],
    pub college_capacities: [u8; N_C],
    pub student_pubkeys: [MatchCurve; N_S],
    pub college_pubkeys: [MatchCurve; N_C],
    /// Number of live student rows; rows beyond are all-`UNMATCHED`.
    pub actual_student_list: u8,
    /// Number of live college rows; rows beyond are all-`UNMATCHED` with
    /// capacity zero.
    pub actual_uni_list: u8,
}

impl MatchingInputs {
    /// Enforce the row invariants: each live preference row is a prefix of
    /// pairwise-distinct in-range indices followed by sentinel padding,
    /// dead rows are fully padded, capacities stay within bounds.
    pub fn validate(&self) -> Result<(), MatchingError> {
        let n_students = self.actual_student_list as usize;
        let n_colleges = self.actual_uni_list as usize;

        if n_students > N_S {
            return Err(MatchingError::InvalidInput(format!(
                "actual_student_list {n_students} exceeds N_S {N_S}"
            )));
        }
        if n_colleges > N_C {
            return Err(MatchingError::InvalidInput(format!(
                "actual_uni_list {n_colleges} exceeds N_C {N_C}"
            )));
        }

        for (i, row) in self.student_prefs.iter().enumerate() {
            validate_row(row, i, "student_prefs", i < n_students, N_C)?;
        }
        for (c, row) in self.college_prefs.iter().enumerate() {
            validate_row(row, c, "college_prefs", c < n_colleges, N_S)?;
        }

        for (c, &capacity) in self.college_capacities.iter().enumerate() {
            if capacity as usize > MAX_CAP {
                return Err(MatchingError::InvalidInput(format!(
                    "college {c} capacity {capacity} exceeds MAX_CAP {MAX_CAP}"
                )));
            }
            if c >= n_colleges && capacity != 0 {
                return Err(MatchingError::InvalidInput(format!(
                    "inactive college {c} has nonzero capacity {capacity}"
                )));
            }
        }

        Ok(())
    }
}

fn validate_row(
    row: &[u16],
    index: usize,
    table: &str,
    live: bool,
    id_bound: usize,
) -> Result<(), MatchingError> {
    let mut seen = vec![false; id_bound];
    let mut padded = false;
    for &entry in row {
        if entry == UNMATCHED {
            padded = true;
            continue;
        }
        if !live {
            return Err(MatchingError::InvalidInput(format!(
                "{table} row {index} is inactive but carries entry {entry}"
            )));
        }
        if padded {
            return Err(MatchingError::InvalidInput(format!(
                "{table} row {index} has entry {entry} after sentinel padding"
            )));
        }
        if (entry as usize) >= id_bound {
            return Err(MatchingError::InvalidInput(format!(
                "{table} row {index} entry {entry} out of range"
            )));
        }
        if seen[entry as usize] {
            return Err(MatchingError::InvalidInput(format!(
                "{table} row {index} repeats entry {entry}"
            )));
        }
        seen[entry as usize] = true;
    }
    Ok(())
}

/// The solver's output: one college per student and a fixed-capacity bag of
/// students per college, sentinel-padded on both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSet {
    pub student_match: [u16; N_S],
    pub college_assigned: [[u16; MAX_CAP]; N_C],
}

impl MatchSet {
    pub fn unmatched() -> Self {
        Self {
            student_match: [UNMATCHED; N_S],
            college_assigned: [[UNMATCHED; MAX_CAP]; N_C],
        }
    }

    /// Number of real student-college pairs.
    pub fn matched_count(&self) -> usize {
        self.student_match
            .iter()
            .filter(|&&c| c != UNMATCHED)
            .count()
    }
}

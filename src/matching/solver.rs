//! College-proposing deferred acceptance with capacities.
//!
//! Colleges walk their preference lists in order, offering seats while they
//! have free slots; students hold the best offer seen so far and trade up,
//! releasing their previous seat. Every (college, student) pair is proposed
//! at most once, so the run is bounded by `N_C * N_S` proposals. The
//! resulting matching is the college-optimal stable one, which is also why
//! solving a permuted instance and unpermuting afterwards gives the same
//! assignment as solving in the clear.

use super::data_structures::{MatchSet, MatchingInputs};
use crate::params::{MAX_CAP, MAX_PREFS, N_C, N_S, UNMATCHED};

const LOG_TARGET: &str = "sealed_match::matching::solver";

/// Run deferred acceptance over validated inputs.
///
/// Inputs violating the §3-style row invariants are design bugs by the time
/// they reach the solver; those trip explicit assertions rather than
/// returning errors.
pub fn solve(inputs: &MatchingInputs) -> MatchSet {
    let n_students = inputs.actual_student_list as usize;
    let n_colleges = inputs.actual_uni_list as usize;

    // rank[s][c] = position of c in s's list, None when s finds c
    // unacceptable.
    let mut rank = [[None::<usize>; N_C]; N_S];
    for s in 0..n_students {
        for (position, &c) in inputs.student_prefs[s].iter().take(MAX_PREFS).enumerate() {
            if c != UNMATCHED {
                rank[s][c as usize] = Some(position);
            }
        }
    }

    let mut out = MatchSet::unmatched();
    let mut next_offer = [0usize; N_C];
    let mut proposals = 0usize;

    loop {
        let mut progressed = false;

        for c in 0..n_colleges {
            let capacity = inputs.college_capacities[c] as usize;

            while next_offer[c] < n_students && first_free(&out.college_assigned[c], capacity).is_some() {
                let offer = inputs.college_prefs[c][next_offer[c]];
                next_offer[c] += 1;
                proposals += 1;
                assert!(proposals <= N_C * N_S, "proposal budget exceeded");
                progressed = true;

                if offer == UNMATCHED || (offer as usize) >= n_students {
                    continue;
                }
                let s = offer as usize;

                let Some(offer_rank) = rank[s][c] else {
                    // s never listed c.
                    continue;
                };

                let current = out.student_match[s];
                let accept = match current {
                    UNMATCHED => true,
                    held => {
                        let held_rank = rank[s][held as usize]
                            .expect("held match must appear in the student's list");
                        offer_rank < held_rank
                    }
                };
                if !accept {
                    continue;
                }

                if current != UNMATCHED {
                    release_seat(&mut out.college_assigned[current as usize], s as u16);
                    tracing::debug!(
                        target: LOG_TARGET,
                        student = s,
                        from = current,
                        to = c,
                        "student traded up"
                    );
                }

                let slot = first_free(&out.college_assigned[c], capacity)
                    .expect("loop condition guarantees a free slot");
                out.college_assigned[c][slot] = s as u16;
                out.student_match[s] = c as u16;
            }
        }

        if !progressed {
            break;
        }
    }

    tracing::debug!(
        target: LOG_TARGET,
        proposals,
        matched = out.matched_count(),
        "deferred acceptance finished"
    );
    out
}

fn first_free(assigned: &[u16; MAX_CAP], capacity: usize) -> Option<usize> {
    assert!(capacity <= MAX_CAP, "capacity exceeds slot bound");
    (0..capacity).find(|&k| assigned[k] == UNMATCHED)
}

fn release_seat(assigned: &mut [u16; MAX_CAP], student: u16) {
    let slot = assigned
        .iter()
        .position(|&held| held == student)
        .expect("released student must hold a seat");
    assigned[slot] = UNMATCHED;
}

//! Disproportionality metrics and allocation comparison.

use std::collections::BTreeSet;

use gime_core::{Allocation, PartyId, VoteTally};

/// Gallagher (least squares) disproportionality index.
///
/// Over the union of parties in either input: vote-share and seat-share
/// percentages (each against its own total; a zero total contributes a 0
/// share for that side), `sqrt(Σ(v% − s%)² / 2)`. 0 means perfect
/// proportionality.
pub fn gallagher_index(votes: &VoteTally, allocation: &Allocation) -> f64 {
    let total_votes = votes.total() as f64;
    let total_seats = allocation.total() as f64;

    let mut parties: BTreeSet<&PartyId> = votes.parties().collect();
    parties.extend(allocation.parties());

    let mut sum_squares = 0.0f64;
    for party in parties {
        let vote_share = if total_votes > 0.0 {
            votes.get(party) as f64 / total_votes * 100.0
        } else {
            0.0
        };
        let seat_share = if total_seats > 0.0 {
            f64::from(allocation.get(party)) / total_seats * 100.0
        } else {
            0.0
        };
        let gap = vote_share - seat_share;
        sum_squares += gap * gap;
    }

    (sum_squares / 2.0).sqrt()
}

/// One row of a pairwise allocation comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationDiff {
    pub party: PartyId,
    pub seats_a: u32,
    pub seats_b: u32,
    /// `seats_b - seats_a`.
    pub diff: i64,
}

/// Pairwise diff over the union of parties in `a` and `b`, sorted by
/// descending |diff|; equal |diff| rows keep lexicographic party order
/// (stable sort over the lexicographic union).
pub fn compare(a: &Allocation, b: &Allocation) -> Vec<AllocationDiff> {
    let mut parties: BTreeSet<&PartyId> = a.parties().collect();
    parties.extend(b.parties());

    let mut rows: Vec<AllocationDiff> = parties
        .into_iter()
        .map(|party| {
            let seats_a = a.get(party);
            let seats_b = b.get(party);
            AllocationDiff {
                party: party.clone(),
                seats_a,
                seats_b,
                diff: i64::from(seats_b) - i64::from(seats_a),
            }
        })
        .collect();

    rows.sort_by_key(|row| core::cmp::Reverse(row.diff.abs()));
    rows
}

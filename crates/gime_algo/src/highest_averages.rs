//! D'Hondt (highest averages) allocation over one pool of votes.
//!
//! Contract:
//! - Entry threshold is a vote-share fraction in `[0, 1]`, applied to the
//!   pool's own total; a share exactly equal to the threshold is admitted.
//! - Seats are awarded sequentially to the max of `v / (s + 1)`; comparisons
//!   cross-multiply in u128, no float compares.
//! - Ties: lexicographically first party wins (scan order is `BTreeMap`
//!   order; only a strictly greater quotient displaces the current best).
//! - Zero eligible parties (all below threshold, or an empty/zero tally) is
//!   a valid degenerate outcome: an empty allocation, the seats lost. The
//!   caller sees it through the allocation total, not through an error.
//!
//! The float `quotient` in each trace entry is presentation-only; the award
//! decisions never consult it.

use gime_core::{Allocation, PartyId, VoteTally};

/// One awarded seat: which party won it and with what quotient.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotientEntry {
    pub party: PartyId,
    pub quotient: f64,
    /// 1-based index of the awarded seat within this pool.
    pub seat_index: u32,
}

/// Allocation plus the ordered award trace.
#[derive(Clone, Debug, PartialEq)]
pub struct DivisorOutcome {
    pub allocation: Allocation,
    pub quotient_trace: Vec<QuotientEntry>,
}

/// Allocate `seats` among the parties of `votes` by D'Hondt.
pub fn allocate(votes: &VoteTally, seats: u32, threshold: f64) -> DivisorOutcome {
    let total = votes.total();
    let eligible = eligible_parties(votes, total, threshold);

    let mut allocation = Allocation::new();
    let mut quotient_trace = Vec::new();

    if seats == 0 || eligible.is_empty() {
        return DivisorOutcome {
            allocation,
            quotient_trace,
        };
    }

    // Seed eligible parties at zero seats so the scan order is fixed up front.
    for (party, _) in &eligible {
        allocation.set(party.clone(), 0);
    }

    for seat_index in 1..=seats {
        // Argmax of v/(s+1); strictly-greater-only keeps the first max.
        let mut best: Option<(&PartyId, u64, u32)> = None;
        for (party, v) in &eligible {
            let assigned = allocation.get(party);
            match best {
                None => best = Some((party, *v, assigned)),
                Some((_, b_v, b_s)) => {
                    if cmp_quotients(*v, assigned, b_v, b_s) == core::cmp::Ordering::Greater {
                        best = Some((party, *v, assigned));
                    }
                }
            }
        }

        let (winner, v, s) = best.expect("eligible is non-empty");
        let winner = winner.clone();
        quotient_trace.push(QuotientEntry {
            party: winner.clone(),
            quotient: v as f64 / f64::from(s + 1),
            seat_index,
        });
        allocation.award(&winner);
    }

    DivisorOutcome {
        allocation,
        quotient_trace,
    }
}

/// Parties at or above the threshold share, in lexicographic order.
/// A zero-vote pool has no eligible parties (no defined shares).
fn eligible_parties(votes: &VoteTally, total: u128, threshold: f64) -> Vec<(PartyId, u64)> {
    if total == 0 {
        return Vec::new();
    }
    votes
        .iter()
        .filter(|(_, &v)| v as f64 / total as f64 >= threshold)
        .map(|(p, &v)| (p.clone(), v))
        .collect()
}

/// Compare D'Hondt quotients `v_a/(s_a+1)` vs `v_b/(s_b+1)` without floats.
fn cmp_quotients(v_a: u64, s_a: u32, v_b: u64, s_b: u32) -> core::cmp::Ordering {
    let lhs = u128::from(v_a) * (u128::from(s_b) + 1);
    let rhs = u128::from(v_b) * (u128::from(s_a) + 1);
    lhs.cmp(&rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn p(s: &str) -> PartyId {
        PartyId::from_str(s).unwrap()
    }

    fn tally(pairs: &[(&str, u64)]) -> VoteTally {
        VoteTally::from_pairs(pairs.iter().map(|(k, v)| (p(k), *v))).unwrap()
    }

    #[test]
    fn classic_four_party_example() {
        // A:100000 B:80000 C:30000 D:20000, 8 seats, no threshold.
        let votes = tally(&[("A", 100_000), ("B", 80_000), ("C", 30_000), ("D", 20_000)]);
        let out = allocate(&votes, 8, 0.0);
        assert_eq!(out.allocation.get(&p("A")), 4);
        assert_eq!(out.allocation.get(&p("B")), 3);
        assert_eq!(out.allocation.get(&p("C")), 1);
        assert_eq!(out.allocation.get(&p("D")), 0);
        assert_eq!(out.allocation.total(), 8);
        assert_eq!(out.quotient_trace.len(), 8);
        // First seat goes to the largest raw count.
        assert_eq!(out.quotient_trace[0].party, p("A"));
        assert_eq!(out.quotient_trace[0].seat_index, 1);
    }

    #[test]
    fn zero_seats_yields_empty_allocation() {
        let votes = tally(&[("A", 100), ("B", 50)]);
        let out = allocate(&votes, 0, 0.0);
        assert!(out.allocation.is_empty());
        assert!(out.quotient_trace.is_empty());
    }

    #[test]
    fn all_below_threshold_yields_empty_allocation() {
        let votes = tally(&[("A", 10), ("B", 20)]);
        let out = allocate(&votes, 5, 0.9);
        assert_eq!(out.allocation.total(), 0);
        assert!(out.quotient_trace.is_empty());
    }

    #[test]
    fn share_exactly_at_threshold_is_admitted() {
        // B holds exactly 3% of 100 votes.
        let votes = tally(&[("A", 97), ("B", 3)]);
        let out = allocate(&votes, 10, 0.03);
        // B is eligible: it appears among the seeded parties even at 0 seats.
        assert_eq!(out.allocation.total(), 10);
        assert!(out.allocation.parties().any(|q| q == &p("B")));
    }

    #[test]
    fn strictly_below_threshold_is_excluded() {
        let votes = tally(&[("A", 971), ("B", 29)]);
        let out = allocate(&votes, 10, 0.03);
        assert_eq!(out.allocation.get(&p("B")), 0);
        assert!(!out.allocation.parties().any(|q| q == &p("B")));
        assert_eq!(out.allocation.get(&p("A")), 10);
    }

    #[test]
    fn single_eligible_party_takes_all_seats() {
        let votes = tally(&[("A", 500), ("B", 1)]);
        let out = allocate(&votes, 7, 0.10);
        assert_eq!(out.allocation.get(&p("A")), 7);
        assert_eq!(out.allocation.total(), 7);
    }

    #[test]
    fn exact_tie_goes_to_lexicographically_first() {
        let votes = tally(&[("B", 100), ("A", 100)]);
        let out = allocate(&votes, 1, 0.0);
        assert_eq!(out.allocation.get(&p("A")), 1);
        assert_eq!(out.allocation.get(&p("B")), 0);
    }

    #[test]
    fn empty_tally_allocates_nothing() {
        let out = allocate(&VoteTally::new(), 4, 0.0);
        assert!(out.allocation.is_empty());
    }
}

//! AGGREGATE stage: national vote totals and the traditional
//! district-by-district divisor method.
//!
//! Each district is allocated independently with its own vote pool and seat
//! count; the threshold applies per district, so a party can clear it in one
//! district and miss it in another. Districts are processed in input order
//! and summed into a national allocation (summation order is irrelevant —
//! integer addition commutes).

use gime_algo::highest_averages::{self, DivisorOutcome};
use gime_core::{Allocation, District, DistrictId, VoteTally};

/// One district's independent D'Hondt outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct DistrictCount {
    pub district: DistrictId,
    pub seats: u32,
    pub outcome: DivisorOutcome,
}

/// Per-district outcomes plus the summed national allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct ByDistrictOutcome {
    pub per_district: Vec<DistrictCount>,
    pub national: Allocation,
}

/// Sum every district's tally into national vote totals.
pub fn national_votes(districts: &[District]) -> VoteTally {
    let mut national = VoteTally::new();
    for district in districts {
        national.merge(district.votes());
    }
    national
}

/// Apply D'Hondt independently to every district and sum the results.
pub fn allocate_by_district(districts: &[District], threshold: f64) -> ByDistrictOutcome {
    let mut per_district = Vec::with_capacity(districts.len());
    let mut national = Allocation::new();

    for district in districts {
        let outcome = highest_averages::allocate(district.votes(), district.seats(), threshold);
        national.accumulate(&outcome.allocation);
        per_district.push(DistrictCount {
            district: district.name().clone(),
            seats: district.seats(),
            outcome,
        });
    }

    ByDistrictOutcome {
        per_district,
        national,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use gime_core::PartyId;

    fn p(s: &str) -> PartyId {
        PartyId::from_str(s).unwrap()
    }

    fn district(name: &str, seats: u32, votes: &[(&str, u64)]) -> District {
        District::new(
            DistrictId::from_str(name).unwrap(),
            seats,
            VoteTally::from_pairs(votes.iter().map(|(k, v)| (p(k), *v))).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn national_votes_sums_across_districts() {
        let districts = [
            district("A", 4, &[("X", 1000), ("Y", 600)]),
            district("B", 3, &[("X", 500), ("Z", 200)]),
        ];
        let national = national_votes(&districts);
        assert_eq!(national.get(&p("X")), 1500);
        assert_eq!(national.get(&p("Y")), 600);
        assert_eq!(national.get(&p("Z")), 200);
    }

    #[test]
    fn national_total_equals_sum_of_district_seats() {
        let districts = [
            district("A", 4, &[("X", 1000), ("Y", 600), ("Z", 300)]),
            district("B", 3, &[("X", 500), ("Y", 900), ("Z", 200)]),
            district("C", 6, &[("X", 10), ("Y", 20), ("Z", 30)]),
        ];
        let out = allocate_by_district(&districts, 0.0);
        assert_eq!(out.national.total(), 4 + 3 + 6);
        assert_eq!(out.per_district.len(), 3);
    }

    #[test]
    fn hand_computed_two_district_example() {
        // District A, 4 seats {X:1000 Y:600 Z:300}:
        //   1000(X) 600(Y) 500(X) 333(X) → X3 Y1 Z0
        // District B, 3 seats {X:500 Y:900 Z:200}:
        //   900(Y) 500(X) 450(Y) → X1 Y2 Z0
        let districts = [
            district("A", 4, &[("X", 1000), ("Y", 600), ("Z", 300)]),
            district("B", 3, &[("X", 500), ("Y", 900), ("Z", 200)]),
        ];
        let out = allocate_by_district(&districts, 0.0);

        let a = &out.per_district[0].outcome.allocation;
        assert_eq!((a.get(&p("X")), a.get(&p("Y")), a.get(&p("Z"))), (3, 1, 0));
        let b = &out.per_district[1].outcome.allocation;
        assert_eq!((b.get(&p("X")), b.get(&p("Y")), b.get(&p("Z"))), (1, 2, 0));

        assert_eq!(out.national.get(&p("X")), 4);
        assert_eq!(out.national.get(&p("Y")), 3);
        assert_eq!(out.national.get(&p("Z")), 0);
    }

    #[test]
    fn threshold_applies_per_district_not_nationally() {
        // Y holds 25% in A but only 2% in B: eligible in A, excluded in B.
        let districts = [
            district("A", 2, &[("X", 750), ("Y", 250)]),
            district("B", 2, &[("X", 980), ("Y", 20)]),
        ];
        let out = allocate_by_district(&districts, 0.10);
        let a = &out.per_district[0].outcome.allocation;
        assert!(a.parties().any(|q| q == &p("Y")), "Y eligible in A");
        let b = &out.per_district[1].outcome.allocation;
        assert!(!b.parties().any(|q| q == &p("Y")), "Y excluded in B");
    }
}

//! gime_pipeline — deterministic pipeline surface for the two competing
//! apportionment methods:
//!
//! - the traditional district-by-district divisor method
//!   (`aggregate::allocate_by_district`), and
//! - the national biproportional "GIME" sequence (`run_gime`): national
//!   D'Hondt target → biproportional district distribution → optional
//!   governability bonus.
//!
//! This crate stays I/O-free and delegates math to `gime_algo`. Stage
//! results are produced in fixed order and never mutated after creation.

#![forbid(unsafe_code)]

use gime_core::{Allocation, District, StageResult};

pub mod aggregate;
pub mod scenario;

pub use aggregate::{allocate_by_district, national_votes, ByDistrictOutcome, DistrictCount};
pub use scenario::apply_multipliers;

/// Iteration budget for the biproportional solver (reference behavior).
pub const MAX_SOLVER_ITERATIONS: u32 = 100;

/// Run the full GIME sequence over `districts`.
///
/// - Stage 1: D'Hondt over the aggregated national votes for `total_seats`.
/// - Stage 2: biproportional distribution of the stage-1 targets across
///   districts, carrying the solver's iteration count. The stage's national
///   allocation is the stage-1 target itself (the matrix is seeded from it),
///   which is what makes the method non-regressive between stages.
/// - Stage 3: only when `bonus_seats > 0`, the governability adjustment of
///   the stage-2 national allocation, naming the winner in the label.
pub fn run_gime(
    districts: &[District],
    total_seats: u32,
    bonus_seats: u32,
    threshold: f64,
) -> Vec<StageResult> {
    let national = national_votes(districts);

    let stage1 = gime_algo::highest_averages::allocate(&national, total_seats, threshold);
    let mut stages = vec![StageResult {
        stage: 1,
        description: "national proportional allocation: seats assigned by D'Hondt over national vote totals".into(),
        national: stage1.allocation.clone(),
        district_allocations: None,
        iterations: None,
    }];

    let solved = gime_algo::biproportional::solve(
        districts,
        &stage1.allocation,
        MAX_SOLVER_ITERATIONS,
    );
    let district_allocations = solved.matrix.district_allocations();
    stages.push(StageResult {
        stage: 2,
        description: "biproportional district distribution: iterative fit satisfying party and district totals".into(),
        national: stage1.allocation.clone(),
        district_allocations: Some(district_allocations.clone()),
        iterations: Some(solved.iterations),
    });

    if bonus_seats > 0 {
        let bonus = gime_algo::governability::apply_bonus(&stage1.allocation, bonus_seats);
        let winner = bonus
            .winner
            .as_ref()
            .map(|w| w.to_string())
            .unwrap_or_else(|| "none".into());
        stages.push(StageResult {
            stage: 3,
            description: format!(
                "governability adjustment: +{bonus_seats} seats to the winning party ({winner})"
            ),
            national: bonus.allocation,
            district_allocations: Some(district_allocations),
            iterations: None,
        });
    }

    stages
}

/// The national allocation of the last stage (the pipeline's final answer).
pub fn final_allocation(stages: &[StageResult]) -> Option<&Allocation> {
    stages.last().map(|s| &s.national)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use gime_core::{DistrictId, PartyId, VoteTally};

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

    fn two_districts() -> Vec<District> {
        vec![
            district("A", 4, &[("X", 1000), ("Y", 600), ("Z", 300)]),
            district("B", 3, &[("X", 500), ("Y", 900), ("Z", 200)]),
        ]
    }

    #[test]
    fn stages_without_bonus_are_exactly_two() {
        let stages = run_gime(&two_districts(), 7, 0, 0.0);
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].stage, 1);
        assert_eq!(stages[1].stage, 2);
        assert!(stages[1].iterations.is_some());
        assert!(stages[1].district_allocations.is_some());
    }

    #[test]
    fn bonus_appends_a_labeled_third_stage() {
        let stages = run_gime(&two_districts(), 7, 2, 0.0);
        assert_eq!(stages.len(), 3);
        let s3 = &stages[2];
        assert_eq!(s3.stage, 3);
        // National D'Hondt over X:1500 Y:1500 Z:500 gives X the tie-broken lead.
        assert!(s3.description.contains("+2 seats"));
        assert!(s3.description.contains('X'));
    }

    #[test]
    fn stage2_national_equals_stage1_target() {
        // Seeding property: stage 2 reports the stage-1 totals unchanged.
        let stages = run_gime(&two_districts(), 7, 0, 0.0);
        assert_eq!(stages[0].national, stages[1].national);
    }

    #[test]
    fn final_allocation_is_last_stage() {
        let stages = run_gime(&two_districts(), 7, 1, 0.0);
        assert_eq!(final_allocation(&stages), Some(&stages[2].national));
    }
}

//! Biproportional seat distribution by iterative alternating scaling.
//!
//! Given per-district votes and a national seat target per party, the solver
//! searches for an integer matrix whose row sums equal each district's seat
//! count and whose column sums equal each party's national target. It keeps
//! one multiplier per party and one per district, refills every cell as
//!
//! ```text
//! round((v_dp / v_d) * seats_d * m_party * m_district)
//! ```
//!
//! (round half away from zero, `f64::round`), then rescales each multiplier
//! by `target / current` wherever the current marginal misses its target and
//! is nonzero. Cells with zero votes stay at 0 regardless of multipliers.
//!
//! Because every cell is rounded on every pass, exact convergence to both
//! marginals at once is not guaranteed; the loop is best effort and stops
//! either when no multiplier needed rescaling or at `max_iterations`,
//! returning the last matrix either way. A marginal whose current sum is
//! exactly zero is never rescaled — a party can stay stranded at 0 seats
//! even with a positive target, and the loop will still terminate. The
//! reported `converged` flag is computed from the final matrix itself
//! (all row and column sums exactly on target), so a stalled fixed point
//! reports `false` even though the loop stopped early.

use gime_core::{Allocation, District, DistrictAllocation, DistrictId, PartyId};

/// Integer seat matrix over the participating parties (positive national
/// target only) and the supplied districts, in input district order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatMatrix {
    parties: Vec<PartyId>,
    districts: Vec<DistrictId>,
    district_seats: Vec<u32>,
    /// District-major: `cells[d][p]`.
    cells: Vec<Vec<u32>>,
}

impl SeatMatrix {
    /// Participating parties, lexicographic.
    pub fn parties(&self) -> &[PartyId] {
        &self.parties
    }

    pub fn districts(&self) -> &[DistrictId] {
        &self.districts
    }

    pub fn cell(&self, district_idx: usize, party_idx: usize) -> u32 {
        self.cells[district_idx][party_idx]
    }

    /// Row sum: seats assigned within one district.
    pub fn row_sum(&self, district_idx: usize) -> u64 {
        self.cells[district_idx]
            .iter()
            .fold(0u64, |acc, &v| acc + u64::from(v))
    }

    /// Column sums: the matrix's national allocation per party.
    pub fn column_sums(&self) -> Allocation {
        let mut out = Allocation::new();
        for (p_idx, party) in self.parties.iter().enumerate() {
            let sum = self
                .cells
                .iter()
                .fold(0u32, |acc, row| acc.saturating_add(row[p_idx]));
            out.set(party.clone(), sum);
        }
        out
    }

    /// Per-district allocations with zero cells dropped (presentation shape).
    pub fn district_allocations(&self) -> Vec<DistrictAllocation> {
        self.districts
            .iter()
            .enumerate()
            .map(|(d_idx, district)| {
                let allocation = self
                    .parties
                    .iter()
                    .enumerate()
                    .filter(|(p_idx, _)| self.cells[d_idx][*p_idx] > 0)
                    .map(|(p_idx, party)| (party.clone(), self.cells[d_idx][p_idx]))
                    .collect();
                DistrictAllocation {
                    district: district.clone(),
                    seats: self.district_seats[d_idx],
                    allocation,
                }
            })
            .collect()
    }
}

/// Solver result: last matrix, iterations spent, and whether both marginals
/// landed exactly on target.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    pub matrix: SeatMatrix,
    pub iterations: u32,
    pub converged: bool,
}

/// Fit a seat matrix to `districts` rows and `national_target` columns.
///
/// Only parties with a positive national target participate; everything else
/// is fixed at zero and excluded from the matrix. Never errors: after
/// `max_iterations` the last matrix is returned as-is.
pub fn solve(
    districts: &[District],
    national_target: &Allocation,
    max_iterations: u32,
) -> SolveOutcome {
    let parties: Vec<PartyId> = national_target
        .iter()
        .filter(|(_, &seats)| seats > 0)
        .map(|(party, _)| party.clone())
        .collect();
    let targets: Vec<u32> = parties.iter().map(|p| national_target.get(p)).collect();

    let n_districts = districts.len();
    let n_parties = parties.len();

    // Per-cell votes and per-district vote totals, fixed for the whole run.
    let votes: Vec<Vec<u64>> = districts
        .iter()
        .map(|d| parties.iter().map(|p| d.votes().get(p)).collect())
        .collect();
    let district_totals: Vec<f64> = districts.iter().map(|d| d.votes().total() as f64).collect();

    let mut cells = vec![vec![0u32; n_parties]; n_districts];
    let mut party_mult = vec![1.0f64; n_parties];
    let mut district_mult = vec![1.0f64; n_districts];

    let mut iterations = 0u32;
    let mut settled = false;

    while !settled && iterations < max_iterations {
        settled = true;
        iterations += 1;

        // Refill every cell from the current multipliers.
        for d_idx in 0..n_districts {
            let total = district_totals[d_idx];
            let seats = f64::from(districts[d_idx].seats());
            for p_idx in 0..n_parties {
                let v = votes[d_idx][p_idx];
                if v == 0 {
                    cells[d_idx][p_idx] = 0;
                    continue;
                }
                let ideal =
                    (v as f64 / total) * seats * party_mult[p_idx] * district_mult[d_idx];
                cells[d_idx][p_idx] = ideal.round() as u32;
            }
        }

        // Column pass: rescale party multipliers toward national targets.
        for p_idx in 0..n_parties {
            let current: u64 = cells
                .iter()
                .fold(0u64, |acc, row| acc + u64::from(row[p_idx]));
            let target = u64::from(targets[p_idx]);
            if current != target && current > 0 {
                party_mult[p_idx] *= target as f64 / current as f64;
                settled = false;
            }
        }

        // Row pass: rescale district multipliers toward district seat counts.
        for d_idx in 0..n_districts {
            let current: u64 = cells[d_idx]
                .iter()
                .fold(0u64, |acc, &v| acc + u64::from(v));
            let target = u64::from(districts[d_idx].seats());
            if current != target && current > 0 {
                district_mult[d_idx] *= target as f64 / current as f64;
                settled = false;
            }
        }
    }

    let matrix = SeatMatrix {
        parties,
        districts: districts.iter().map(|d| d.name().clone()).collect(),
        district_seats: districts.iter().map(|d| d.seats()).collect(),
        cells,
    };

    let converged = marginals_match(&matrix, &targets);

    SolveOutcome {
        matrix,
        iterations,
        converged,
    }
}

/// True iff every row and column sum sits exactly on its target.
fn marginals_match(matrix: &SeatMatrix, targets: &[u32]) -> bool {
    for d_idx in 0..matrix.districts.len() {
        if matrix.row_sum(d_idx) != u64::from(matrix.district_seats[d_idx]) {
            return false;
        }
    }
    for (p_idx, &target) in targets.iter().enumerate() {
        let current = matrix
            .cells
            .iter()
            .fold(0u64, |acc, row| acc + u64::from(row[p_idx]));
        if current != u64::from(target) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use gime_core::VoteTally;

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

    fn target(pairs: &[(&str, u32)]) -> Allocation {
        pairs.iter().map(|(k, v)| (p(k), *v)).collect()
    }

    #[test]
    fn symmetric_two_by_two_converges_first_pass() {
        // Proportional shares are already integral; nothing to rescale.
        let districts = [
            district("D1", 3, &[("X", 2000), ("Y", 1000)]),
            district("D2", 3, &[("X", 1000), ("Y", 2000)]),
        ];
        let out = solve(&districts, &target(&[("X", 3), ("Y", 3)]), 100);
        assert!(out.converged);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.matrix.cell(0, 0), 2); // D1/X
        assert_eq!(out.matrix.cell(0, 1), 1); // D1/Y
        assert_eq!(out.matrix.cell(1, 0), 1); // D2/X
        assert_eq!(out.matrix.cell(1, 1), 2); // D2/Y
    }

    #[test]
    fn rows_exact_and_columns_near_target() {
        let districts = [
            district("A", 4, &[("X", 1000), ("Y", 600), ("Z", 300)]),
            district("B", 3, &[("X", 500), ("Y", 900), ("Z", 200)]),
        ];
        // National D'Hondt over the summed votes for 7 seats.
        let national = target(&[("X", 3), ("Y", 3), ("Z", 1)]);
        let out = solve(&districts, &national, 100);

        // Rows are the better-enforced marginal.
        assert_eq!(out.matrix.row_sum(0), 4);
        assert_eq!(out.matrix.row_sum(1), 3);

        // Columns within ±1 of the seeded targets.
        let cols = out.matrix.column_sums();
        for (party, &want) in national.iter() {
            let got = i64::from(cols.get(party));
            assert!(
                (got - i64::from(want)).abs() <= 1,
                "{party}: column {got} vs target {want}"
            );
        }
    }

    #[test]
    fn zero_target_party_is_excluded_from_matrix() {
        let districts = [district("D1", 2, &[("X", 900), ("Y", 800), ("Z", 10)])];
        let out = solve(&districts, &target(&[("X", 1), ("Y", 1), ("Z", 0)]), 100);
        assert_eq!(out.matrix.parties(), &[p("X"), p("Y")]);
        assert_eq!(out.matrix.column_sums().get(&p("Z")), 0);
    }

    #[test]
    fn zero_vote_cell_stays_zero() {
        // Y has no votes in D2; its whole target must come from D1.
        let districts = [
            district("D1", 2, &[("X", 500), ("Y", 500)]),
            district("D2", 2, &[("X", 1000)]),
        ];
        let out = solve(&districts, &target(&[("X", 3), ("Y", 1)]), 100);
        assert_eq!(out.matrix.cell(1, 1), 0, "no votes, no seats");
    }

    #[test]
    fn no_districts_terminates_immediately() {
        let out = solve(&[], &target(&[("X", 5)]), 100);
        assert_eq!(out.matrix.districts().len(), 0);
        // Column sum 0 ≠ target 5 but current == 0: stall preserved, no rescale.
        assert!(!out.converged);
        assert_eq!(out.iterations, 1);
    }

    #[test]
    fn iteration_budget_is_respected() {
        // Deliberately awkward marginals; whatever happens, we never exceed the cap.
        let districts = [
            district("D1", 5, &[("X", 330), ("Y", 330), ("Z", 340)]),
            district("D2", 2, &[("X", 10), ("Y", 980), ("Z", 10)]),
        ];
        let out = solve(&districts, &target(&[("X", 2), ("Y", 3), ("Z", 2)]), 7);
        assert!(out.iterations <= 7);
    }

    #[test]
    fn district_allocations_drop_zero_cells() {
        let districts = [
            district("D1", 3, &[("X", 2000), ("Y", 1000), ("Z", 1)]),
            district("D2", 3, &[("X", 1000), ("Y", 2000)]),
        ];
        let out = solve(&districts, &target(&[("X", 3), ("Y", 3)]), 100);
        let per_district = out.matrix.district_allocations();
        assert_eq!(per_district.len(), 2);
        for da in &per_district {
            assert!(da.allocation.iter().all(|(_, &s)| s > 0));
        }
        assert_eq!(per_district[0].seats, 3);
    }
}

//! What-if scenarios: per-party vote multipliers.
//!
//! The presentation layer lets users scale each party's votes by a factor
//! before recomputing both methods. Scaling rounds half away from zero and
//! leaves seat counts untouched; parties without a factor keep their votes.

use std::collections::BTreeMap;

use gime_core::{District, PartyId, VoteTally};

/// Return new districts with every party's votes scaled by its multiplier.
pub fn apply_multipliers(
    districts: &[District],
    multipliers: &BTreeMap<PartyId, f64>,
) -> Vec<District> {
    districts
        .iter()
        .map(|district| {
            let scaled = VoteTally::from_pairs(district.votes().iter().map(|(party, &v)| {
                let factor = multipliers.get(party).copied().unwrap_or(1.0);
                (party.clone(), (v as f64 * factor).round() as u64)
            }))
            .expect("scaling keeps keys unique");
            District::new(district.name().clone(), district.seats(), scaled)
                .expect("seat count unchanged and already positive")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use gime_core::DistrictId;

    fn p(s: &str) -> PartyId {
        PartyId::from_str(s).unwrap()
    }

    #[test]
    fn scales_and_rounds_per_party() {
        let district = District::new(
            DistrictId::from_str("D").unwrap(),
            5,
            VoteTally::from_pairs([(p("PP"), 100), (p("PSOE"), 101), (p("VOX"), 7)]).unwrap(),
        )
        .unwrap();
        let mut factors = BTreeMap::new();
        factors.insert(p("PP"), 1.3);
        factors.insert(p("PSOE"), 0.85);

        let out = apply_multipliers(&[district], &factors);
        let votes = out[0].votes();
        assert_eq!(votes.get(&p("PP")), 130);
        // 101 * 0.85 = 85.85 → 86
        assert_eq!(votes.get(&p("PSOE")), 86);
        // No factor → unchanged.
        assert_eq!(votes.get(&p("VOX")), 7);
        assert_eq!(out[0].seats(), 5);
    }
}

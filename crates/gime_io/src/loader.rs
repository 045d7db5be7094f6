//! Loader: read a scenario JSON file, validate it, and return typed
//! districts for the pipeline.
//!
//! Wire format:
//!
//! ```json
//! {
//!   "name": "General election 2023",
//!   "total_seats": 350,
//!   "districts": [
//!     { "name": "Almería", "seats": 6,
//!       "votes": { "PP": 112547, "PSOE": 79694 } }
//!   ]
//! }
//! ```
//!
//! `total_seats` is optional and defaults to the sum of district seat
//! counts. Validation here covers what the core leaves unspecified:
//! at least one district, unique district names, positive seat counts,
//! well-formed party/district tokens.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use gime_core::{District, DistrictId, PartyId, VoteTally};

use crate::{IoError, IoResult};

// ----------------------------- Wire-facing types -----------------------------

#[derive(Debug, Clone, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    total_seats: Option<u32>,
    districts: Vec<DistrictFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct DistrictFile {
    name: String,
    seats: u32,
    votes: std::collections::BTreeMap<String, u64>,
}

// ----------------------------- Typed output -----------------------------

/// Loaded, validated scenario ready for the pipeline.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub total_seats: u32,
    pub districts: Vec<District>,
}

/// Read and validate a scenario from a JSON file.
pub fn load_scenario(path: &Path) -> IoResult<Scenario> {
    let text = fs::read_to_string(path)?;
    parse_scenario(&text)
}

/// Parse and validate a scenario from JSON text.
pub fn parse_scenario(text: &str) -> IoResult<Scenario> {
    let file: ScenarioFile = serde_json::from_str(text)?;

    if file.districts.is_empty() {
        return Err(IoError::Invalid("scenario has no districts".into()));
    }

    let mut seen = BTreeSet::new();
    let mut districts = Vec::with_capacity(file.districts.len());
    let mut seat_sum: u64 = 0;

    for d in &file.districts {
        if !seen.insert(d.name.clone()) {
            return Err(IoError::Invalid(format!(
                "duplicate district name \"{}\"",
                d.name
            )));
        }
        let name = DistrictId::from_str(&d.name)
            .map_err(|e| IoError::Invalid(format!("district name \"{}\": {e}", d.name)))?;

        let mut pairs = Vec::with_capacity(d.votes.len());
        for (party, &count) in &d.votes {
            let party = PartyId::from_str(party)
                .map_err(|e| IoError::Invalid(format!("party \"{party}\" in \"{}\": {e}", d.name)))?;
            pairs.push((party, count));
        }
        let votes = VoteTally::from_pairs(pairs)
            .map_err(|e| IoError::Invalid(format!("votes in \"{}\": {e}", d.name)))?;

        let district = District::new(name, d.seats, votes)
            .map_err(|e| IoError::Invalid(format!("district \"{}\": {e}", d.name)))?;
        seat_sum += u64::from(d.seats);
        districts.push(district);
    }

    let default_total = u32::try_from(seat_sum)
        .map_err(|_| IoError::Invalid("district seat counts overflow u32".into()))?;
    let total_seats = file.total_seats.unwrap_or(default_total);
    if total_seats == 0 {
        return Err(IoError::Invalid("total_seats must be positive".into()));
    }

    Ok(Scenario {
        name: file.name.unwrap_or_else(|| "unnamed scenario".into()),
        total_seats,
        districts,
    })
}

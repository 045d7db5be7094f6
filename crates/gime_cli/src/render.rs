//! Renderers: JSON (machine) and plain text (terminal).
//!
//! JSON is assembled by hand with `serde_json::json!` so the algorithm
//! crates stay serde-free; field order follows the struct layout and party
//! maps inherit the engine's lexicographic order.

use serde_json::{json, Value};

use gime_algo::metrics::AllocationDiff;
use gime_core::{Allocation, StageResult};
use gime_pipeline::ByDistrictOutcome;

fn allocation_json(allocation: &Allocation) -> Value {
    Value::Object(
        allocation
            .iter()
            .map(|(party, &seats)| (party.to_string(), json!(seats)))
            .collect(),
    )
}

pub fn dhondt_json(scenario: &str, out: &ByDistrictOutcome, gallagher: f64) -> Value {
    json!({
        "scenario": scenario,
        "method": "dhondt",
        "national": allocation_json(&out.national),
        "gallagher_index": gallagher,
        "districts": out.per_district.iter().map(|d| json!({
            "name": d.district.to_string(),
            "seats": d.seats,
            "allocation": allocation_json(&d.outcome.allocation),
            "quotients": d.outcome.quotient_trace.iter().map(|q| json!({
                "party": q.party.to_string(),
                "quotient": q.quotient,
                "seat": q.seat_index,
            })).collect::<Vec<_>>(),
        })).collect::<Vec<_>>(),
    })
}

pub fn gime_json(scenario: &str, stages: &[StageResult], gallagher: f64) -> Value {
    json!({
        "scenario": scenario,
        "method": "gime",
        "gallagher_index": gallagher,
        "stages": stages.iter().map(stage_json).collect::<Vec<_>>(),
    })
}

fn stage_json(stage: &StageResult) -> Value {
    let mut obj = serde_json::Map::new();
    obj.insert("stage".into(), json!(stage.stage));
    obj.insert("description".into(), json!(stage.description));
    obj.insert("national".into(), allocation_json(&stage.national));
    if let Some(iterations) = stage.iterations {
        obj.insert("iterations".into(), json!(iterations));
    }
    if let Some(per_district) = &stage.district_allocations {
        obj.insert(
            "districts".into(),
            per_district
                .iter()
                .map(|da| {
                    json!({
                        "name": da.district.to_string(),
                        "seats": da.seats,
                        "allocation": allocation_json(&da.allocation),
                    })
                })
                .collect(),
        );
    }
    Value::Object(obj)
}

pub fn compare_json(
    scenario: &str,
    dhondt: &Allocation,
    gime: &Allocation,
    diffs: &[AllocationDiff],
    gallagher_dhondt: f64,
    gallagher_gime: f64,
) -> Value {
    json!({
        "scenario": scenario,
        "method": "compare",
        "dhondt": { "national": allocation_json(dhondt), "gallagher_index": gallagher_dhondt },
        "gime": { "national": allocation_json(gime), "gallagher_index": gallagher_gime },
        "diffs": diffs.iter().map(|d| json!({
            "party": d.party.to_string(),
            "dhondt": d.seats_a,
            "gime": d.seats_b,
            "diff": d.diff,
        })).collect::<Vec<_>>(),
    })
}

// ----------------------------- Text rendering -----------------------------

/// Allocation as one line per party, seats descending (ties lexicographic).
fn push_allocation_text(out: &mut String, allocation: &Allocation) {
    let mut rows: Vec<(&gime_core::PartyId, u32)> =
        allocation.iter().map(|(p, &s)| (p, s)).collect();
    rows.sort_by_key(|&(_, seats)| core::cmp::Reverse(seats));
    for (party, seats) in rows {
        out.push_str(&format!("  {:<12} {:>4}\n", party.to_string(), seats));
    }
}

pub fn dhondt_text(scenario: &str, out: &ByDistrictOutcome, gallagher: f64) -> String {
    let mut s = String::new();
    s.push_str(&format!("scenario: {scenario}\n"));
    s.push_str(&format!(
        "method: traditional D'Hondt across {} districts ({} seats)\n",
        out.per_district.len(),
        out.national.total()
    ));
    push_allocation_text(&mut s, &out.national);
    s.push_str(&format!("Gallagher index: {gallagher:.2}\n"));
    s
}

pub fn gime_text(scenario: &str, stages: &[StageResult], gallagher: f64) -> String {
    let mut s = String::new();
    s.push_str(&format!("scenario: {scenario}\n"));
    for stage in stages {
        s.push_str(&format!("stage {}: {}\n", stage.stage, stage.description));
        if let Some(iterations) = stage.iterations {
            s.push_str(&format!("  ({iterations} fitting iterations)\n"));
        }
        push_allocation_text(&mut s, &stage.national);
    }
    s.push_str(&format!("Gallagher index: {gallagher:.2}\n"));
    s
}

pub fn compare_text(
    scenario: &str,
    diffs: &[AllocationDiff],
    gallagher_dhondt: f64,
    gallagher_gime: f64,
) -> String {
    let mut s = String::new();
    s.push_str(&format!("scenario: {scenario}\n"));
    s.push_str(&format!(
        "{:<12} {:>8} {:>8} {:>6}\n",
        "party", "dhondt", "gime", "diff"
    ));
    for d in diffs {
        s.push_str(&format!(
            "{:<12} {:>8} {:>8} {:>+6}\n",
            d.party.to_string(),
            d.seats_a,
            d.seats_b,
            d.diff
        ));
    }
    s.push_str(&format!(
        "Gallagher index: D'Hondt {gallagher_dhondt:.2}, GIME {gallagher_gime:.2}\n"
    ));
    s
}

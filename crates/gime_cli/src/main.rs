// crates/gime_cli/src/main.rs
//
// Offline apportionment CLI: load a scenario, optionally apply what-if vote
// multipliers, run the selected method(s), render text or JSON to stdout.

mod args;
mod render;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const USAGE: i32 = 2;
    pub const IO: i32 = 4;
}

use std::collections::BTreeMap;
use std::process::ExitCode;
use std::str::FromStr;

use args::{parse_and_validate, Args, Method, Render};

use gime_core::PartyId;
use gime_io::{load_scenario, IoError};
use gime_pipeline::{allocate_by_district, final_allocation, national_votes, run_gime};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad flags or bad multiplier tokens.
    Usage(String),
    /// Scenario file could not be read or is invalid.
    Io(String),
}

fn main() -> ExitCode {
    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("gime: error: {e}");
            return ExitCode::from(exitcodes::USAGE as u8);
        }
    };

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            match &e {
                MainError::Usage(msg) | MainError::Io(msg) => eprintln!("gime: error: {msg}"),
            }
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Usage(_) => exitcodes::USAGE,
        MainError::Io(_) => exitcodes::IO,
    }
}

fn map_io_err(e: IoError) -> MainError {
    MainError::Io(e.to_string())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let scenario = load_scenario(&args.scenario).map_err(map_io_err)?;

    let districts = if args.multipliers.is_empty() {
        scenario.districts.clone()
    } else {
        let factors = multiplier_map(&args.multipliers)?;
        gime_pipeline::apply_multipliers(&scenario.districts, &factors)
    };

    let total_seats = args.total_seats.unwrap_or(scenario.total_seats);
    let national = national_votes(&districts);

    match args.method {
        Method::Dhondt => {
            let out = allocate_by_district(&districts, args.threshold);
            let gallagher = gime_algo::metrics::gallagher_index(&national, &out.national);
            emit(args, || render::dhondt_text(&scenario.name, &out, gallagher), || {
                render::dhondt_json(&scenario.name, &out, gallagher)
            })
        }
        Method::Gime => {
            let stages = run_gime(&districts, total_seats, args.bonus, args.threshold);
            let last = final_allocation(&stages).expect("pipeline emits at least one stage");
            let gallagher = gime_algo::metrics::gallagher_index(&national, last);
            emit(args, || render::gime_text(&scenario.name, &stages, gallagher), || {
                render::gime_json(&scenario.name, &stages, gallagher)
            })
        }
        Method::Compare => {
            let dhondt = allocate_by_district(&districts, args.threshold).national;
            let stages = run_gime(&districts, total_seats, args.bonus, args.threshold);
            let gime = final_allocation(&stages)
                .expect("pipeline emits at least one stage")
                .clone();
            let diffs = gime_algo::metrics::compare(&dhondt, &gime);
            let g_dhondt = gime_algo::metrics::gallagher_index(&national, &dhondt);
            let g_gime = gime_algo::metrics::gallagher_index(&national, &gime);
            emit(
                args,
                || render::compare_text(&scenario.name, &diffs, g_dhondt, g_gime),
                || render::compare_json(&scenario.name, &dhondt, &gime, &diffs, g_dhondt, g_gime),
            )
        }
    }
}

/// Convert `PARTY=FACTOR` pairs into a typed multiplier map.
fn multiplier_map(
    raw: &[(String, f64)],
) -> Result<BTreeMap<PartyId, f64>, MainError> {
    let mut map = BTreeMap::new();
    for (party, factor) in raw {
        let party = PartyId::from_str(party)
            .map_err(|e| MainError::Usage(format!("--multiplier party \"{party}\": {e}")))?;
        map.insert(party, *factor);
    }
    Ok(map)
}

/// Print the selected rendering to stdout.
fn emit<T, J>(args: &Args, text: T, json: J) -> Result<(), MainError>
where
    T: FnOnce() -> String,
    J: FnOnce() -> serde_json::Value,
{
    match args.render {
        Render::Text => print!("{}", text()),
        Render::Json => println!("{}", json()),
    }
    Ok(())
}

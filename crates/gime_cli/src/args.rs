//! CLI argument surface. Offline and deterministic: one scenario file in,
//! rendered results out, nothing else touched.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which computation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Traditional district-by-district D'Hondt.
    Dhondt,
    /// National biproportional GIME pipeline.
    Gime,
    /// Both methods side by side with Gallagher indices.
    Compare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Render {
    Text,
    Json,
}

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "gime",
    disable_help_subcommand = true,
    about = "Offline seat-apportionment calculator: D'Hondt vs biproportional GIME"
)]
pub struct Args {
    /// Scenario JSON path (districts with seats and party votes).
    #[arg(long)]
    pub scenario: PathBuf,

    /// Computation to run.
    #[arg(long, value_enum, default_value_t = Method::Compare)]
    pub method: Method,

    /// Electoral threshold as a fraction in [0, 1] (e.g. 0.03 for 3%).
    #[arg(long, default_value_t = 0.03)]
    pub threshold: f64,

    /// Governability bonus seats for the GIME pipeline (0 disables stage 3).
    #[arg(long, default_value_t = 0)]
    pub bonus: u32,

    /// Override the national seat total (default: sum of district seats,
    /// or the scenario file's own total_seats).
    #[arg(long)]
    pub total_seats: Option<u32>,

    /// What-if vote multiplier, PARTY=FACTOR (repeatable).
    #[arg(long = "multiplier", value_parser = parse_multiplier)]
    pub multipliers: Vec<(String, f64)>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Render::Text)]
    pub render: Render,
}

/// Errors surfaced by argument validation. Messages stay short and stable.
#[derive(Debug)]
pub enum CliError {
    BadThreshold(f64),
    BadMultiplier(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::BadThreshold(t) => {
                write!(f, "--threshold must be within [0, 1], got {t}")
            }
            CliError::BadMultiplier(s) => write!(f, "bad --multiplier: {s}"),
        }
    }
}

fn parse_multiplier(s: &str) -> Result<(String, f64), String> {
    let (party, factor) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PARTY=FACTOR, got \"{s}\""))?;
    if party.is_empty() {
        return Err(format!("empty party in \"{s}\""));
    }
    let factor: f64 = factor
        .parse()
        .map_err(|_| format!("factor in \"{s}\" is not a number"))?;
    if !factor.is_finite() || factor < 0.0 {
        return Err(format!("factor in \"{s}\" must be finite and >= 0"));
    }
    Ok((party.to_string(), factor))
}

/// Parse and validate the full argument set.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    if !(0.0..=1.0).contains(&args.threshold) || args.threshold.is_nan() {
        return Err(CliError::BadThreshold(args.threshold));
    }
    Ok(args)
}

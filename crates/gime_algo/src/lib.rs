// crates/gime_algo/src/lib.rs
#![forbid(unsafe_code)]

//! gime_algo — pure apportionment algorithms.
//!
//! Everything here is a deterministic function over immutable inputs: no I/O,
//! no RNG, no shared state. Degenerate inputs produce well-defined degenerate
//! outputs (empty allocations, best-effort matrices), never errors — input
//! validation is the data provider's job (`gime_io`).
//!
//! Tie-break convention, engine-wide: candidates are scanned in lexicographic
//! `PartyId` order and only a strictly greater quotient/seat-count displaces
//! the current best ("first max wins").

pub mod biproportional;
pub mod governability;
pub mod highest_averages;
pub mod metrics;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use biproportional::{solve, SeatMatrix, SolveOutcome};
pub use governability::{apply_bonus, BonusOutcome};
pub use highest_averages::{allocate, DivisorOutcome, QuotientEntry};
pub use metrics::{compare, gallagher_index, AllocationDiff};

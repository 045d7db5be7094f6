//! gime_core — Core types for the GIME apportionment engine.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! engine (`gime_io`, `gime_algo`, `gime_pipeline`, `gime_cli`):
//!
//! - Registry tokens: `PartyId`, `DistrictId` (validated, totally ordered)
//! - Entities: `VoteTally`, `District`, `Allocation`, `StageResult`
//! - Construction-time validation errors: `CoreError`
//!
//! Ordering contract: `PartyId` and `DistrictId` order is lexicographic byte
//! order, and every "first max wins" tie-break in the engine resolves in that
//! order. All tallies/allocations are `BTreeMap`-backed so iteration order is
//! the tie-break order by construction.
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        /// Token is empty, too long, or contains control characters.
        InvalidToken,
        /// The same party appeared twice while building a tally or allocation.
        DuplicateParty,
        /// A district was constructed with zero seats.
        ZeroSeats,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::DuplicateParty => write!(f, "duplicate party key"),
                CoreError::ZeroSeats => write!(f, "district seat count must be positive"),
            }
        }
    }
}

pub mod tokens {
    //! Registry token types (`PartyId`, `DistrictId`).
    //!
    //! Real-world party labels carry spaces and accents ("EH Bildu",
    //! "Coalición Canaria"), so the charset check only rejects what would
    //! break rendering: empty strings, control characters, >64 chars.

    use crate::errors::CoreError;
    use alloc::string::{String, ToString};
    use core::fmt;
    use core::str::FromStr;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    fn is_token(s: &str) -> bool {
        (1..=64).contains(&s.chars().count()) && s.chars().all(|c| !c.is_control())
    }

    macro_rules! def_token {
        ($name:ident) => {
            #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
            #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
            pub struct $name(String);

            impl $name {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl FromStr for $name {
                type Err = CoreError;
                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    if is_token(s) {
                        Ok(Self(s.to_string()))
                    } else {
                        Err(CoreError::InvalidToken)
                    }
                }
            }
        };
    }

    def_token!(PartyId);
    def_token!(DistrictId);
}

pub mod entities;

// Convenience re-exports (downstream crates import these from the root).
pub use entities::{Allocation, District, DistrictAllocation, StageResult, VoteTally};
pub use errors::CoreError;
pub use tokens::{DistrictId, PartyId};

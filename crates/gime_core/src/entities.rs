//! Entities: vote tallies, districts, seat allocations, stage results.
//!
//! All mappings are `BTreeMap`-backed: key uniqueness is structural, value
//! types (`u64` votes, `u32` seats) make negative counts unrepresentable,
//! and iteration order is the engine-wide lexicographic tie-break order.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::errors::CoreError;
use crate::tokens::{DistrictId, PartyId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Party → vote count. Constructed through fallible builders so duplicate
/// keys are rejected at the boundary rather than silently last-wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoteTally(BTreeMap<PartyId, u64>);

impl VoteTally {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from `(party, votes)` pairs; a repeated party is an error.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (PartyId, u64)>,
    {
        let mut map = BTreeMap::new();
        for (party, votes) in pairs {
            if map.insert(party, votes).is_some() {
                return Err(CoreError::DuplicateParty);
            }
        }
        Ok(Self(map))
    }

    /// Votes for `party`; absent parties count as 0.
    pub fn get(&self, party: &PartyId) -> u64 {
        self.0.get(party).copied().unwrap_or(0)
    }

    /// Total votes across all parties (u128 accumulator; never overflows).
    pub fn total(&self) -> u128 {
        self.0.values().fold(0u128, |acc, &v| acc + u128::from(v))
    }

    /// Add `votes` to a party's count (used for national aggregation).
    pub fn add(&mut self, party: PartyId, votes: u64) {
        let slot = self.0.entry(party).or_insert(0);
        *slot = slot.saturating_add(votes);
    }

    /// Accumulate every entry of `other` into `self`.
    pub fn merge(&mut self, other: &VoteTally) {
        for (party, &votes) in other.iter() {
            self.add(party.clone(), votes);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartyId, &u64)> {
        self.0.iter()
    }

    pub fn parties(&self) -> impl Iterator<Item = &PartyId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Party → seat count for one scope (a district or the nation).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Allocation(BTreeMap<PartyId, u32>);

impl Allocation {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Seats for `party`; absent parties hold 0 seats.
    pub fn get(&self, party: &PartyId) -> u32 {
        self.0.get(party).copied().unwrap_or(0)
    }

    pub fn set(&mut self, party: PartyId, seats: u32) {
        self.0.insert(party, seats);
    }

    /// Award one seat to `party` (seeding the entry if absent).
    pub fn award(&mut self, party: &PartyId) {
        let slot = self.0.entry(party.clone()).or_insert(0);
        *slot = slot.saturating_add(1);
    }

    /// Sum of all seat counts.
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, &v| acc + u64::from(v))
    }

    /// Accumulate every entry of `other` into `self` (national summation).
    pub fn accumulate(&mut self, other: &Allocation) {
        for (party, &seats) in other.iter() {
            let slot = self.0.entry(party.clone()).or_insert(0);
            *slot = slot.saturating_add(seats);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartyId, &u32)> {
        self.0.iter()
    }

    pub fn parties(&self) -> impl Iterator<Item = &PartyId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PartyId, u32)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (PartyId, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One electoral district: immutable once constructed for a simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct District {
    name: DistrictId,
    seats: u32,
    votes: VoteTally,
}

impl District {
    /// `seats` must be positive; vote correctness is the data provider's job.
    pub fn new(name: DistrictId, seats: u32, votes: VoteTally) -> Result<Self, CoreError> {
        if seats == 0 {
            return Err(CoreError::ZeroSeats);
        }
        Ok(Self { name, seats, votes })
    }

    pub fn name(&self) -> &DistrictId {
        &self.name
    }

    pub fn seats(&self) -> u32 {
        self.seats
    }

    pub fn votes(&self) -> &VoteTally {
        &self.votes
    }
}

/// A district's share of a stage-2 seat matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistrictAllocation {
    pub district: DistrictId,
    pub seats: u32,
    pub allocation: Allocation,
}

/// One labeled pipeline stage; produced once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StageResult {
    pub stage: u32,
    pub description: String,
    pub national: Allocation,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub district_allocations: Option<Vec<DistrictAllocation>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub iterations: Option<u32>,
}

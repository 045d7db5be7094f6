//! Governability bonus: transfer extra seats to the plurality winner,
//! proportionally deducted from every other party holding seats.
//!
//! Each deduction is rounded independently (`round(seats / others_total *
//! bonus)`, half away from zero, floored at 0), so the post-adjustment total
//! can drift from the pre-adjustment total by up to the number of deducted
//! parties. That imprecision is part of the published method and is not
//! reconciled here.

use gime_core::{Allocation, PartyId};

/// Adjusted allocation plus the party that received the bonus.
/// `winner` is `None` only for the no-op cases (zero bonus, empty input).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusOutcome {
    pub allocation: Allocation,
    pub winner: Option<PartyId>,
}

/// Apply a governability bonus of `bonus_seats` to `allocation`.
///
/// `bonus_seats == 0` returns the input unchanged. The winner is the party
/// with the strictly largest seat count; on a tie the lexicographically
/// first party wins (same convention as the divisor allocator).
pub fn apply_bonus(allocation: &Allocation, bonus_seats: u32) -> BonusOutcome {
    if bonus_seats == 0 || allocation.is_empty() {
        return BonusOutcome {
            allocation: allocation.clone(),
            winner: None,
        };
    }

    // First strict max in lexicographic scan order.
    let mut winner: Option<(&PartyId, u32)> = None;
    for (party, &seats) in allocation.iter() {
        match winner {
            None => winner = Some((party, seats)),
            Some((_, best)) if seats > best => winner = Some((party, seats)),
            Some(_) => {}
        }
    }
    let (winner, _) = winner.expect("allocation is non-empty");
    let winner = winner.clone();

    let others_total: u64 = allocation
        .iter()
        .filter(|(party, &seats)| **party != winner && seats > 0)
        .fold(0u64, |acc, (_, &seats)| acc + u64::from(seats));

    let mut adjusted = Allocation::new();
    for (party, &seats) in allocation.iter() {
        if *party == winner {
            adjusted.set(party.clone(), seats.saturating_add(bonus_seats));
        } else if seats > 0 && others_total > 0 {
            let reduction = (f64::from(seats) / others_total as f64
                * f64::from(bonus_seats))
            .round() as u32;
            adjusted.set(party.clone(), seats.saturating_sub(reduction));
        } else {
            adjusted.set(party.clone(), seats);
        }
    }

    BonusOutcome {
        allocation: adjusted,
        winner: Some(winner),
    }
}

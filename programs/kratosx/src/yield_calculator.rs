// =============================================================================
// Yield Calculator
// =============================================================================
// Turns a principal and a number of locked days into the yield owed.
//
// Formula:
//   percent = base(elapsed_days) + early_adopt + extend (if elapsed >= 365)
//   yield   = principal * percent * min(elapsed_days, 1825) / (100 * 365)
//
// Nothing is paid at or below 180 days. Integer math only, truncating.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::KratosError;

/// Base percent for a lock duration, looked up on the unclamped day count
pub fn base_percent(elapsed_days: u64) -> u64 {
    YIELD_BREAKPOINTS
        .iter()
        .find(|(upper_bound, _)| elapsed_days <= *upper_bound)
        .map(|(_, percent)| *percent)
        .unwrap_or(MAX_BASE_PERCENT)
}

/// Total percent including bonuses
pub fn effective_percent(elapsed_days: u64, early_adopt_bonus: bool, extend_bonus: bool) -> u64 {
    let mut percent = base_percent(elapsed_days);

    if early_adopt_bonus {
        percent += BONUS_PERCENT;
    }

    if extend_bonus && elapsed_days >= EXTEND_BONUS_MIN_DAYS {
        percent += BONUS_PERCENT;
    }

    percent
}

/// Calculate the yield owed on `principal` after `elapsed_days` of locking
///
/// # Arguments
/// * `principal` - Deposited amount in token base units
/// * `elapsed_days` - Whole days locked (callers reject negative spans)
/// * `early_adopt_bonus` - +1 percentage point
/// * `extend_bonus` - +1 percentage point once `elapsed_days >= 365`
pub fn calculate_yield(
    principal: u64,
    elapsed_days: u64,
    early_adopt_bonus: bool,
    extend_bonus: bool,
) -> Result<u64> {
    if elapsed_days <= YIELD_FLOOR_DAYS {
        return Ok(0);
    }

    let percent = effective_percent(elapsed_days, early_adopt_bonus, extend_bonus);
    let clamped_days = elapsed_days.min(MAX_YIELD_DAYS);

    let amount = (principal as u128)
        .checked_mul(percent as u128)
        .ok_or(error!(KratosError::MathOverflow))?
        .checked_mul(clamped_days as u128)
        .ok_or(error!(KratosError::MathOverflow))?
        .checked_div(YIELD_DENOMINATOR)
        .ok_or(error!(KratosError::MathOverflow))?;

    u64::try_from(amount).map_err(|_| error!(KratosError::MathOverflow))
}

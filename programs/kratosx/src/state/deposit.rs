// =============================================================================
// Deposit Record
// =============================================================================
// One record per reserved slot. Records live inside the vault's ledger and
// are addressed by id; nothing outside the ledger holds a reference.
//
// Lifecycle:
//   Pending -> Used -> WithdrawalRequested -> (removed on execution)
//   Pending -> (removed on rejection)
// Used can also go straight to removal: execution does not require a quote.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::{SECONDS_PER_DAY, WITHDRAWAL_BUFFER_DAYS};
use crate::error::KratosError;
use crate::yield_calculator::calculate_yield;

/// Commitment length chosen for a deposit. Ordered: a later variant is a
/// longer lock, and extensions may only move forward.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord,
)]
pub enum LockTier {
    #[default]
    SixMonths,
    OneYear,
    TwoYears,
    ThreeYears,
    FourYears,
    FiveYears,
}

impl LockTier {
    /// Nominal length of the tier in days
    pub fn days(&self) -> u64 {
        match self {
            LockTier::SixMonths => 180,
            LockTier::OneYear => 365,
            LockTier::TwoYears => 730,
            LockTier::ThreeYears => 1095,
            LockTier::FourYears => 1460,
            LockTier::FiveYears => 1825,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepositStatus {
    /// Slot reserved, waiting for the operator
    #[default]
    Pending,
    /// Approved and funded, earning yield
    Used,
    /// Payout quoted and frozen, waiting for execution
    WithdrawalRequested,
}

/// A single deposit held by the vault.
///
/// Serialized size:
/// - id: 8
/// - owner: 32
/// - principal: 8
/// - requested_at: 8
/// - approve_timestamp: 8
/// - lock_tier: 1
/// - has_early_adopt_bonus: 1
/// - has_extend_period_bonus: 1
/// - predicted_yield: 8
/// - status: 1
/// - withdrawal_requested_at: 8
/// - quoted_payout: 8
/// Total: 92 bytes
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Deposit {
    /// Unique, assigned from 1 upward, never reused
    pub id: u64,

    /// Depositor wallet; receives the payout
    pub owner: Pubkey,

    /// Tokens pulled at approval (the vault's slot value)
    pub principal: u64,

    /// Unix timestamp of the slot reservation
    pub requested_at: i64,

    /// Unix timestamp of approval, 0 while pending
    pub approve_timestamp: i64,

    /// Depositor's hint while pending, operator's decision once approved
    pub lock_tier: LockTier,

    /// Fixed at approval from the vault's promotion flag
    pub has_early_adopt_bonus: bool,

    /// Set by the first successful extension
    pub has_extend_period_bonus: bool,

    /// Yield if withdrawn at the end of the lock tier (tier days + cool-down)
    pub predicted_yield: u64,

    pub status: DepositStatus,

    /// Unix timestamp of the withdrawal request, 0 if none
    pub withdrawal_requested_at: i64,

    /// Payout frozen at request time, 0 if none
    pub quoted_payout: u64,
}

impl Deposit {
    pub const SIZE: usize = 8 + 32 + 8 + 8 + 8 + 1 + 1 + 1 + 8 + 1 + 8 + 8;

    /// A fresh reservation
    pub fn new_pending(id: u64, owner: Pubkey, principal: u64, lock_tier: LockTier, now: i64) -> Self {
        Self {
            id,
            owner,
            principal,
            requested_at: now,
            lock_tier,
            status: DepositStatus::Pending,
            ..Default::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == DepositStatus::Pending
    }

    /// Approved and still holding its slot (quoted or not)
    pub fn is_used(&self) -> bool {
        matches!(
            self.status,
            DepositStatus::Used | DepositStatus::WithdrawalRequested
        )
    }

    /// Whole days since approval plus the withdrawal cool-down
    pub fn elapsed_days(&self, now: i64) -> Result<u64> {
        require!(self.is_used(), KratosError::InvalidTransition);

        let elapsed_seconds = now
            .checked_sub(self.approve_timestamp)
            .ok_or(error!(KratosError::MathUnderflow))?;
        require!(elapsed_seconds >= 0, KratosError::InvalidTimestamp);

        let days = (elapsed_seconds / SECONDS_PER_DAY) as u64;

        days.checked_add(WITHDRAWAL_BUFFER_DAYS)
            .ok_or(error!(KratosError::MathOverflow))
    }

    /// Yield owed if the deposit were paid out at `now`
    pub fn yield_at(&self, now: i64) -> Result<u64> {
        calculate_yield(
            self.principal,
            self.elapsed_days(now)?,
            self.has_early_adopt_bonus,
            self.has_extend_period_bonus,
        )
    }

    /// Principal plus yield if the deposit were paid out at `now`
    pub fn payout_at(&self, now: i64) -> Result<u64> {
        self.principal
            .checked_add(self.yield_at(now)?)
            .ok_or(error!(KratosError::MathOverflow))
    }

    /// Refresh `predicted_yield` for the current tier and bonuses
    pub fn refresh_predicted_yield(&mut self) -> Result<()> {
        self.predicted_yield = calculate_yield(
            self.principal,
            self.lock_tier.days() + WITHDRAWAL_BUFFER_DAYS,
            self.has_early_adopt_bonus,
            self.has_extend_period_bonus,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_kratos_error;

    fn used_deposit(approved_at: i64) -> Deposit {
        Deposit {
            id: 1,
            owner: Pubkey::new_unique(),
            principal: 5000,
            approve_timestamp: approved_at,
            status: DepositStatus::Used,
            ..Default::default()
        }
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(LockTier::SixMonths < LockTier::OneYear);
        assert!(LockTier::FourYears < LockTier::FiveYears);
        assert_eq!(LockTier::default(), LockTier::SixMonths);
        assert_eq!(LockTier::FiveYears.days(), 1825);
    }

    #[test]
    fn test_serialized_size_matches_constant() {
        let deposit = used_deposit(0);
        let mut data = Vec::new();
        deposit.serialize(&mut data).unwrap();
        assert_eq!(data.len(), Deposit::SIZE);
    }

    #[test]
    fn test_elapsed_days_adds_cool_down() {
        let deposit = used_deposit(1_000);

        assert_eq!(deposit.elapsed_days(1_000).unwrap(), 7);
        // one second short of a full day still counts as zero days
        assert_eq!(deposit.elapsed_days(1_000 + SECONDS_PER_DAY - 1).unwrap(), 7);
        assert_eq!(deposit.elapsed_days(1_000 + 10 * SECONDS_PER_DAY).unwrap(), 17);
    }

    #[test]
    fn test_elapsed_days_rejects_time_before_approval() {
        let deposit = used_deposit(1_000);
        assert_kratos_error(deposit.elapsed_days(999), KratosError::InvalidTimestamp);
    }

    #[test]
    fn test_pending_deposit_has_no_payout() {
        let deposit = Deposit::new_pending(1, Pubkey::new_unique(), 5000, LockTier::OneYear, 0);
        assert_kratos_error(deposit.payout_at(0), KratosError::InvalidTransition);
    }

    #[test]
    fn test_payout_includes_principal() {
        let mut deposit = used_deposit(0);
        deposit.has_early_adopt_bonus = true;

        // 1300 days + 7 cool-down = 1307 days at 7% + 1% early adopt
        let now = 1300 * SECONDS_PER_DAY;
        assert_eq!(deposit.yield_at(now).unwrap(), 1432);
        assert_eq!(deposit.payout_at(now).unwrap(), 6432);
    }

    #[test]
    fn test_predicted_yield_follows_tier() {
        let mut deposit = used_deposit(0);

        // 180 + 7 days at 5%
        deposit.refresh_predicted_yield().unwrap();
        assert_eq!(deposit.predicted_yield, 5000 * 5 * 187 / 36_500);

        // 1825 + 7 days clamps to 1825 at 9%
        deposit.lock_tier = LockTier::FiveYears;
        deposit.refresh_predicted_yield().unwrap();
        assert_eq!(deposit.predicted_yield, 5000 * 9 * 1825 / 36_500);
    }
}

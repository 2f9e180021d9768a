// =============================================================================
// Deposit Ledger
// =============================================================================
// Owns every active deposit and drives the deposit state machine.
//
// Records are kept in a Vec ordered by id: ids are handed out monotonically
// and appended, and removals keep the order, so listings are deterministic.
//
// Every transition validates first and writes last, so a failed call leaves
// the ledger and the slot pool exactly as they were.
// =============================================================================

use anchor_lang::prelude::*;

use crate::error::KratosError;
use crate::state::{Deposit, DepositStatus, LockTier, SlotPool};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DepositLedger {
    /// Id for the next reservation
    pub next_id: u64,

    /// Active deposits, ascending by id
    pub deposits: Vec<Deposit>,
}

impl Default for DepositLedger {
    fn default() -> Self {
        Self {
            next_id: 1,
            deposits: Vec::new(),
        }
    }
}

impl DepositLedger {
    /// Serialized size for a ledger holding up to `capacity` deposits:
    /// next_id (8) + vec length prefix (4) + records
    pub fn space(capacity: usize) -> usize {
        8 + 4 + capacity * Deposit::SIZE
    }

    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    fn position(&self, deposit_id: u64) -> Result<usize> {
        self.deposits
            .iter()
            .position(|deposit| deposit.id == deposit_id)
            .ok_or_else(|| {
                msg!("Deposit {} not found", deposit_id);
                error!(KratosError::DepositNotFound)
            })
    }

    /// Look up an active deposit
    pub fn get(&self, deposit_id: u64) -> Result<&Deposit> {
        let index = self.position(deposit_id)?;
        Ok(&self.deposits[index])
    }

    /// Approved deposits still holding their slot, ascending by id
    pub fn used_slots(&self) -> impl Iterator<Item = &Deposit> {
        self.deposits.iter().filter(|deposit| deposit.is_used())
    }

    /// Reservations waiting for the operator, ascending by id
    pub fn pending_slots(&self) -> impl Iterator<Item = &Deposit> {
        self.deposits.iter().filter(|deposit| deposit.is_pending())
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Reserve a slot and open a pending deposit
    ///
    /// Returns the new deposit id. When the pool is exhausted nothing is
    /// recorded and the id counter does not move.
    pub fn request_deposit(
        &mut self,
        pool: &mut SlotPool,
        owner: Pubkey,
        principal: u64,
        lock_tier: LockTier,
        now: i64,
    ) -> Result<u64> {
        require!(principal > 0, KratosError::InvalidAmount);

        let deposit_id = self.next_id;
        let next_id = deposit_id
            .checked_add(1)
            .ok_or(error!(KratosError::MathOverflow))?;

        pool.reserve()?;

        self.deposits
            .push(Deposit::new_pending(deposit_id, owner, principal, lock_tier, now));
        self.next_id = next_id;

        Ok(deposit_id)
    }

    /// Check that a deposit can be approved, without changing anything
    ///
    /// Used by the controller before it pulls the depositor's funds.
    pub fn ensure_pending(&self, deposit_id: u64) -> Result<&Deposit> {
        let deposit = self.get(deposit_id)?;
        require!(deposit.is_pending(), KratosError::InvalidTransition);
        Ok(deposit)
    }

    /// Promote a pending deposit to used
    pub fn approve_deposit(
        &mut self,
        deposit_id: u64,
        lock_tier: LockTier,
        early_adopt_bonus: bool,
        now: i64,
    ) -> Result<&Deposit> {
        let index = self.position(deposit_id)?;
        require!(
            self.deposits[index].is_pending(),
            KratosError::InvalidTransition
        );

        let mut approved = self.deposits[index].clone();
        approved.approve_timestamp = now;
        approved.lock_tier = lock_tier;
        approved.has_early_adopt_bonus = early_adopt_bonus;
        approved.status = DepositStatus::Used;
        approved.refresh_predicted_yield()?;

        self.deposits[index] = approved;

        Ok(&self.deposits[index])
    }

    /// Drop a pending deposit and free its slot
    pub fn reject_deposit(&mut self, pool: &mut SlotPool, deposit_id: u64) -> Result<Deposit> {
        let index = self.position(deposit_id)?;
        require!(
            self.deposits[index].is_pending(),
            KratosError::InvalidTransition
        );

        pool.release()?;

        Ok(self.deposits.remove(index))
    }

    /// Quote and freeze the payout of a used deposit
    ///
    /// Only `Used` deposits can be quoted: a pending id is reported as not
    /// found, an already quoted one as an invalid transition.
    pub fn request_withdrawal(&mut self, deposit_id: u64, now: i64) -> Result<u64> {
        let index = self.position(deposit_id)?;
        let deposit = &self.deposits[index];

        match deposit.status {
            DepositStatus::Used => {}
            DepositStatus::Pending => return err!(KratosError::DepositNotFound),
            DepositStatus::WithdrawalRequested => return err!(KratosError::InvalidTransition),
        }

        let payout = deposit.payout_at(now)?;

        let deposit = &mut self.deposits[index];
        deposit.status = DepositStatus::WithdrawalRequested;
        deposit.withdrawal_requested_at = now;
        deposit.quoted_payout = payout;

        Ok(payout)
    }

    /// Payout owed for a used deposit at `now`, recomputed from scratch
    pub fn payout_at(&self, deposit_id: u64, now: i64) -> Result<u64> {
        let deposit = self.get(deposit_id)?;
        require!(deposit.is_used(), KratosError::DepositNotFound);
        deposit.payout_at(now)
    }

    /// Remove a used deposit after its payout went out, freeing the slot
    pub fn complete_withdrawal(&mut self, pool: &mut SlotPool, deposit_id: u64) -> Result<Deposit> {
        let index = self.position(deposit_id)?;
        require!(
            self.deposits[index].is_used(),
            KratosError::DepositNotFound
        );

        pool.release()?;

        Ok(self.deposits.remove(index))
    }

    /// Move a used deposit to a longer lock tier
    ///
    /// Any successful extension grants the extend bonus; whether it pays is
    /// decided at payout time by the elapsed lock.
    pub fn extend_lock_period(&mut self, deposit_id: u64, new_tier: LockTier) -> Result<&Deposit> {
        let index = self.position(deposit_id)?;
        let deposit = &self.deposits[index];

        require!(
            deposit.status == DepositStatus::Used,
            KratosError::InvalidTransition
        );
        require!(new_tier > deposit.lock_tier, KratosError::InvalidTransition);

        let mut extended = deposit.clone();
        extended.lock_tier = new_tier;
        extended.has_extend_period_bonus = true;
        extended.refresh_predicted_yield()?;

        self.deposits[index] = extended;

        Ok(&self.deposits[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use crate::test_utils::assert_kratos_error;

    const PRINCIPAL: u64 = 5000;

    fn setup(total_slots: u16) -> (DepositLedger, SlotPool) {
        (DepositLedger::default(), SlotPool::new(total_slots))
    }

    fn request(ledger: &mut DepositLedger, pool: &mut SlotPool) -> u64 {
        ledger
            .request_deposit(pool, Pubkey::new_unique(), PRINCIPAL, LockTier::SixMonths, 0)
            .unwrap()
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let (mut ledger, mut pool) = setup(3);

        let first = request(&mut ledger, &mut pool);
        let second = request(&mut ledger, &mut pool);
        assert_eq!((first, second), (1, 2));

        ledger.reject_deposit(&mut pool, second).unwrap();
        let third = request(&mut ledger, &mut pool);
        assert_eq!(third, 3);
    }

    #[test]
    fn test_request_beyond_capacity_leaves_no_record() {
        let (mut ledger, mut pool) = setup(2);
        request(&mut ledger, &mut pool);
        request(&mut ledger, &mut pool);

        let result =
            ledger.request_deposit(&mut pool, Pubkey::new_unique(), PRINCIPAL, LockTier::OneYear, 0);

        assert_kratos_error(result, KratosError::NoSlotsAvailable);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.next_id, 3);
        assert_eq!(pool.available_slots, 0);
    }

    #[test]
    fn test_request_keeps_tier_hint_while_pending() {
        let (mut ledger, mut pool) = setup(1);
        let owner = Pubkey::new_unique();

        let id = ledger
            .request_deposit(&mut pool, owner, PRINCIPAL, LockTier::ThreeYears, 42)
            .unwrap();

        let deposit = ledger.get(id).unwrap();
        assert_eq!(deposit.owner, owner);
        assert_eq!(deposit.lock_tier, LockTier::ThreeYears);
        assert_eq!(deposit.requested_at, 42);
        assert_eq!(deposit.approve_timestamp, 0);
        assert!(deposit.is_pending());
    }

    #[test]
    fn test_approve_stamps_and_promotes() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);

        let deposit = ledger
            .approve_deposit(id, LockTier::TwoYears, true, 1_000)
            .unwrap();

        assert_eq!(deposit.status, DepositStatus::Used);
        assert_eq!(deposit.approve_timestamp, 1_000);
        assert_eq!(deposit.lock_tier, LockTier::TwoYears);
        assert!(deposit.has_early_adopt_bonus);
        assert!(!deposit.has_extend_period_bonus);
        // 730 + 7 days crosses into the 6% tier, plus 1% early adopt
        assert_eq!(deposit.predicted_yield, PRINCIPAL * 7 * 737 / 36_500);
        assert_eq!(ledger.used_slots().count(), 1);
        assert_eq!(ledger.pending_slots().count(), 0);
        // approval does not touch availability
        assert_eq!(pool.available_slots, 0);
    }

    #[test]
    fn test_approve_twice_is_invalid() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::OneYear, false, 0).unwrap();

        assert_kratos_error(
            ledger.approve_deposit(id, LockTier::FiveYears, true, 5),
            KratosError::InvalidTransition,
        );
        assert_eq!(ledger.get(id).unwrap().lock_tier, LockTier::OneYear);
        assert_kratos_error(ledger.ensure_pending(id), KratosError::InvalidTransition);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (mut ledger, mut pool) = setup(1);

        assert_kratos_error(ledger.get(7), KratosError::DepositNotFound);
        assert_kratos_error(
            ledger.approve_deposit(7, LockTier::OneYear, false, 0),
            KratosError::DepositNotFound,
        );
        assert_kratos_error(ledger.reject_deposit(&mut pool, 7), KratosError::DepositNotFound);
        assert_kratos_error(ledger.request_withdrawal(7, 0), KratosError::DepositNotFound);
        assert_kratos_error(ledger.complete_withdrawal(&mut pool, 7), KratosError::DepositNotFound);
        assert_kratos_error(
            ledger.extend_lock_period(7, LockTier::OneYear),
            KratosError::DepositNotFound,
        );
    }

    #[test]
    fn test_reject_restores_slot_and_removes_record() {
        let (mut ledger, mut pool) = setup(2);
        let kept = request(&mut ledger, &mut pool);
        let rejected = request(&mut ledger, &mut pool);
        assert_eq!(pool.available_slots, 0);

        let removed = ledger.reject_deposit(&mut pool, rejected).unwrap();

        assert_eq!(removed.id, rejected);
        assert_eq!(pool.available_slots, 1);
        assert_kratos_error(ledger.get(rejected), KratosError::DepositNotFound);
        assert!(ledger.get(kept).is_ok());
        assert!(ledger.used_slots().all(|deposit| deposit.id != rejected));
    }

    #[test]
    fn test_reject_used_deposit_is_invalid() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::OneYear, false, 0).unwrap();

        assert_kratos_error(ledger.reject_deposit(&mut pool, id), KratosError::InvalidTransition);
        assert_eq!(pool.available_slots, 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_request_withdrawal_freezes_quote() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::SixMonths, true, 0).unwrap();

        let now = 1300 * SECONDS_PER_DAY;
        let payout = ledger.request_withdrawal(id, now).unwrap();

        assert_eq!(payout, 6432);
        let deposit = ledger.get(id).unwrap();
        assert_eq!(deposit.status, DepositStatus::WithdrawalRequested);
        assert_eq!(deposit.quoted_payout, 6432);
        assert_eq!(deposit.withdrawal_requested_at, now);
        // still holding its slot
        assert_eq!(ledger.used_slots().count(), 1);
    }

    #[test]
    fn test_request_withdrawal_state_rules() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);

        assert_kratos_error(ledger.request_withdrawal(id, 0), KratosError::DepositNotFound);

        ledger.approve_deposit(id, LockTier::OneYear, false, 0).unwrap();
        ledger.request_withdrawal(id, 10).unwrap();

        assert_kratos_error(ledger.request_withdrawal(id, 20), KratosError::InvalidTransition);
        assert_eq!(ledger.get(id).unwrap().withdrawal_requested_at, 10);
    }

    #[test]
    fn test_payout_is_recomputed_after_quote() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::OneYear, false, 0).unwrap();

        let quoted = ledger.request_withdrawal(id, 200 * SECONDS_PER_DAY).unwrap();
        let later = ledger.payout_at(id, 400 * SECONDS_PER_DAY).unwrap();

        // 207 days at 5% vs 407 days at 5%
        assert_eq!(quoted, PRINCIPAL + PRINCIPAL * 5 * 207 / 36_500);
        assert_eq!(later, PRINCIPAL + PRINCIPAL * 5 * 407 / 36_500);
    }

    #[test]
    fn test_complete_withdrawal_from_used_or_requested() {
        let (mut ledger, mut pool) = setup(2);
        let direct = request(&mut ledger, &mut pool);
        let quoted = request(&mut ledger, &mut pool);
        ledger.approve_deposit(direct, LockTier::OneYear, false, 0).unwrap();
        ledger.approve_deposit(quoted, LockTier::OneYear, false, 0).unwrap();
        ledger.request_withdrawal(quoted, 0).unwrap();

        ledger.complete_withdrawal(&mut pool, direct).unwrap();
        ledger.complete_withdrawal(&mut pool, quoted).unwrap();

        assert!(ledger.is_empty());
        assert_eq!(pool.available_slots, 2);
    }

    #[test]
    fn test_complete_withdrawal_of_pending_is_not_found() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);

        assert_kratos_error(ledger.complete_withdrawal(&mut pool, id), KratosError::DepositNotFound);
        assert_eq!(pool.available_slots, 0);
        assert!(ledger.get(id).unwrap().is_pending());
    }

    #[test]
    fn test_extend_sets_bonus_and_tier() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::OneYear, false, 0).unwrap();

        let deposit = ledger.extend_lock_period(id, LockTier::ThreeYears).unwrap();

        assert_eq!(deposit.lock_tier, LockTier::ThreeYears);
        assert!(deposit.has_extend_period_bonus);
        // 1095 + 7 days is in the 7% tier, plus 1% extend
        assert_eq!(deposit.predicted_yield, PRINCIPAL * 8 * 1102 / 36_500);
    }

    #[test]
    fn test_extend_to_same_or_lower_tier_fails() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::TwoYears, false, 0).unwrap();

        for tier in [LockTier::SixMonths, LockTier::OneYear, LockTier::TwoYears] {
            assert_kratos_error(ledger.extend_lock_period(id, tier), KratosError::InvalidTransition);
        }

        let deposit = ledger.get(id).unwrap();
        assert_eq!(deposit.lock_tier, LockTier::TwoYears);
        assert!(!deposit.has_extend_period_bonus);
    }

    #[test]
    fn test_extend_to_six_months_always_fails() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::SixMonths, false, 0).unwrap();

        assert_kratos_error(
            ledger.extend_lock_period(id, LockTier::SixMonths),
            KratosError::InvalidTransition,
        );
    }

    #[test]
    fn test_extend_requires_used_state() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);

        assert_kratos_error(
            ledger.extend_lock_period(id, LockTier::OneYear),
            KratosError::InvalidTransition,
        );

        ledger.approve_deposit(id, LockTier::SixMonths, false, 0).unwrap();
        ledger.request_withdrawal(id, 0).unwrap();

        assert_kratos_error(
            ledger.extend_lock_period(id, LockTier::OneYear),
            KratosError::InvalidTransition,
        );
    }

    #[test]
    fn test_late_extension_still_grants_bonus() {
        let (mut ledger, mut pool) = setup(1);
        let id = request(&mut ledger, &mut pool);
        ledger.approve_deposit(id, LockTier::FourYears, false, 0).unwrap();

        ledger.extend_lock_period(id, LockTier::FiveYears).unwrap();

        // extended after four years: bonus flag set, and it pays since > 365 days
        let now = 1500 * SECONDS_PER_DAY;
        assert!(ledger.get(id).unwrap().has_extend_period_bonus);
        assert_eq!(
            ledger.payout_at(id, now).unwrap(),
            PRINCIPAL + PRINCIPAL * 9 * 1507 / 36_500
        );
    }

    #[test]
    fn test_listings_are_in_id_order() {
        let (mut ledger, mut pool) = setup(5);
        let ids: Vec<u64> = (0..5).map(|_| request(&mut ledger, &mut pool)).collect();

        for id in [ids[3], ids[0], ids[4]] {
            ledger.approve_deposit(id, LockTier::OneYear, false, 0).unwrap();
        }
        ledger.reject_deposit(&mut pool, ids[1]).unwrap();

        let used: Vec<u64> = ledger.used_slots().map(|deposit| deposit.id).collect();
        let pending: Vec<u64> = ledger.pending_slots().map(|deposit| deposit.id).collect();

        assert_eq!(used, vec![ids[0], ids[3], ids[4]]);
        assert_eq!(pending, vec![ids[2]]);
    }
}

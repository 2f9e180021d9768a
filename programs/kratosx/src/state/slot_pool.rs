// =============================================================================
// Slot Pool
// =============================================================================
// Fixed-capacity admission control for the vault.
//
// A slot is taken as soon as a deposit is requested (not when it is
// approved), so pending and approved deposits together can never exceed
// total_slots. The slot comes back when the request is rejected or the
// deposit is withdrawn.
// =============================================================================

use anchor_lang::prelude::*;

use crate::error::KratosError;

/// Slot counters embedded in the Vault account.
///
/// Invariant: `available_slots <= total_slots`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotPool {
    /// Capacity, fixed at vault initialization
    pub total_slots: u16,

    /// Slots that are neither pending nor in use
    pub available_slots: u16,
}

impl SlotPool {
    /// Serialized size: total_slots (2) + available_slots (2)
    pub const SIZE: usize = 2 + 2;

    /// Create a pool with every slot available
    pub fn new(total_slots: u16) -> Self {
        Self {
            total_slots,
            available_slots: total_slots,
        }
    }

    /// Take one slot for a new deposit request
    ///
    /// Fails with `NoSlotsAvailable` and leaves the counters untouched when
    /// the pool is exhausted.
    pub fn reserve(&mut self) -> Result<()> {
        require!(!self.is_exhausted(), KratosError::NoSlotsAvailable);

        self.available_slots -= 1;

        Ok(())
    }

    /// Give a slot back after a rejection or a completed withdrawal
    pub fn release(&mut self) -> Result<()> {
        require!(
            self.available_slots < self.total_slots,
            KratosError::SlotAccountingMismatch
        );

        self.available_slots += 1;

        Ok(())
    }

    /// Slots currently pending or in use
    pub fn occupied_slots(&self) -> u16 {
        self.total_slots - self.available_slots
    }

    pub fn is_exhausted(&self) -> bool {
        self.available_slots == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_kratos_error;

    #[test]
    fn test_reserve_until_exhausted() {
        let mut pool = SlotPool::new(3);

        for expected_left in [2, 1, 0] {
            pool.reserve().unwrap();
            assert_eq!(pool.available_slots, expected_left);
        }

        assert!(pool.is_exhausted());
        assert_eq!(pool.occupied_slots(), 3);
    }

    #[test]
    fn test_reserve_on_empty_pool_changes_nothing() {
        let mut pool = SlotPool::new(1);
        pool.reserve().unwrap();

        assert_kratos_error(pool.reserve(), KratosError::NoSlotsAvailable);
        assert_kratos_error(pool.reserve(), KratosError::NoSlotsAvailable);
        assert_eq!(pool, SlotPool { total_slots: 1, available_slots: 0 });
    }

    #[test]
    fn test_release_returns_slot() {
        let mut pool = SlotPool::new(2);
        pool.reserve().unwrap();
        pool.reserve().unwrap();

        pool.release().unwrap();
        assert_eq!(pool.available_slots, 1);

        pool.reserve().unwrap();
        assert!(pool.is_exhausted());
    }

    #[test]
    fn test_release_never_exceeds_total() {
        let mut pool = SlotPool::new(2);

        assert_kratos_error(pool.release(), KratosError::SlotAccountingMismatch);
        assert_eq!(pool.available_slots, 2);
    }

    #[test]
    fn test_zero_capacity_pool_rejects_everything() {
        let mut pool = SlotPool::new(0);

        assert!(pool.is_exhausted());
        assert_kratos_error(pool.reserve(), KratosError::NoSlotsAvailable);
    }
}

// =============================================================================
// KratosX Events
// =============================================================================
// One event per state change, emitted with emit! next to the msg! log line.
// Indexers can rebuild the deposit ledger from these alone.
// =============================================================================

use anchor_lang::prelude::*;

use crate::state::LockTier;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub deposit_mint: Pubkey,
    pub operator: Pubkey,
    pub total_slots: u16,
    pub slot_value: u64,
}

#[event]
pub struct DepositRequested {
    pub deposit_id: u64,
    pub owner: Pubkey,
}

#[event]
pub struct DepositApproved {
    pub owner: Pubkey,
    pub deposit_id: u64,
    pub lock_tier: LockTier,
    pub has_early_adopt_bonus: bool,
}

#[event]
pub struct DepositRejected {
    pub owner: Pubkey,
    pub deposit_id: u64,
}

#[event]
pub struct WithdrawRequested {
    pub deposit_id: u64,
    pub amount: u64,
}

#[event]
pub struct WithdrawExecuted {
    pub deposit_id: u64,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct LockPeriodExtended {
    pub deposit_id: u64,
    pub lock_tier: LockTier,
}

#[event]
pub struct ReserveFunded {
    pub funder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PauseSet {
    pub paused: bool,
}

#[event]
pub struct OperatorSet {
    pub operator: Pubkey,
}

#[event]
pub struct EarlyAdoptBonusSet {
    pub active: bool,
}

#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

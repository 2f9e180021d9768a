// =============================================================================
// Vault State Account
// =============================================================================
// The Vault account is the single piece of mutable state of a KratosX vault:
// authorities, slot configuration, the slot pool and the deposit ledger.
//
// Because every mutating instruction writes this account, the runtime's
// account lock serializes them; there is never more than one transition in
// flight.
//
// Token movement stays outside: the methods that need funds to move take a
// closure that performs the transfer. The closure runs after all validation
// and before any write, so a failed transfer leaves the vault untouched.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::KratosError;
use crate::state::{Deposit, DepositLedger, LockTier, SlotPool};

/// The KratosX vault.
///
/// This account is a PDA derived from ["kratosx_vault", deposit_mint_pubkey].
/// Its size depends on `total_slots`, see [`Vault::space`].
#[account]
#[derive(Default)]
pub struct Vault {
    // =========================================================================
    // Authorities
    // =========================================================================

    /// Can pause, rotate the operator, toggle the early-adopt promotion
    pub admin: Pubkey,

    /// Approves and rejects deposit requests
    pub operator: Pubkey,

    // =========================================================================
    // Token Accounts
    // =========================================================================

    /// The stablecoin accepted by this vault (e.g., USDC)
    pub deposit_mint: Pubkey,

    /// PDA token account holding principal and yield funds
    pub reserve: Pubkey,

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Principal of every deposit: total_amount / total_slots
    pub slot_value: u64,

    /// Promotion applied to deposits approved while it is on
    pub early_adopt_bonus_active: bool,

    /// Entry gate: blocks new requests, approvals and extensions
    pub is_paused: bool,

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Principal of all approved deposits still in the vault
    pub total_principal_locked: u64,

    /// Everything paid out to depositors (principal + yield, cumulative)
    pub total_paid_out: u64,

    /// Yield part of `total_paid_out`
    pub total_yield_paid: u64,

    // =========================================================================
    // Slots & Deposits
    // =========================================================================

    pub pool: SlotPool,

    pub ledger: DepositLedger,

    // =========================================================================
    // PDA Bumps
    // =========================================================================

    pub bump: u8,

    pub reserve_bump: u8,
}

impl Vault {
    /// Account size for a vault with `total_slots` slots, discriminator included
    pub fn space(total_slots: u16) -> usize {
        8 + // discriminator
        32 + // admin
        32 + // operator
        32 + // deposit_mint
        32 + // reserve
        8 +  // slot_value
        1 +  // early_adopt_bonus_active
        1 +  // is_paused
        8 +  // total_principal_locked
        8 +  // total_paid_out
        8 +  // total_yield_paid
        SlotPool::SIZE +
        DepositLedger::space(total_slots as usize) +
        1 +  // bump
        1 // reserve_bump
    }

    /// Split `total_amount` into `total_slots` equal slots
    pub fn configure_slots(&mut self, total_amount: u64, total_slots: u16) -> Result<()> {
        require!(
            total_slots > 0 && total_slots <= MAX_TOTAL_SLOTS,
            KratosError::InvalidSlotConfig
        );
        require!(
            total_amount % total_slots as u64 == 0,
            KratosError::InvalidSlotConfig
        );

        require!(self.ledger.is_empty(), KratosError::InvalidSlotConfig);

        let slot_value = total_amount / total_slots as u64;
        require!(slot_value > 0, KratosError::InvalidAmount);

        self.slot_value = slot_value;
        self.pool = SlotPool::new(total_slots);
        self.ledger = DepositLedger::default();

        Ok(())
    }

    pub fn is_operator(&self, key: &Pubkey) -> bool {
        self.operator == *key
    }

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }

    pub fn available_slot_count(&self) -> u16 {
        self.pool.available_slots
    }

    /// Operator-only transitions check this before anything else
    fn ensure_operator(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_operator(caller), KratosError::Unauthorized);
        Ok(())
    }

    /// Entry gate for new requests, approvals and extensions
    fn ensure_open(&self) -> Result<()> {
        require!(!self.is_paused, KratosError::VaultPaused);
        Ok(())
    }

    /// Principal of every pending request held by `owner`
    ///
    /// This is the allowance the vault needs on the owner's token account,
    /// so a rejected request stops counting the next time it is reset.
    pub fn pending_principal_of(&self, owner: &Pubkey) -> Result<u64> {
        self.ledger
            .pending_slots()
            .filter(|deposit| deposit.owner == *owner)
            .try_fold(0u64, |total, deposit| {
                total
                    .checked_add(deposit.principal)
                    .ok_or(error!(KratosError::MathOverflow))
            })
    }

    // =========================================================================
    // Deposit Lifecycle
    // =========================================================================

    /// Reserve a slot for `owner`; returns the deposit id
    pub fn request_deposit(
        &mut self,
        owner: Pubkey,
        tier_hint: Option<LockTier>,
        now: i64,
    ) -> Result<u64> {
        self.ensure_open()?;

        self.ledger.request_deposit(
            &mut self.pool,
            owner,
            self.slot_value,
            tier_hint.unwrap_or_default(),
            now,
        )
    }

    /// Approve a pending deposit once `pull` has moved its principal in
    ///
    /// `pull` receives the pending record and must transfer `principal` from
    /// the depositor to the reserve. If it fails nothing changes.
    pub fn approve_deposit<F>(
        &mut self,
        caller: &Pubkey,
        deposit_id: u64,
        lock_tier: LockTier,
        now: i64,
        pull: F,
    ) -> Result<Deposit>
    where
        F: FnOnce(&Deposit) -> Result<()>,
    {
        self.ensure_operator(caller)?;
        self.ensure_open()?;

        let pending = self.ledger.ensure_pending(deposit_id)?.clone();
        let total_principal_locked = self
            .total_principal_locked
            .checked_add(pending.principal)
            .ok_or(error!(KratosError::MathOverflow))?;

        pull(&pending)?;

        let approved = self
            .ledger
            .approve_deposit(deposit_id, lock_tier, self.early_adopt_bonus_active, now)?
            .clone();
        self.total_principal_locked = total_principal_locked;

        Ok(approved)
    }

    /// Reject a pending deposit; no funds have moved yet so none move now
    /// Not gated by the pause: a rejection only ever frees capacity
    pub fn reject_deposit(&mut self, caller: &Pubkey, deposit_id: u64) -> Result<Deposit> {
        self.ensure_operator(caller)?;
        self.ledger.reject_deposit(&mut self.pool, deposit_id)
    }

    /// Freeze a payout quote for a used deposit
    pub fn request_withdrawal(&mut self, deposit_id: u64, now: i64) -> Result<u64> {
        self.ledger.request_withdrawal(deposit_id, now)
    }

    /// Pay out a used deposit and free its slot
    ///
    /// The payout is recomputed at `now`; a frozen quote is informational.
    /// `push` receives the record and the payout and must transfer it from
    /// the reserve to the owner. If it fails nothing changes.
    ///
    /// Returns the removed record and the amount paid.
    pub fn execute_withdraw<F>(&mut self, deposit_id: u64, now: i64, push: F) -> Result<(Deposit, u64)>
    where
        F: FnOnce(&Deposit, u64) -> Result<()>,
    {
        let payout = self.ledger.payout_at(deposit_id, now)?;
        let deposit = self.ledger.get(deposit_id)?.clone();

        let yield_paid = payout
            .checked_sub(deposit.principal)
            .ok_or(error!(KratosError::MathUnderflow))?;
        let total_principal_locked = self
            .total_principal_locked
            .checked_sub(deposit.principal)
            .ok_or(error!(KratosError::MathUnderflow))?;
        let total_paid_out = self
            .total_paid_out
            .checked_add(payout)
            .ok_or(error!(KratosError::MathOverflow))?;
        let total_yield_paid = self
            .total_yield_paid
            .checked_add(yield_paid)
            .ok_or(error!(KratosError::MathOverflow))?;
        require!(
            self.pool.available_slots < self.pool.total_slots,
            KratosError::SlotAccountingMismatch
        );

        push(&deposit, payout)?;

        let removed = self.ledger.complete_withdrawal(&mut self.pool, deposit_id)?;
        self.total_principal_locked = total_principal_locked;
        self.total_paid_out = total_paid_out;
        self.total_yield_paid = total_yield_paid;

        Ok((removed, payout))
    }

    /// Extend the lock tier of a used deposit; only its owner may do this
    pub fn extend_lock_period(
        &mut self,
        caller: &Pubkey,
        deposit_id: u64,
        new_tier: LockTier,
    ) -> Result<Deposit> {
        let owner = self.ledger.get(deposit_id)?.owner;
        require_keys_eq!(owner, *caller, KratosError::Unauthorized);
        self.ensure_open()?;

        Ok(self.ledger.extend_lock_period(deposit_id, new_tier)?.clone())
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// A page of approved deposits, ascending by id
    pub fn used_slots_page(&self, offset: u32, limit: u8) -> Vec<Deposit> {
        Self::page(self.ledger.used_slots(), offset, limit)
    }

    /// A page of pending deposits, ascending by id
    pub fn pending_slots_page(&self, offset: u32, limit: u8) -> Vec<Deposit> {
        Self::page(self.ledger.pending_slots(), offset, limit)
    }

    fn page<'a>(deposits: impl Iterator<Item = &'a Deposit>, offset: u32, limit: u8) -> Vec<Deposit> {
        deposits
            .skip(offset as usize)
            .take(limit.min(MAX_SLOTS_PER_PAGE) as usize)
            .cloned()
            .collect()
    }
}

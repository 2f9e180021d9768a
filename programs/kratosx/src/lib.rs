// =============================================================================
// KratosX - Time-Locked Stablecoin Vault
// =============================================================================
//
// KratosX is a fixed-capacity deposit vault on Solana where:
// - The vault is split into equal slots; each deposit fills exactly one
// - Depositors request a slot, an operator approves or rejects the request
// - Approved principal is locked and earns a fixed yield based on how long
//   it stays (5% to 9% a year, plus early-adopt and extend bonuses)
// - Withdrawals pay principal + yield out of the vault reserve
//
// This is the main entry point for the KratosX Anchor program.
// =============================================================================

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod yield_calculator;

#[cfg(test)]
pub mod test_utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("7EhoUeYzjKJB27aoMA4tXoLc9kj6bESVyzwjsN2rUbAe");

/// The KratosX program module
#[program]
pub mod kratosx {
    use super::*;

    // =========================================================================
    // Vault Initialization
    // =========================================================================

    /// Initialize a new KratosX vault
    ///
    /// Creates:
    /// - Vault account (configuration, slot pool and deposit ledger)
    /// - Reserve token account (holds principal and yield funds)
    ///
    /// # Arguments
    /// * `total_amount` - Vault capacity in deposit token base units
    /// * `total_slots` - Number of slots; must divide `total_amount` evenly
    ///
    /// Can only be called once per deposit token (e.g., USDC)
    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        total_amount: u64,
        total_slots: u16,
    ) -> Result<()> {
        instructions::initialize_vault::handler_initialize_vault(ctx, total_amount, total_slots)
    }

    // =========================================================================
    // Depositor Operations
    // =========================================================================

    /// Reserve a slot and delegate one slot_value to the vault
    ///
    /// # Returns
    /// * The new deposit id
    pub fn request_deposit(ctx: Context<RequestDeposit>, lock_tier: Option<LockTier>) -> Result<u64> {
        instructions::request_deposit::handler_request_deposit(ctx, lock_tier)
    }

    /// Quote the payout of an approved deposit and mark it for withdrawal
    ///
    /// # Returns
    /// * principal + yield, counting a 7 day cool-down buffer
    pub fn request_withdrawal(ctx: Context<RequestWithdrawal>, deposit_id: u64) -> Result<u64> {
        instructions::request_withdrawal::handler_request_withdrawal(ctx, deposit_id)
    }

    /// Pay principal + yield to the deposit owner and free the slot
    pub fn execute_withdraw(ctx: Context<ExecuteWithdraw>, deposit_id: u64) -> Result<()> {
        instructions::execute_withdraw::handler_execute_withdraw(ctx, deposit_id)
    }

    /// Move an approved deposit to another lock tier (owner only)
    ///
    /// Sets the extend bonus: +1% once the deposit has been locked a year.
    pub fn extend_lock_period(
        ctx: Context<ExtendLockPeriod>,
        deposit_id: u64,
        lock_tier: LockTier,
    ) -> Result<()> {
        instructions::extend_lock_period::handler_extend_lock_period(ctx, deposit_id, lock_tier)
    }

    /// Top up the reserve that pays yield
    pub fn fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
        instructions::fund_reserve::handler_fund_reserve(ctx, amount)
    }

    // =========================================================================
    // Operator Operations
    // =========================================================================

    /// Approve a pending deposit; pulls the principal into the reserve
    ///
    /// # Arguments
    /// * `deposit_id` - The pending deposit
    /// * `lock_tier` - Lock tier granted to the deposit
    pub fn approve_deposit(
        ctx: Context<ApproveDeposit>,
        deposit_id: u64,
        lock_tier: LockTier,
    ) -> Result<()> {
        instructions::approve_deposit::handler_approve_deposit(ctx, deposit_id, lock_tier)
    }

    /// Reject a pending deposit and release its slot
    pub fn reject_deposit(ctx: Context<RejectDeposit>, deposit_id: u64) -> Result<()> {
        instructions::reject_deposit::handler_reject_deposit(ctx, deposit_id)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Yield owed on `principal` after `elapsed_days` (pure)
    pub fn calculate_yield(
        ctx: Context<CalculateYield>,
        principal: u64,
        elapsed_days: u64,
        early_adopt_bonus: bool,
        extend_bonus: bool,
    ) -> Result<u64> {
        instructions::views::handler_calculate_yield(
            ctx,
            principal,
            elapsed_days,
            early_adopt_bonus,
            extend_bonus,
        )
    }

    pub fn get_available_slot_count(ctx: Context<ViewVault>) -> Result<u16> {
        instructions::views::handler_get_available_slot_count(ctx)
    }

    /// Approved deposits, at most 10 per page
    pub fn get_used_slots(ctx: Context<ViewVault>, offset: u32, limit: u8) -> Result<Vec<Deposit>> {
        instructions::views::handler_get_used_slots(ctx, offset, limit)
    }

    /// Pending deposits, at most 10 per page
    pub fn get_pending_slots(
        ctx: Context<ViewVault>,
        offset: u32,
        limit: u8,
    ) -> Result<Vec<Deposit>> {
        instructions::views::handler_get_pending_slots(ctx, offset, limit)
    }

    // =========================================================================
    // Admin Operations
    // =========================================================================

    /// Pause or unpause the vault (admin only)
    ///
    /// When paused:
    /// * No deposit requests
    /// * No approvals
    /// * No lock extensions
    ///
    /// Rejections and withdrawals stay open.
    pub fn set_paused(ctx: Context<UpdateVaultConfig>, paused: bool) -> Result<()> {
        instructions::admin::handler_set_paused(ctx, paused)
    }

    /// Turn the early-adopt promotion on or off (admin only)
    pub fn set_early_adopt_bonus(ctx: Context<UpdateVaultConfig>, active: bool) -> Result<()> {
        instructions::admin::handler_set_early_adopt_bonus(ctx, active)
    }

    /// Replace the operator (admin only)
    pub fn set_operator(ctx: Context<SetOperator>) -> Result<()> {
        instructions::admin::handler_set_operator(ctx)
    }

    /// Transfer admin rights to a new address (admin only)
    ///
    /// # Warning
    /// * This is irreversible!
    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        instructions::admin::handler_transfer_admin(ctx)
    }
}

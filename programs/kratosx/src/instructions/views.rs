// =============================================================================
// View Instructions
// =============================================================================
// Read-only queries. Results come back as instruction return data, so they
// are meant to be simulated rather than sent.
//
// Slot listings are paginated: return data is capped at 1024 bytes, which
// fits MAX_SLOTS_PER_PAGE deposit records.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{Deposit, Vault};
use crate::yield_calculator;

/// calculate_yield needs no accounts
#[derive(Accounts)]
pub struct CalculateYield {}

/// Accounts for the vault-backed views
#[derive(Accounts)]
pub struct ViewVault<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,
}

/// Yield owed on `principal` after `elapsed_days`
pub fn handler_calculate_yield(
    _ctx: Context<CalculateYield>,
    principal: u64,
    elapsed_days: u64,
    early_adopt_bonus: bool,
    extend_bonus: bool,
) -> Result<u64> {
    yield_calculator::calculate_yield(principal, elapsed_days, early_adopt_bonus, extend_bonus)
}

pub fn handler_get_available_slot_count(ctx: Context<ViewVault>) -> Result<u16> {
    Ok(ctx.accounts.vault.available_slot_count())
}

/// Approved deposits, ascending by id
pub fn handler_get_used_slots(ctx: Context<ViewVault>, offset: u32, limit: u8) -> Result<Vec<Deposit>> {
    let page = ctx.accounts.vault.used_slots_page(offset, limit);
    msg!("Used slots: {} from offset {}", page.len(), offset);
    Ok(page)
}

/// Deposits awaiting operator review, ascending by id
pub fn handler_get_pending_slots(
    ctx: Context<ViewVault>,
    offset: u32,
    limit: u8,
) -> Result<Vec<Deposit>> {
    let page = ctx.accounts.vault.pending_slots_page(offset, limit);
    msg!("Pending slots: {} from offset {}", page.len(), offset);
    Ok(page)
}

// =============================================================================
// Extend Lock Period Instruction
// =============================================================================
// The owner of an approved deposit moves it to a different lock tier and
// earns the extend bonus (+1%, paid once the deposit has aged a year).
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::LockPeriodExtended;
use crate::state::{LockTier, Vault};

/// Accounts required for the extend_lock_period instruction
#[derive(Accounts)]
pub struct ExtendLockPeriod<'info> {
    /// Must own the deposit (checked against the record)
    /// The pause gate is checked by the vault
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,
}

/// Handler for the extend_lock_period instruction
pub fn handler_extend_lock_period(
    ctx: Context<ExtendLockPeriod>,
    deposit_id: u64,
    lock_tier: LockTier,
) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let extended = ctx
        .accounts
        .vault
        .extend_lock_period(&owner, deposit_id, lock_tier)?;

    msg!(
        "Deposit {} extended to {:?}, predicted yield: {}",
        extended.id,
        extended.lock_tier,
        extended.predicted_yield
    );

    emit!(LockPeriodExtended {
        deposit_id: extended.id,
        lock_tier: extended.lock_tier,
    });

    Ok(())
}

// =============================================================================
// Admin Instructions
// =============================================================================
// Functions only the vault admin can call:
// - set_paused: gate new deposits, approvals and extensions
// - set_operator: replace the wallet that reviews deposit requests
// - set_early_adopt_bonus: toggle the promotion for future approvals
// - transfer_admin: hand the vault to a new admin
//
// Withdrawals and rejections are never gated, so a pause cannot trap funds.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::KratosError;
use crate::events::{AdminTransferred, EarlyAdoptBonusSet, OperatorSet, PauseSet};
use crate::state::Vault;

/// Accounts shared by the admin flag setters
#[derive(Accounts)]
pub struct UpdateVaultConfig<'info> {
    #[account(
        constraint = vault.is_admin(&admin.key()) @ KratosError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,
}

// =============================================================================
// Pause
// =============================================================================

pub fn handler_set_paused(ctx: Context<UpdateVaultConfig>, paused: bool) -> Result<()> {
    let vault = &mut ctx.accounts.vault;

    if vault.is_paused == paused {
        msg!(
            "Vault is already {}",
            if paused { "paused" } else { "unpaused" }
        );
        return Ok(());
    }

    vault.is_paused = paused;

    msg!(
        "Vault {} by admin {}",
        if paused { "PAUSED" } else { "UNPAUSED" },
        ctx.accounts.admin.key()
    );

    emit!(PauseSet { paused });

    Ok(())
}

// =============================================================================
// Early Adopt Bonus
// =============================================================================

/// Only affects deposits approved after the change
pub fn handler_set_early_adopt_bonus(ctx: Context<UpdateVaultConfig>, active: bool) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.early_adopt_bonus_active = active;

    msg!("Early adopt bonus {}", if active { "ON" } else { "OFF" });

    emit!(EarlyAdoptBonusSet { active });

    Ok(())
}

// =============================================================================
// Operator
// =============================================================================

#[derive(Accounts)]
pub struct SetOperator<'info> {
    #[account(
        constraint = vault.is_admin(&admin.key()) @ KratosError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: Only the address is stored
    pub new_operator: UncheckedAccount<'info>,
}

pub fn handler_set_operator(ctx: Context<SetOperator>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let new_operator = ctx.accounts.new_operator.key();

    require!(new_operator != Pubkey::default(), KratosError::InvalidAuthority);
    require!(new_operator != vault.operator, KratosError::InvalidAuthority);

    let previous = vault.operator;
    vault.operator = new_operator;

    msg!("Operator changed: {} -> {}", previous, new_operator);

    emit!(OperatorSet {
        operator: new_operator,
    });

    Ok(())
}

// =============================================================================
// Admin Transfer
// =============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        constraint = vault.is_admin(&admin.key()) @ KratosError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: Only the address is stored
    pub new_admin: UncheckedAccount<'info>,
}

pub fn handler_transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let new_admin = ctx.accounts.new_admin.key();

    require!(new_admin != Pubkey::default(), KratosError::InvalidAuthority);
    require!(new_admin != vault.admin, KratosError::InvalidAuthority);

    let previous_admin = vault.admin;
    vault.admin = new_admin;

    msg!("Admin transferred: {} -> {}", previous_admin, new_admin);

    emit!(AdminTransferred {
        previous_admin,
        new_admin,
    });

    Ok(())
}

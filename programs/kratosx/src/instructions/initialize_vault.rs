// =============================================================================
// Initialize Vault Instruction
// =============================================================================
// Creates a new KratosX vault for one deposit token.
//
// The vault is split into `total_slots` equal slots; every deposit is worth
// exactly one slot: slot_value = total_amount / total_slots.
// Example: 500,000 USDC over 100 slots = 5,000 USDC per deposit.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::KratosError;
use crate::events::VaultInitialized;
use crate::state::Vault;

/// Accounts required for the initialize_vault instruction.
#[derive(Accounts)]
#[instruction(total_amount: u64, total_slots: u16)]
pub struct InitializeVault<'info> {
    // =========================================================================
    // Signers
    // =========================================================================

    /// The admin who will control the vault
    /// Pays for the accounts and is stored as vault.admin
    #[account(mut)]
    pub admin: Signer<'info>,

    // =========================================================================
    // Vault Account (PDA - created by this instruction)
    // =========================================================================

    /// The Vault account to create, sized for `total_slots` deposits
    #[account(
        init,
        payer = admin,
        space = Vault::space(total_slots.min(MAX_TOTAL_SLOTS)),
        seeds = [VAULT_SEED, deposit_mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    // =========================================================================
    // Token Accounts
    // =========================================================================

    /// The stablecoin depositors lock (e.g., USDC)
    pub deposit_mint: Account<'info, Mint>,

    /// The reserve that holds principal and yield funds (PDA-owned)
    #[account(
        init,
        payer = admin,
        token::mint = deposit_mint,
        token::authority = vault,
        seeds = [RESERVE_SEED, vault.key().as_ref()],
        bump
    )]
    pub reserve: Account<'info, TokenAccount>,

    /// The wallet allowed to approve and reject deposit requests
    /// CHECK: Only the address is stored
    #[account(
        constraint = operator.key() != Pubkey::default() @ KratosError::InvalidAuthority
    )]
    pub operator: UncheckedAccount<'info>,

    // =========================================================================
    // Programs
    // =========================================================================

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Handler function for initialize_vault
pub fn handler_initialize_vault(
    ctx: Context<InitializeVault>,
    total_amount: u64,
    total_slots: u16,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;

    // =========================================================================
    // Store account references
    // =========================================================================

    vault.admin = ctx.accounts.admin.key();
    vault.operator = ctx.accounts.operator.key();
    vault.deposit_mint = ctx.accounts.deposit_mint.key();
    vault.reserve = ctx.accounts.reserve.key();

    // =========================================================================
    // Slots & configuration
    // =========================================================================

    vault.configure_slots(total_amount, total_slots)?;
    vault.early_adopt_bonus_active = DEFAULT_EARLY_ADOPT_BONUS;
    vault.is_paused = false;

    vault.total_principal_locked = 0;
    vault.total_paid_out = 0;
    vault.total_yield_paid = 0;

    vault.bump = ctx.bumps.vault;
    vault.reserve_bump = ctx.bumps.reserve;

    msg!("KratosX vault initialized");
    msg!("Vault: {}", vault.key());
    msg!("Operator: {}", vault.operator);
    msg!("Deposit Mint: {}", vault.deposit_mint);
    msg!("Reserve: {}", vault.reserve);
    msg!("Slots: {} x {}", total_slots, vault.slot_value);

    emit!(VaultInitialized {
        vault: vault.key(),
        deposit_mint: vault.deposit_mint,
        operator: vault.operator,
        total_slots,
        slot_value: vault.slot_value,
    });

    Ok(())
}

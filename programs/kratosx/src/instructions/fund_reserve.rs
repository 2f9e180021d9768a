// =============================================================================
// Fund Reserve Instruction
// =============================================================================
// Tops up the reserve so it can cover yield on top of returned principal.
// Anyone may fund it; the tokens carry no claim on the vault.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::KratosError;
use crate::events::ReserveFunded;
use crate::state::Vault;

/// Accounts required for the fund_reserve instruction
#[derive(Accounts)]
pub struct FundReserve<'info> {
    pub funder: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        constraint = funder_token_account.mint == vault.deposit_mint @ KratosError::InvalidDepositMint,
        constraint = funder_token_account.owner == funder.key() @ KratosError::InvalidTokenAccountOwner
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [RESERVE_SEED, vault.key().as_ref()],
        bump = vault.reserve_bump
    )]
    pub reserve: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Handler for the fund_reserve instruction
pub fn handler_fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
    require!(amount > 0, KratosError::InvalidAmount);
    require!(
        ctx.accounts.funder_token_account.amount >= amount,
        KratosError::TransferFailed
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_token_account.to_account_info(),
                to: ctx.accounts.reserve.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("Reserve funded with {} by {}", amount, ctx.accounts.funder.key());

    emit!(ReserveFunded {
        funder: ctx.accounts.funder.key(),
        amount,
    });

    Ok(())
}

// =============================================================================
// Request Deposit Instruction
// =============================================================================
// A depositor reserves a slot and authorizes the vault to pull one slot
// worth of tokens later, when the operator approves.
//
// Flow:
// 1. Reserve a slot (fails with NoSlotsAvailable when the vault is full)
// 2. Open a Pending deposit record
// 3. Set the vault PDA's allowance on the depositor's token account
//
// No tokens move here. The allowance is set to the principal of all of the
// depositor's pending requests, so several requests can share one token
// account and allowance left over from a rejected request is dropped.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Approve, Token, TokenAccount};

use crate::constants::*;
use crate::error::KratosError;
use crate::events::DepositRequested;
use crate::state::{LockTier, Vault};

/// Accounts required for the request_deposit instruction
#[derive(Accounts)]
pub struct RequestDeposit<'info> {
    /// The depositor; signs the token delegation
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    /// Depositor's token account the principal will be pulled from
    #[account(
        mut,
        constraint = depositor_token_account.mint == vault.deposit_mint @ KratosError::InvalidDepositMint,
        constraint = depositor_token_account.owner == depositor.key() @ KratosError::InvalidTokenAccountOwner
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Handler for the request_deposit instruction
///
/// # Arguments
/// * `lock_tier` - Preferred lock tier; the operator decides at approval
///
/// # Returns
/// * The new deposit id
pub fn handler_request_deposit(
    ctx: Context<RequestDeposit>,
    lock_tier: Option<LockTier>,
) -> Result<u64> {
    let clock = Clock::get()?;
    let depositor_key = ctx.accounts.depositor.key();

    let deposit_id =
        ctx.accounts
            .vault
            .request_deposit(depositor_key, lock_tier, clock.unix_timestamp)?;

    // =========================================================================
    // Delegate the principal to the vault PDA
    // =========================================================================

    let allowance = ctx.accounts.vault.pending_principal_of(&depositor_key)?;

    token::approve(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Approve {
                to: ctx.accounts.depositor_token_account.to_account_info(),
                delegate: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        allowance,
    )?;

    msg!(
        "Deposit {} requested by {} ({} of {} slots taken)",
        deposit_id,
        depositor_key,
        ctx.accounts.vault.pool.occupied_slots(),
        ctx.accounts.vault.pool.total_slots
    );
    msg!("Vault allowance: {}", allowance);

    emit!(DepositRequested {
        deposit_id,
        owner: depositor_key,
    });

    Ok(deposit_id)
}

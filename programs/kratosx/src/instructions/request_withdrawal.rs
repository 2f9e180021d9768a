// =============================================================================
// Request Withdrawal Instruction
// =============================================================================
// Quotes the payout of an approved deposit and marks it
// WithdrawalRequested. No tokens move; execute_withdraw pays out.
//
// Payout = principal + yield over (days locked + 7 day cool-down buffer)
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::WithdrawRequested;
use crate::state::Vault;

/// Accounts required for the request_withdrawal instruction
#[derive(Accounts)]
pub struct RequestWithdrawal<'info> {
    /// Anyone may ask for a quote; funds only ever go to the deposit owner
    pub requester: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,
}

/// Handler for the request_withdrawal instruction
///
/// # Returns
/// * The quoted payout (principal + yield)
pub fn handler_request_withdrawal(ctx: Context<RequestWithdrawal>, deposit_id: u64) -> Result<u64> {
    let clock = Clock::get()?;
    let amount = ctx
        .accounts
        .vault
        .request_withdrawal(deposit_id, clock.unix_timestamp)?;

    msg!("Withdrawal requested for deposit {}: {}", deposit_id, amount);

    emit!(WithdrawRequested { deposit_id, amount });

    Ok(amount)
}

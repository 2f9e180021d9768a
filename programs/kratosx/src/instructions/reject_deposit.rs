// =============================================================================
// Reject Deposit Instruction
// =============================================================================
// The operator turns down a pending deposit. The record is removed and its
// slot returns to the pool. No tokens were pulled, so none are returned.
//
// The depositor's delegation to the vault is left in place (only the owner
// can revoke it). The next request_deposit resets it to what the owner's
// open requests actually need.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::DepositRejected;
use crate::state::Vault;

/// Accounts required for the reject_deposit instruction
#[derive(Accounts)]
pub struct RejectDeposit<'info> {
    /// Must be the vault's operator (checked by the vault)
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,
}

/// Handler for the reject_deposit instruction
pub fn handler_reject_deposit(ctx: Context<RejectDeposit>, deposit_id: u64) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    let vault = &mut ctx.accounts.vault;
    let rejected = vault.reject_deposit(&operator, deposit_id)?;

    msg!(
        "Deposit {} of {} rejected ({} slots left, {} deposits open)",
        rejected.id,
        rejected.owner,
        vault.available_slot_count(),
        vault.ledger.len()
    );

    emit!(DepositRejected {
        owner: rejected.owner,
        deposit_id: rejected.id,
    });

    Ok(())
}

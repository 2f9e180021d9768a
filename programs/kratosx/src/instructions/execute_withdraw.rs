// =============================================================================
// Execute Withdraw Instruction
// =============================================================================
// Pays principal plus yield out of the reserve to the deposit owner, removes
// the deposit and frees its slot.
//
// Flow:
// 1. Recompute the payout at the current time
// 2. Check the reserve covers it
// 3. Transfer from the reserve (vault PDA signs as reserve authority)
// 4. Remove the record, release the slot, update vault totals
//
// The caller does not have to be the owner: the destination token account
// must belong to the deposit owner, so funds cannot be redirected.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::KratosError;
use crate::events::WithdrawExecuted;
use crate::state::Vault;

/// Accounts required for the execute_withdraw instruction
#[derive(Accounts)]
pub struct ExecuteWithdraw<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    /// Deposit owner's token account (destination)
    #[account(
        mut,
        constraint = owner_token_account.mint == vault.deposit_mint @ KratosError::InvalidDepositMint
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// Vault reserve (source)
    #[account(
        mut,
        seeds = [RESERVE_SEED, vault.key().as_ref()],
        bump = vault.reserve_bump
    )]
    pub reserve: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Handler for the execute_withdraw instruction
pub fn handler_execute_withdraw(ctx: Context<ExecuteWithdraw>, deposit_id: u64) -> Result<()> {
    let clock = Clock::get()?;

    let accounts = &mut *ctx.accounts;
    let vault_info = accounts.vault.to_account_info();
    let deposit_mint_key = accounts.vault.deposit_mint;
    let bump = [accounts.vault.bump];
    let vault_seeds = &[VAULT_SEED, deposit_mint_key.as_ref(), &bump];
    let signer_seeds = &[&vault_seeds[..]];

    let destination = &accounts.owner_token_account;
    let reserve = &accounts.reserve;
    let token_program = &accounts.token_program;

    let (withdrawn, payout) =
        accounts
            .vault
            .execute_withdraw(deposit_id, clock.unix_timestamp, |deposit, payout| {
                require_keys_eq!(
                    destination.owner,
                    deposit.owner,
                    KratosError::InvalidTokenAccountOwner
                );

                if reserve.amount < payout {
                    msg!(
                        "Reserve holds {} but payout is {}",
                        reserve.amount,
                        payout
                    );
                    return err!(KratosError::TransferFailed);
                }

                token::transfer(
                    CpiContext::new_with_signer(
                        token_program.to_account_info(),
                        Transfer {
                            from: reserve.to_account_info(),
                            to: destination.to_account_info(),
                            authority: vault_info.clone(),
                        },
                        signer_seeds,
                    ),
                    payout,
                )
                .map_err(|_| error!(KratosError::TransferFailed))
            })?;

    let vault = &accounts.vault;
    msg!(
        "Deposit {} withdrawn: {} paid to {} (principal {})",
        withdrawn.id,
        payout,
        withdrawn.owner,
        withdrawn.principal
    );
    msg!(
        "Vault totals - locked: {}, paid out: {}, yield paid: {}",
        vault.total_principal_locked,
        vault.total_paid_out,
        vault.total_yield_paid
    );

    emit!(WithdrawExecuted {
        deposit_id: withdrawn.id,
        owner: withdrawn.owner,
        amount: payout,
    });

    Ok(())
}

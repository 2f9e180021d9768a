// =============================================================================
// Approve Deposit Instruction
// =============================================================================
// The operator accepts a pending deposit.
//
// Flow:
// 1. Check the caller is the operator, the vault is open and the deposit
//    is Pending
// 2. Pull the principal from the depositor into the reserve, using the
//    delegation granted at request time (vault PDA signs as delegate)
// 3. Stamp the approval time, set the lock tier and early-adopt flag
//
// If the pull fails the deposit stays Pending and nothing changes.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::KratosError;
use crate::events::DepositApproved;
use crate::state::{LockTier, Vault};

/// Accounts required for the approve_deposit instruction
#[derive(Accounts)]
pub struct ApproveDeposit<'info> {
    /// Must be the vault's operator (checked by the vault)
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.deposit_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    /// Depositor's token account (source of the principal)
    /// Its owner is checked against the deposit record in the handler
    #[account(
        mut,
        constraint = depositor_token_account.mint == vault.deposit_mint @ KratosError::InvalidDepositMint
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    /// Vault reserve (destination of the principal)
    #[account(
        mut,
        seeds = [RESERVE_SEED, vault.key().as_ref()],
        bump = vault.reserve_bump
    )]
    pub reserve: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Handler for the approve_deposit instruction
///
/// # Arguments
/// * `deposit_id` - The pending deposit to approve
/// * `lock_tier` - The lock tier granted to the deposit
pub fn handler_approve_deposit(
    ctx: Context<ApproveDeposit>,
    deposit_id: u64,
    lock_tier: LockTier,
) -> Result<()> {
    let clock = Clock::get()?;

    let accounts = &mut *ctx.accounts;
    let operator = accounts.operator.key();
    let vault_key = accounts.vault.key();
    let vault_info = accounts.vault.to_account_info();
    let deposit_mint_key = accounts.vault.deposit_mint;
    let bump = [accounts.vault.bump];
    let vault_seeds = &[VAULT_SEED, deposit_mint_key.as_ref(), &bump];
    let signer_seeds = &[&vault_seeds[..]];

    let source = &accounts.depositor_token_account;
    let reserve = &accounts.reserve;
    let token_program = &accounts.token_program;

    let approved = accounts.vault.approve_deposit(
        &operator,
        deposit_id,
        lock_tier,
        clock.unix_timestamp,
        |pending| {
            require_keys_eq!(
                source.owner,
                pending.owner,
                KratosError::InvalidTokenAccountOwner
            );

            // The depositor may have revoked or spent the delegation since
            // requesting; report that as a failed transfer
            require!(
                source.delegate == COption::Some(vault_key),
                KratosError::TransferFailed
            );
            require!(
                source.delegated_amount >= pending.principal,
                KratosError::TransferFailed
            );
            require!(
                source.amount >= pending.principal,
                KratosError::TransferFailed
            );

            token::transfer(
                CpiContext::new_with_signer(
                    token_program.to_account_info(),
                    Transfer {
                        from: source.to_account_info(),
                        to: reserve.to_account_info(),
                        authority: vault_info.clone(),
                    },
                    signer_seeds,
                ),
                pending.principal,
            )
            .map_err(|_| error!(KratosError::TransferFailed))
        },
    )?;

    msg!(
        "Deposit {} approved: {} locked for {:?}",
        approved.id,
        approved.principal,
        approved.lock_tier
    );
    msg!(
        "Early adopt bonus: {}, predicted yield: {}",
        approved.has_early_adopt_bonus,
        approved.predicted_yield
    );

    emit!(DepositApproved {
        owner: approved.owner,
        deposit_id: approved.id,
        lock_tier: approved.lock_tier,
        has_early_adopt_bonus: approved.has_early_adopt_bonus,
    });

    Ok(())
}

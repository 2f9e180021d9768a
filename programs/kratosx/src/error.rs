// =============================================================================
// KratosX Error Codes
// =============================================================================
// Custom errors returned by the KratosX program. Anchor assigns codes starting
// at 6000 in declaration order.
// =============================================================================

use anchor_lang::prelude::*;

/// All errors the KratosX program can return.
#[error_code]
pub enum KratosError {
    // =========================================================================
    // Vault State Errors
    // =========================================================================

    /// The admin closed the entry gate - no new deposits, approvals or extensions
    #[msg("Vault is currently paused")]
    VaultPaused,

    /// Slot count is zero, above the maximum, or does not divide the total amount
    #[msg("Invalid slot configuration")]
    InvalidSlotConfig,

    // =========================================================================
    // Slot Errors
    // =========================================================================

    /// Every slot is either pending or in use
    #[msg("Not enough slots available")]
    NoSlotsAvailable,

    /// Releasing a slot would push availability above the total
    #[msg("Slot accounting mismatch")]
    SlotAccountingMismatch,

    // =========================================================================
    // Ledger Errors
    // =========================================================================

    /// No active deposit carries this id
    #[msg("Deposit not found")]
    DepositNotFound,

    /// The deposit is not in a state that allows this operation,
    /// or the requested lock tier does not move forward
    #[msg("Invalid deposit state transition")]
    InvalidTransition,

    /// Current time is before the approval time
    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    // =========================================================================
    // Authorization Errors
    // =========================================================================

    /// Caller lacks the role this instruction requires
    #[msg("Unauthorized - signer does not have permission")]
    Unauthorized,

    /// New authority is the default key or equal to the current one
    #[msg("Invalid authority")]
    InvalidAuthority,

    // =========================================================================
    // Transfer Errors
    // =========================================================================

    /// The token program declined a pull or push (balance, delegation or reserve)
    #[msg("Token transfer failed")]
    TransferFailed,

    /// Token account or mint does not match the vault's deposit token
    #[msg("Invalid deposit mint - must use vault's deposit token")]
    InvalidDepositMint,

    /// Token account owner doesn't match the expected owner
    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,

    // =========================================================================
    // Math Errors
    // =========================================================================

    #[msg("Math overflow - calculation exceeded maximum value")]
    MathOverflow,

    #[msg("Math underflow - result would be negative")]
    MathUnderflow,

    /// Amount must be greater than zero
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
}

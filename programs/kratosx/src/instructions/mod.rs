// =============================================================================
// Instructions Module
// =============================================================================
// Every action the KratosX program accepts, one module per instruction
// (admin setters share a module, as do the read-only views).
// =============================================================================

// Vault setup
pub mod initialize_vault;

// Deposit lifecycle
pub mod approve_deposit;
pub mod execute_withdraw;
pub mod extend_lock_period;
pub mod reject_deposit;
pub mod request_deposit;
pub mod request_withdrawal;

// Reserve
pub mod fund_reserve;

// Queries
pub mod views;

// Admin operations
pub mod admin;

// The #[derive(Accounts)] macro generates helper types that need to be at crate root
pub use admin::*;
pub use approve_deposit::*;
pub use execute_withdraw::*;
pub use extend_lock_period::*;
pub use fund_reserve::*;
pub use initialize_vault::*;
pub use reject_deposit::*;
pub use request_deposit::*;
pub use request_withdrawal::*;
pub use views::*;

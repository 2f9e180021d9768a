// =============================================================================
// State Module
// =============================================================================
// The vault keeps all of its state in one account: the Vault, which embeds
// the slot pool and the deposit ledger.
// =============================================================================

pub mod deposit;
pub mod ledger;
pub mod slot_pool;
pub mod vault;

pub use deposit::*;
pub use ledger::*;
pub use slot_pool::*;
pub use vault::*;

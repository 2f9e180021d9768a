// =============================================================================
// KratosX Vault Constants
// =============================================================================
// All the fixed numbers of the vault: yield breakpoints, time units, slot
// limits and PDA seeds. Runtime configuration (slot count, slot value,
// authorities) lives in the Vault account instead.
// =============================================================================

// =============================================================================
// TIME
// =============================================================================

/// Seconds in one day - elapsed lock time is measured in whole days
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days in a year as used by the yield formula denominator
pub const DAYS_PER_YEAR: u64 = 365;

/// Cool-down buffer added to the elapsed lock time when a payout is computed
/// (covers the processing window between request and execution)
pub const WITHDRAWAL_BUFFER_DAYS: u64 = 7;

// =============================================================================
// YIELD BREAKPOINTS
// =============================================================================
// Each breakpoint is (inclusive upper bound in days, base percent).
// Anything past the last bound earns MAX_BASE_PERCENT.
// =============================================================================

/// At or below this many days no yield is paid, bonuses included
pub const YIELD_FLOOR_DAYS: u64 = 180;

/// Lock time stops accruing past five years
pub const MAX_YIELD_DAYS: u64 = 1825;

/// Extend bonus only pays out once a deposit has been locked for a year
pub const EXTEND_BONUS_MIN_DAYS: u64 = 365;

/// Tier breakpoints, inclusive on the upper bound
pub const YIELD_BREAKPOINTS: [(u64, u64); 6] = [
    (180, 0),
    (365, 5),
    (730, 5),
    (1095, 6),
    (1460, 7),
    (1825, 8),
];

/// Base percent above the last breakpoint
pub const MAX_BASE_PERCENT: u64 = 9;

/// Percentage points added by each bonus
pub const BONUS_PERCENT: u64 = 1;

/// Denominator of the yield formula: percent (100) times days per year
pub const YIELD_DENOMINATOR: u128 = 100 * DAYS_PER_YEAR as u128;

// =============================================================================
// SLOTS
// =============================================================================

/// Upper bound on `total_slots`
/// The whole ledger lives inside the vault account, and an account created
/// through CPI is capped at 10 KiB, so 100 deposits is the ceiling.
pub const MAX_TOTAL_SLOTS: u16 = 100;

/// Page size for the slot listing views
/// Return data is capped at 1024 bytes per instruction.
pub const MAX_SLOTS_PER_PAGE: u8 = 10;

/// Early-adopt promotion is on when a vault is created
pub const DEFAULT_EARLY_ADOPT_BONUS: bool = true;

// =============================================================================
// PDA SEEDS
// =============================================================================

/// Seed for the Vault state account PDA
/// Full seed: ["kratosx_vault", deposit_mint_pubkey]
pub const VAULT_SEED: &[u8] = b"kratosx_vault";

/// Seed for the reserve token account PDA (holds principal and yield funds)
/// Full seed: ["reserve", vault_pubkey]
pub const RESERVE_SEED: &[u8] = b"reserve";

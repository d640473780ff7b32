// constants.rs

// ============================================================================
// REWARDS (all amounts in centavos)
// ============================================================================

/// Starting balance for a freshly provisioned player (₱10)
pub const NEW_PLAYER_BONUS: u64 = 1_000;

/// Payout for a correctly guessed flag (₱28)
pub const CORRECT_GUESS_REWARD: u64 = 2_800;

/// Credited to the referrer for every referred player (₱48)
pub const REFERRAL_REWARD: u64 = 4_800;

// ============================================================================
// PLAY LIMITS
// ============================================================================

/// Guesses per calendar day while in limited mode
pub const DAILY_GUESS_LIMIT: u32 = 2;

/// Invites needed to switch a player to unlimited mode
pub const UNLIMITED_INVITE_THRESHOLD: u32 = 8;

/// Minimum gap between guesses in unlimited mode (30 minutes)
pub const GUESS_COOLDOWN_SECONDS: i64 = 30 * SECONDS_PER_MINUTE;

// ============================================================================
// WITHDRAWALS
// ============================================================================

/// ₱150
pub const MIN_WITHDRAWAL: u64 = 15_000;

/// ₱555
pub const MAX_WITHDRAWAL: u64 = 55_500;

/// Shortest accepted payout destination (a mobile wallet number)
pub const MIN_DESTINATION_LEN: u8 = 10;

/// Hard cap, sizes the WithdrawalRequest account
pub const MAX_DESTINATION_LEN: usize = 32;

// ============================================================================
// CALENDAR
// ============================================================================

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Day boundaries are evaluated in UTC+8
pub const REFERENCE_UTC_OFFSET_SECONDS: i64 = 8 * 3_600;

// ============================================================================
// PLAYER PROFILE
// ============================================================================

pub const MAX_DISPLAY_NAME_LEN: usize = 64;
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";

// ============================================================================
// PDA SEEDS
// ============================================================================

pub const GAME_CONFIG_SEED: &[u8] = b"game_config";
pub const PLAYER_SEED: &[u8] = b"player";
pub const REFERRAL_SEED: &[u8] = b"referral";
pub const WITHDRAWAL_SEED: &[u8] = b"withdrawal";

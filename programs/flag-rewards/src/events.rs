use anchor_lang::prelude::*;
use crate::state::WithdrawalStatus;

/// Emitted when ensure_account provisions a new player
#[event]
pub struct PlayerCreated {
    pub player: Pubkey,
    pub external_id: u64,
    pub starting_balance: u64,
    pub created_at: i64,
}

/// Emitted when a round token is issued
#[event]
pub struct RoundStarted {
    pub player: Pubkey,
    pub round_id: u64,
    pub started_at: i64,
}

/// Emitted when a round outcome is recorded
#[event]
pub struct RoundSettled {
    pub player: Pubkey,
    pub round_id: u64,
    pub correct: bool,
    /// Amount credited, zero for a wrong guess
    pub reward: u64,
    pub daily_guess_count: u32,
    pub balance: u64,
    pub settled_at: i64,
}

/// Emitted when a referrer is credited for a new referral
#[event]
pub struct ReferralCredited {
    pub referrer: Pubkey,
    pub referred: Pubkey,
    pub reward: u64,
    pub invite_count: u32,
    /// The referrer is now in unlimited mode
    pub unlimited: bool,
    pub timestamp: i64,
}

/// Emitted once the debit and the request record are committed.
/// The notification relay listens for this one.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalRequested {
    pub player: Pubkey,
    pub external_id: u64,
    pub request: Pubkey,
    pub sequence: u64,
    pub amount: u64,
    pub remaining_balance: u64,
    pub created_at: i64,
}

/// Emitted when the settlement process reports back
#[event]
pub struct WithdrawalSettled {
    pub request: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
    pub status: WithdrawalStatus,
    pub settled_at: i64,
}

/// Emitted on any admin change of the game configuration
#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
    pub operator: Pubkey,
    pub is_paused: bool,
    pub timestamp: i64,
}

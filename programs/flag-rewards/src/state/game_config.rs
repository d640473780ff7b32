// state/game_config.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::GameError;

#[account]
pub struct GameConfig {
    /// Admin authority who can update config
    pub authority: Pubkey,

    /// Backend signer that relays player actions
    pub operator: Pubkey,

    /// Starting balance for new players (centavos)
    pub new_player_bonus: u64,

    /// Reward for a correct guess (centavos)
    pub correct_guess_reward: u64,

    /// Reward credited to a referrer (centavos)
    pub referral_reward: u64,

    /// Guesses per day in limited mode
    pub daily_guess_limit: u32,

    /// Invites that unlock unlimited mode
    pub unlimited_invite_threshold: u32,

    /// Cooldown between guesses in unlimited mode
    pub guess_cooldown_seconds: i64,

    /// Withdrawal bounds (centavos)
    pub min_withdrawal: u64,
    pub max_withdrawal: u64,

    /// Shortest accepted payout destination
    pub min_destination_len: u8,

    /// Offset of the reference timezone from UTC
    pub utc_offset_seconds: i64,

    /// Rounds, referrals and withdrawals are rejected while set
    pub is_paused: bool,

    /// Bump seed for PDA
    pub bump: u8,
}

/// Partial config update, `None` keeps the current value
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct ConfigUpdateArgs {
    pub new_player_bonus: Option<u64>,
    pub correct_guess_reward: Option<u64>,
    pub referral_reward: Option<u64>,
    pub daily_guess_limit: Option<u32>,
    pub unlimited_invite_threshold: Option<u32>,
    pub guess_cooldown_seconds: Option<i64>,
    pub min_withdrawal: Option<u64>,
    pub max_withdrawal: Option<u64>,
    pub min_destination_len: Option<u8>,
    pub utc_offset_seconds: Option<i64>,
}

impl GameConfig {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // operator
        8 + // new_player_bonus
        8 + // correct_guess_reward
        8 + // referral_reward
        4 + // daily_guess_limit
        4 + // unlimited_invite_threshold
        8 + // guess_cooldown_seconds
        8 + // min_withdrawal
        8 + // max_withdrawal
        1 + // min_destination_len
        8 + // utc_offset_seconds
        1 + // is_paused
        1; // bump

    /// Create new config with default values
    pub fn new(authority: Pubkey, operator: Pubkey, bump: u8) -> Self {
        Self {
            authority,
            operator,
            new_player_bonus: NEW_PLAYER_BONUS,
            correct_guess_reward: CORRECT_GUESS_REWARD,
            referral_reward: REFERRAL_REWARD,
            daily_guess_limit: DAILY_GUESS_LIMIT,
            unlimited_invite_threshold: UNLIMITED_INVITE_THRESHOLD,
            guess_cooldown_seconds: GUESS_COOLDOWN_SECONDS,
            min_withdrawal: MIN_WITHDRAWAL,
            max_withdrawal: MAX_WITHDRAWAL,
            min_destination_len: MIN_DESTINATION_LEN,
            utc_offset_seconds: REFERENCE_UTC_OFFSET_SECONDS,
            is_paused: false,
            bump,
        }
    }

    /// Apply an admin update; nothing is written unless the result is valid
    pub fn apply_update(&mut self, args: &ConfigUpdateArgs) -> Result<()> {
        let mut next = self.clone();

        if let Some(value) = args.new_player_bonus {
            next.new_player_bonus = value;
        }
        if let Some(value) = args.correct_guess_reward {
            next.correct_guess_reward = value;
        }
        if let Some(value) = args.referral_reward {
            next.referral_reward = value;
        }
        if let Some(value) = args.daily_guess_limit {
            next.daily_guess_limit = value;
        }
        if let Some(value) = args.unlimited_invite_threshold {
            next.unlimited_invite_threshold = value;
        }
        if let Some(value) = args.guess_cooldown_seconds {
            next.guess_cooldown_seconds = value;
        }
        if let Some(value) = args.min_withdrawal {
            next.min_withdrawal = value;
        }
        if let Some(value) = args.max_withdrawal {
            next.max_withdrawal = value;
        }
        if let Some(value) = args.min_destination_len {
            next.min_destination_len = value;
        }
        if let Some(value) = args.utc_offset_seconds {
            next.utc_offset_seconds = value;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
    }

    /// Gate for rounds, referrals and withdrawals
    pub fn ensure_active(&self) -> Result<()> {
        require!(!self.is_paused, GameError::GamePaused);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.daily_guess_limit > 0, GameError::InvalidConfig);
        require!(self.unlimited_invite_threshold > 0, GameError::InvalidConfig);
        require!(
            (0..=SECONDS_PER_DAY).contains(&self.guess_cooldown_seconds),
            GameError::InvalidConfig
        );
        require!(self.min_withdrawal > 0, GameError::InvalidConfig);
        require!(self.min_withdrawal <= self.max_withdrawal, GameError::InvalidConfig);
        require!(
            self.min_destination_len > 0 && self.min_destination_len as usize <= MAX_DESTINATION_LEN,
            GameError::InvalidConfig
        );
        // UTC-12 .. UTC+14
        require!(
            (-12 * 3_600..=14 * 3_600).contains(&self.utc_offset_seconds),
            GameError::InvalidConfig
        );
        Ok(())
    }
}

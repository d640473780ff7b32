// state/player.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::GameError;
use crate::state::GameConfig;
use crate::utils::*;

#[account]
pub struct Player {
    pub external_id: u64,               // Upstream messaging-platform id
    pub display_name: String,
    pub balance: u64,                   // centavos
    pub daily_guess_count: u32,
    pub last_reset_day: i64,            // Day number in the reference timezone
    pub last_guess_at: Option<i64>,
    pub invite_count: u32,
    pub open_round: Option<u64>,        // Round token awaiting its outcome
    pub rounds_started: u64,
    pub total_earned: u64,
    pub total_withdrawn: u64,
    pub withdrawal_count: u64,          // Next WithdrawalRequest sequence
    pub created_at: i64,
    pub bump: u8,
}

/// Why a guess is not allowed right now
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DenyReason {
    DailyLimitReached,
    Cooldown,
}

/// Result of the eligibility evaluation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eligibility {
    pub permitted: bool,
    pub reason: Option<DenyReason>,
    /// The stored daily counter belongs to an earlier day
    pub reset_needed: bool,
    pub unlimited: bool,
    /// Minutes until the cooldown ends (0 unless `reason == Cooldown`)
    pub wait_minutes: u32,
    /// Guesses left today in limited mode, `None` in unlimited mode
    pub guesses_left: Option<u32>,
    /// Invites still needed to unlock unlimited mode, `None` once unlocked
    pub invites_to_unlimited: Option<u32>,
}

impl Eligibility {
    /// Error to surface when the guess is refused
    pub fn into_result(self) -> Result<()> {
        match self.reason {
            None => Ok(()),
            Some(DenyReason::DailyLimitReached) => Err(GameError::DailyLimitReached.into()),
            Some(DenyReason::Cooldown) => Err(GameError::CooldownActive.into()),
        }
    }
}

/// Snapshot of a player returned to callers
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub external_id: u64,
    pub display_name: String,
    pub balance: u64,
    pub daily_guess_count: u32,
    pub last_reset_day: i64,
    pub last_guess_at: Option<i64>,
    pub invite_count: u32,
    pub open_round: Option<u64>,
    pub total_earned: u64,
    pub total_withdrawn: u64,
    pub created_at: i64,
}

impl Player {
    pub const SIZE: usize = 8 + // discriminator
    8 + // external_id
    4 + MAX_DISPLAY_NAME_LEN + // display_name
    8 + // balance
    4 + // daily_guess_count
    8 + // last_reset_day
    1 + 8 + // last_guess_at
    4 + // invite_count
    1 + 8 + // open_round
    8 + // rounds_started
    8 + // total_earned
    8 + // total_withdrawn
    8 + // withdrawal_count
    8 + // created_at
    1; // bump

    /// Create new player with the starting bonus
    pub fn new(
        external_id: u64,
        display_name: String,
        config: &GameConfig,
        current_time: i64,
        bump: u8,
    ) -> Self {
        Self {
            external_id,
            display_name,
            balance: config.new_player_bonus,
            daily_guess_count: 0,
            last_reset_day: calendar_day(current_time, config.utc_offset_seconds),
            last_guess_at: None,
            invite_count: 0,
            open_round: None,
            rounds_started: 0,
            total_earned: 0,
            total_withdrawn: 0,
            withdrawal_count: 0,
            created_at: current_time,
            bump,
        }
    }

    /// Whether the account was provisioned already (init_if_needed leaves zeroed data)
    pub fn is_initialized(&self) -> bool {
        self.created_at != 0
    }

    pub fn is_unlimited(&self, config: &GameConfig) -> bool {
        self.invite_count >= config.unlimited_invite_threshold
    }

    // ========================================================================
    // ELIGIBILITY
    // ========================================================================

    /// Decide whether a guess is allowed at `now`. Never writes.
    pub fn evaluate(&self, now: i64, config: &GameConfig) -> Eligibility {
        let today = calendar_day(now, config.utc_offset_seconds);
        let reset_needed = today != self.last_reset_day;

        if self.is_unlimited(config) {
            let wait_minutes = match self.last_guess_at {
                Some(last) => cooldown_wait_minutes(last, now, config.guess_cooldown_seconds),
                None => 0,
            };

            return Eligibility {
                permitted: wait_minutes == 0,
                reason: (wait_minutes > 0).then_some(DenyReason::Cooldown),
                reset_needed,
                unlimited: true,
                wait_minutes,
                guesses_left: None,
                invites_to_unlimited: None,
            };
        }

        let used_today = if reset_needed { 0 } else { self.daily_guess_count };
        let guesses_left = config.daily_guess_limit.saturating_sub(used_today);

        Eligibility {
            permitted: guesses_left > 0,
            reason: (guesses_left == 0).then_some(DenyReason::DailyLimitReached),
            reset_needed,
            unlimited: false,
            wait_minutes: 0,
            guesses_left: Some(guesses_left),
            invites_to_unlimited: Some(
                config.unlimited_invite_threshold.saturating_sub(self.invite_count),
            ),
        }
    }

    // ========================================================================
    // ROUND TOKENS
    // ========================================================================

    /// Issue a fresh round token, replacing an abandoned one
    pub fn issue_round(&mut self) -> Result<u64> {
        let round_id = self.rounds_started
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        self.rounds_started = round_id;
        self.open_round = Some(round_id);
        Ok(round_id)
    }

    /// Consume the round token; a token is accepted exactly once
    pub fn take_round(&mut self, round_id: u64) -> Result<()> {
        require!(self.open_round == Some(round_id), GameError::RoundNotOpen);
        self.open_round = None;
        Ok(())
    }

    /// Hand out a round token if a guess is allowed at `now`
    pub fn begin_round(&mut self, now: i64, config: &GameConfig) -> Result<u64> {
        config.ensure_active()?;
        self.evaluate(now, config).into_result()?;
        self.issue_round()
    }

    /// Record the outcome of round `round_id` and return the reward paid.
    /// Nothing changes unless the token matches and the guess is still allowed.
    pub fn settle_round(
        &mut self,
        round_id: u64,
        correct: bool,
        now: i64,
        config: &GameConfig,
    ) -> Result<u64> {
        config.ensure_active()?;
        require!(self.open_round == Some(round_id), GameError::RoundNotOpen);

        // Limits may have changed since the token was issued
        self.evaluate(now, config).into_result()?;

        self.take_round(round_id)?;
        self.record_guess(now, config)?;
        if correct {
            self.credit_correct_guess(config)
        } else {
            Ok(0)
        }
    }

    // ========================================================================
    // LEDGER
    // ========================================================================

    /// Zero the daily counter when the calendar day moved on
    fn reset_daily_if_needed(&mut self, now: i64, config: &GameConfig) {
        let today = calendar_day(now, config.utc_offset_seconds);
        if today != self.last_reset_day {
            self.daily_guess_count = 0;
            self.last_reset_day = today;
        }
    }

    /// Count a guess at `now`, applying the day reset in the same step
    pub fn record_guess(&mut self, now: i64, config: &GameConfig) -> Result<()> {
        self.reset_daily_if_needed(now, config);
        self.daily_guess_count = self.daily_guess_count
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        self.last_guess_at = Some(now);
        Ok(())
    }

    /// Add `amount` to the balance
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.balance = self.balance
            .checked_add(amount)
            .ok_or(GameError::MathOverflow)?;
        self.total_earned = self.total_earned
            .checked_add(amount)
            .ok_or(GameError::MathOverflow)?;
        Ok(())
    }

    /// Pay the fixed reward for a correct guess, returns the amount credited
    pub fn credit_correct_guess(&mut self, config: &GameConfig) -> Result<u64> {
        self.credit(config.correct_guess_reward)?;
        Ok(config.correct_guess_reward)
    }

    /// Count one more invite and pay the referral reward
    pub fn register_invite(&mut self, reward: u64) -> Result<()> {
        self.invite_count = self.invite_count
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        self.credit(reward)
    }

    /// Remove `amount` from the balance; never goes below zero
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.balance = self.balance
            .checked_sub(amount)
            .ok_or(GameError::InsufficientBalance)?;
        self.total_withdrawn = self.total_withdrawn
            .checked_add(amount)
            .ok_or(GameError::MathOverflow)?;
        Ok(())
    }

    /// Reserve the next withdrawal sequence number
    pub fn next_withdrawal_sequence(&mut self) -> Result<u64> {
        let sequence = self.withdrawal_count;
        self.withdrawal_count = self.withdrawal_count
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        Ok(sequence)
    }

    /// Validate (amount, destination, balance, in that order) and debit a withdrawal.
    /// Returns the sequence reserved for the request record.
    pub fn withdraw(&mut self, amount: u64, destination: &str, config: &GameConfig) -> Result<u64> {
        config.ensure_active()?;
        validate_withdrawal_amount(amount, config)?;
        validate_destination(destination, config)?;
        require!(self.balance >= amount, GameError::InsufficientBalance);

        self.debit(amount)?;
        self.next_withdrawal_sequence()
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            external_id: self.external_id,
            display_name: self.display_name.clone(),
            balance: self.balance,
            daily_guess_count: self.daily_guess_count,
            last_reset_day: self.last_reset_day,
            last_guess_at: self.last_guess_at,
            invite_count: self.invite_count,
            open_round: self.open_round,
            total_earned: self.total_earned,
            total_withdrawn: self.total_withdrawn,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    // 2024-03-01 08:00:00 in UTC+8
    const NOW: i64 = 1_709_251_200;
    const MINUTE: i64 = 60;
    const DAY: i64 = SECONDS_PER_DAY;

    fn config() -> GameConfig {
        GameConfig::new(Pubkey::default(), Pubkey::default(), 254)
    }

    fn fresh_player(config: &GameConfig) -> Player {
        Player::new(42, "Tester".to_string(), config, NOW, 255)
    }

    fn play_round(player: &mut Player, now: i64, correct: bool, config: &GameConfig) -> Result<u64> {
        let round_id = player.begin_round(now, config)?;
        player.settle_round(round_id, correct, now, config)
    }

    #[test]
    fn test_new_player_gets_bonus() {
        let config = config();
        let player = fresh_player(&config);

        assert_eq!(player.balance, 1_000);
        assert_eq!(player.daily_guess_count, 0);
        assert!(player.is_initialized());
        assert!(player.evaluate(NOW, &config).permitted);
    }

    #[test]
    fn test_daily_limit_in_limited_mode() {
        let config = config();
        let mut player = fresh_player(&config);

        play_round(&mut player, NOW, false, &config).unwrap();
        let eligibility = player.evaluate(NOW + MINUTE, &config);
        assert!(eligibility.permitted);
        assert_eq!(eligibility.guesses_left, Some(1));

        play_round(&mut player, NOW + MINUTE, false, &config).unwrap();
        let eligibility = player.evaluate(NOW + 2 * MINUTE, &config);
        assert!(!eligibility.permitted);
        assert_eq!(eligibility.reason, Some(DenyReason::DailyLimitReached));
        assert_eq!(
            eligibility.into_result().unwrap_err(),
            Error::from(GameError::DailyLimitReached)
        );
    }

    #[test]
    fn test_repeated_attempts_never_exceed_daily_limit() {
        let config = config();
        let mut player = fresh_player(&config);

        let played = (0..5i64)
            .filter(|&i| play_round(&mut player, NOW + i * MINUTE, true, &config).is_ok())
            .count();

        assert_eq!(played, 2);
        assert_eq!(player.daily_guess_count, 2);
        assert_eq!(player.balance, 1_000 + 2 * 2_800);
    }

    #[test]
    fn test_day_rollover_resets_counter() {
        let config = config();
        let mut player = fresh_player(&config);
        play_round(&mut player, NOW, false, &config).unwrap();
        play_round(&mut player, NOW + MINUTE, false, &config).unwrap();
        assert!(!player.evaluate(NOW + 2 * MINUTE, &config).permitted);

        let tomorrow = NOW + DAY;
        let eligibility = player.evaluate(tomorrow, &config);
        assert!(eligibility.permitted);
        assert!(eligibility.reset_needed);
        // evaluate never writes
        assert_eq!(player.daily_guess_count, 2);

        player.record_guess(tomorrow, &config).unwrap();
        assert_eq!(player.daily_guess_count, 1);
        assert_eq!(player.last_reset_day, calendar_day(tomorrow, config.utc_offset_seconds));
    }

    #[test]
    fn test_unlimited_mode_cooldown() {
        let config = config();
        let mut player = fresh_player(&config);
        player.invite_count = 8;

        play_round(&mut player, NOW, false, &config).unwrap();

        let eligibility = player.evaluate(NOW + 10 * MINUTE, &config);
        assert!(!eligibility.permitted);
        assert!(eligibility.unlimited);
        assert_eq!(eligibility.reason, Some(DenyReason::Cooldown));
        assert_eq!(eligibility.wait_minutes, 20);
        assert_eq!(
            eligibility.into_result().unwrap_err(),
            Error::from(GameError::CooldownActive)
        );

        assert!(player.evaluate(NOW + 31 * MINUTE, &config).permitted);
    }

    #[test]
    fn test_unlimited_mode_ignores_daily_counter() {
        let config = config();
        let mut player = fresh_player(&config);
        play_round(&mut player, NOW, false, &config).unwrap();
        play_round(&mut player, NOW + MINUTE, false, &config).unwrap();
        assert!(!player.evaluate(NOW + 40 * MINUTE, &config).permitted);

        // Threshold reached mid-day
        player.invite_count = 8;
        let eligibility = player.evaluate(NOW + 40 * MINUTE, &config);
        assert!(eligibility.permitted);
        assert_eq!(eligibility.guesses_left, None);

        play_round(&mut player, NOW + 40 * MINUTE, false, &config).unwrap();
        play_round(&mut player, NOW + 80 * MINUTE, false, &config).unwrap();
        assert_eq!(player.daily_guess_count, 4);
    }

    #[test]
    fn test_seventh_invite_limited_eighth_unlimited() {
        let config = config();
        let mut player = fresh_player(&config);
        play_round(&mut player, NOW, false, &config).unwrap();
        play_round(&mut player, NOW + MINUTE, false, &config).unwrap();

        for _ in 0..7 {
            player.register_invite(config.referral_reward).unwrap();
        }
        let eligibility = player.evaluate(NOW + 45 * MINUTE, &config);
        assert!(!eligibility.unlimited);
        assert!(!eligibility.permitted);
        assert_eq!(eligibility.reason, Some(DenyReason::DailyLimitReached));
        assert_eq!(eligibility.invites_to_unlimited, Some(1));

        player.register_invite(config.referral_reward).unwrap();
        let eligibility = player.evaluate(NOW + 45 * MINUTE, &config);
        assert!(eligibility.unlimited);
        assert!(eligibility.permitted);
        assert_eq!(eligibility.invites_to_unlimited, None);
    }

    #[test]
    fn test_fresh_player_needs_all_invites() {
        let config = config();
        let player = fresh_player(&config);
        assert_eq!(player.evaluate(NOW, &config).invites_to_unlimited, Some(8));
    }

    #[test]
    fn test_report_rechecks_limits() {
        let mut config = config();
        let mut player = fresh_player(&config);
        play_round(&mut player, NOW, false, &config).unwrap();

        let round_id = player.begin_round(NOW + MINUTE, &config).unwrap();
        // Admin lowers the limit while the round is in flight
        config.daily_guess_limit = 1;

        assert_eq!(
            player.settle_round(round_id, true, NOW + 2 * MINUTE, &config).unwrap_err(),
            Error::from(GameError::DailyLimitReached)
        );
        assert_eq!(player.daily_guess_count, 1);
        assert_eq!(player.balance, 1_000);
        assert_eq!(player.open_round, Some(round_id));
    }

    #[test]
    fn test_report_is_accepted_once() {
        let config = config();
        let mut player = fresh_player(&config);

        let round_id = player.begin_round(NOW, &config).unwrap();
        assert_eq!(player.settle_round(round_id, true, NOW, &config).unwrap(), 2_800);
        assert_eq!(
            player.settle_round(round_id, true, NOW, &config).unwrap_err(),
            Error::from(GameError::RoundNotOpen)
        );
        assert_eq!(player.daily_guess_count, 1);
        assert_eq!(player.balance, 1_000 + 2_800);
    }

    #[test]
    fn test_wrong_guess_pays_nothing() {
        let config = config();
        let mut player = fresh_player(&config);

        assert_eq!(play_round(&mut player, NOW, false, &config).unwrap(), 0);
        assert_eq!(player.balance, 1_000);
        assert_eq!(player.daily_guess_count, 1);
        assert_eq!(player.last_guess_at, Some(NOW));
    }

    #[test]
    fn test_paused_game_rejects_player_actions() {
        let mut config = config();
        let mut player = fresh_player(&config);
        player.credit(20_000).unwrap();
        let round_id = player.begin_round(NOW, &config).unwrap();

        config.is_paused = true;
        let paused = Error::from(GameError::GamePaused);
        assert_eq!(player.begin_round(NOW, &config).unwrap_err(), paused);
        assert_eq!(player.settle_round(round_id, true, NOW, &config).unwrap_err(), paused);
        assert_eq!(player.withdraw(15_000, "09171234567", &config).unwrap_err(), paused);
        assert_eq!(player.balance, 21_000);
        assert_eq!(player.daily_guess_count, 0);

        config.is_paused = false;
        assert_eq!(player.settle_round(round_id, true, NOW, &config).unwrap(), 2_800);
    }

    #[test]
    fn test_round_token_is_single_use() {
        let config = config();
        let mut player = fresh_player(&config);

        let round_id = player.issue_round().unwrap();
        player.take_round(round_id).unwrap();
        assert_eq!(player.take_round(round_id).unwrap_err(), Error::from(GameError::RoundNotOpen));
    }

    #[test]
    fn test_new_round_replaces_abandoned_one() {
        let config = config();
        let mut player = fresh_player(&config);

        let abandoned = player.issue_round().unwrap();
        let current = player.issue_round().unwrap();
        assert_ne!(abandoned, current);
        assert_eq!(player.take_round(abandoned).unwrap_err(), Error::from(GameError::RoundNotOpen));
        player.take_round(current).unwrap();
    }

    #[test]
    fn test_debit_never_goes_negative() {
        let config = config();
        let mut player = fresh_player(&config);

        assert_eq!(player.debit(1_001).unwrap_err(), Error::from(GameError::InsufficientBalance));
        assert_eq!(player.balance, 1_000);

        player.debit(1_000).unwrap();
        assert_eq!(player.balance, 0);
        assert_eq!(player.total_withdrawn, 1_000);
        assert_eq!(player.debit(1).unwrap_err(), Error::from(GameError::InsufficientBalance));
    }

    #[test]
    fn test_second_debit_sees_first() {
        let config = config();
        let mut player = fresh_player(&config);
        player.credit(16_000).unwrap();

        player.debit(15_000).unwrap();
        assert_eq!(player.debit(15_000).unwrap_err(), Error::from(GameError::InsufficientBalance));
        assert_eq!(player.balance, 2_000);
    }

    #[test]
    fn test_credit_overflow() {
        let config = config();
        let mut player = fresh_player(&config);
        player.balance = u64::MAX;
        assert_eq!(player.credit(1).unwrap_err(), Error::from(GameError::MathOverflow));
    }

    #[test]
    fn test_balance_scenario() {
        let config = config();
        let mut player = fresh_player(&config);

        play_round(&mut player, NOW, true, &config).unwrap();
        play_round(&mut player, NOW + MINUTE, true, &config).unwrap();
        assert_eq!(player.balance, 6_600);

        player.register_invite(config.referral_reward).unwrap();
        assert_eq!(player.balance, 11_400);
        assert_eq!(player.invite_count, 1);

        assert_eq!(
            player.withdraw(15_000, "09171234567", &config).unwrap_err(),
            Error::from(GameError::InsufficientBalance)
        );
        assert_eq!(
            player.withdraw(11_400, "09171234567", &config).unwrap_err(),
            Error::from(GameError::WithdrawalBelowMinimum)
        );
        assert_eq!(player.balance, 11_400);
    }

    #[test]
    fn test_withdrawal_checks_run_in_order() {
        let config = config();
        let mut player = fresh_player(&config);
        player.credit(10_400).unwrap();

        // Amount is checked before the destination
        assert_eq!(
            player.withdraw(11_400, "123", &config).unwrap_err(),
            Error::from(GameError::WithdrawalBelowMinimum)
        );
        assert_eq!(
            player.withdraw(60_000, "", &config).unwrap_err(),
            Error::from(GameError::WithdrawalAboveMaximum)
        );
        // Destination is checked before the balance
        assert_eq!(
            player.withdraw(15_000, "123", &config).unwrap_err(),
            Error::from(GameError::InvalidDestination)
        );
        assert_eq!(
            player.withdraw(15_000, "09171234567", &config).unwrap_err(),
            Error::from(GameError::InsufficientBalance)
        );

        assert_eq!(player.balance, 11_400);
        assert_eq!(player.withdrawal_count, 0);
        assert_eq!(player.total_withdrawn, 0);
    }

    #[test]
    fn test_withdraw_debits_and_reserves_sequence() {
        let config = config();
        let mut player = fresh_player(&config);
        player.credit(34_000).unwrap();

        assert_eq!(player.withdraw(15_000, " 09171234567 ", &config).unwrap(), 0);
        assert_eq!(player.balance, 20_000);
        assert_eq!(player.withdraw(20_000, "09171234567", &config).unwrap(), 1);
        assert_eq!(player.balance, 0);
        assert_eq!(player.withdrawal_count, 2);
        assert_eq!(player.total_withdrawn, 35_000);

        // A rejected attempt leaves the next sequence free
        assert_eq!(
            player.withdraw(15_000, "09171234567", &config).unwrap_err(),
            Error::from(GameError::InsufficientBalance)
        );
        assert_eq!(player.withdrawal_count, 2);
    }

    #[test]
    fn test_withdrawal_sequence_increments() {
        let config = config();
        let mut player = fresh_player(&config);
        assert_eq!(player.next_withdrawal_sequence().unwrap(), 0);
        assert_eq!(player.next_withdrawal_sequence().unwrap(), 1);
        assert_eq!(player.withdrawal_count, 2);
    }
}

// error.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum GameError {
    // 🎯 ELIGIBILITY
    #[msg("Daily guess limit reached")]
    DailyLimitReached,

    #[msg("Cooldown between guesses is still active")]
    CooldownActive,

    #[msg("No open round with this id")]
    RoundNotOpen,

    // 🤝 REFERRALS
    #[msg("Cannot refer yourself")]
    SelfReferral,

    #[msg("Player was already referred")]
    AlreadyReferred,

    // 💸 WITHDRAWALS
    #[msg("Withdrawal amount is below the minimum")]
    WithdrawalBelowMinimum,

    #[msg("Withdrawal amount is above the maximum")]
    WithdrawalAboveMaximum,

    #[msg("Invalid payout destination")]
    InvalidDestination,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Withdrawal status cannot change this way")]
    InvalidStatusTransition,

    // 👤 PLAYER
    #[msg("Display name is too long")]
    DisplayNameTooLong,

    // 🚫 ADMIN
    #[msg("Unauthorized admin action")]
    UnauthorizedAdmin,

    #[msg("Signer is not the game operator")]
    UnauthorizedOperator,

    #[msg("Game is paused")]
    GamePaused,

    #[msg("Invalid configuration value")]
    InvalidConfig,

    // 🧮 MISC
    #[msg("Math overflow")]
    MathOverflow,
}

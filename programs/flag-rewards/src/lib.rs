use anchor_lang::prelude::*;

// Import modules
pub mod constants;
pub mod error;
pub mod events;
pub mod state;
pub mod instructions;
pub mod utils;

// Re-export for convenience
pub use constants::*;
pub use error::*;
pub use events::*;
pub use state::*;
pub use instructions::*;

declare_id!("8PJ1EM4M6oBxAYyguNiZE67nYnv5MjAe8SAjdxK79YCT");

#[program]
pub mod flag_rewards {
    use super::*;

    // ===== ADMIN =====

    /// Initialize the game config with default rules
    pub fn initialize(ctx: Context<Initialize>, operator: Pubkey) -> Result<()> {
        instructions::initialize::handler(ctx, operator)
    }

    /// Tune rewards, limits and withdrawal bounds
    pub fn update_config(ctx: Context<AdminConfig>, args: ConfigUpdateArgs) -> Result<()> {
        instructions::admin::update_config(ctx, args)
    }

    /// Rotate the backend operator key
    pub fn set_operator(ctx: Context<AdminConfig>, new_operator: Pubkey) -> Result<()> {
        instructions::admin::set_operator(ctx, new_operator)
    }

    /// Pause/unpause rounds, referrals and withdrawals
    pub fn toggle_pause(ctx: Context<AdminConfig>) -> Result<()> {
        instructions::admin::toggle_pause(ctx)
    }

    // ===== PLAYERS =====

    /// Create the player with the starting bonus if it does not exist yet
    pub fn ensure_account(
        ctx: Context<EnsureAccount>,
        external_id: u64,
        display_name: String,
    ) -> Result<PlayerView> {
        instructions::ensure_account::ensure_account(ctx, external_id, display_name)
    }

    // ===== ROUNDS =====

    /// Read-only: may the player guess right now, and if not, why
    pub fn check_eligibility(ctx: Context<CheckEligibility>) -> Result<Eligibility> {
        instructions::round::check_eligibility(ctx)
    }

    /// Issue a round token if the player is eligible
    pub fn start_round(ctx: Context<PlayRound>) -> Result<u64> {
        instructions::round::start_round(ctx)
    }

    /// Consume the round token, record the guess and pay the reward when correct
    pub fn report_round_outcome(
        ctx: Context<PlayRound>,
        round_id: u64,
        correct: bool,
    ) -> Result<PlayerView> {
        instructions::round::report_round_outcome(ctx, round_id, correct)
    }

    // ===== REFERRALS =====

    /// Record a referral once and credit the referrer
    pub fn submit_referral(ctx: Context<SubmitReferral>) -> Result<ReferralResult> {
        instructions::submit_referral::handler(ctx)
    }

    // ===== WITHDRAWALS =====

    /// Debit the balance and create a pending withdrawal request
    pub fn request_withdrawal(
        ctx: Context<RequestWithdrawal>,
        amount: u64,
        destination: String,
    ) -> Result<WithdrawalResult> {
        instructions::withdraw::request_withdrawal(ctx, amount, destination)
    }

    /// Record the settlement outcome of a pending request
    pub fn settle_withdrawal(ctx: Context<SettleWithdrawal>, status: WithdrawalStatus) -> Result<()> {
        instructions::withdraw::settle_withdrawal(ctx, status)
    }
}

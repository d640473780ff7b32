// instructions/admin.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;
use crate::error::*;
use crate::events::ConfigUpdated;

/// Admin function to pause/unpause gameplay, referrals and withdrawals
pub fn toggle_pause(ctx: Context<AdminConfig>) -> Result<()> {
    let game_config = &mut ctx.accounts.game_config;

    game_config.toggle_pause();

    msg!("Game pause toggled. New state: {}", game_config.is_paused);
    emit_config_updated(game_config)
}

/// Admin function to tune rewards, limits and withdrawal bounds
pub fn update_config(ctx: Context<AdminConfig>, args: ConfigUpdateArgs) -> Result<()> {
    let game_config = &mut ctx.accounts.game_config;

    game_config.apply_update(&args)?;

    msg!(
        "⚙️ Config updated: reward={} referral={} limit={} threshold={} cooldown={}s withdraw=[{}, {}]",
        game_config.correct_guess_reward,
        game_config.referral_reward,
        game_config.daily_guess_limit,
        game_config.unlimited_invite_threshold,
        game_config.guess_cooldown_seconds,
        game_config.min_withdrawal,
        game_config.max_withdrawal
    );
    emit_config_updated(game_config)
}

/// Admin function to rotate the backend operator key
pub fn set_operator(ctx: Context<AdminConfig>, new_operator: Pubkey) -> Result<()> {
    let game_config = &mut ctx.accounts.game_config;

    require!(new_operator != Pubkey::default(), GameError::InvalidConfig);
    game_config.operator = new_operator;

    msg!("Operator set to: {}", new_operator);
    emit_config_updated(game_config)
}

fn emit_config_updated(game_config: &GameConfig) -> Result<()> {
    let clock = Clock::get()?;
    emit!(ConfigUpdated {
        authority: game_config.authority,
        operator: game_config.operator,
        is_paused: game_config.is_paused,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AdminConfig<'info> {
    /// Authority (admin)
    #[account(
        constraint = authority.key() == game_config.authority @ GameError::UnauthorizedAdmin
    )]
    pub authority: Signer<'info>,

    /// Game config to update
    #[account(
        mut,
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,
}

// instructions/initialize.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;

/// Initialize the game config with default rules
pub fn handler(ctx: Context<Initialize>, operator: Pubkey) -> Result<()> {
    let game_config = &mut ctx.accounts.game_config;
    **game_config = GameConfig::new(
        ctx.accounts.authority.key(),
        operator,
        ctx.bumps.game_config,
    );

    msg!("Flag rewards initialized successfully!");
    msg!("Authority: {}", ctx.accounts.authority.key());
    msg!("Operator: {}", operator);
    msg!(
        "Rules: {} guesses/day, unlimited at {} invites, {}s cooldown",
        game_config.daily_guess_limit,
        game_config.unlimited_invite_threshold,
        game_config.guess_cooldown_seconds
    );

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Authority (admin) who can manage the game
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global game configuration account
    #[account(
        init,
        payer = authority,
        space = GameConfig::SIZE,
        seeds = [GAME_CONFIG_SEED],
        bump
    )]
    pub game_config: Account<'info, GameConfig>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}

use anchor_lang::prelude::*;

use crate::state::*;
use crate::constants::*;
use crate::error::GameError;
use crate::events::PlayerCreated;
use crate::utils::normalize_display_name;

/// Provision the player for `external_id`, or return the existing one unchanged
pub fn ensure_account(
    ctx: Context<EnsureAccount>,
    external_id: u64,
    display_name: String,
) -> Result<PlayerView> {
    let game_config = &ctx.accounts.game_config;
    let player = &mut ctx.accounts.player;

    if player.is_initialized() {
        msg!("👤 Player {} already exists", player.external_id);
        return Ok(player.view());
    }

    let clock = Clock::get()?;
    let display_name = normalize_display_name(&display_name)?;

    **player = Player::new(
        external_id,
        display_name,
        game_config,
        clock.unix_timestamp,
        ctx.bumps.player,
    );

    msg!("👤 Player created! external_id={} bonus={}", external_id, player.balance);
    emit!(PlayerCreated {
        player: player.key(),
        external_id,
        starting_balance: player.balance,
        created_at: clock.unix_timestamp,
    });

    Ok(player.view())
}

#[derive(Accounts)]
#[instruction(external_id: u64)]
pub struct EnsureAccount<'info> {
    /// Backend signer, pays for the new account
    #[account(
        mut,
        constraint = operator.key() == game_config.operator @ GameError::UnauthorizedOperator
    )]
    pub operator: Signer<'info>,

    #[account(
        init_if_needed,
        payer = operator,
        space = Player::SIZE,
        seeds = [PLAYER_SEED, external_id.to_le_bytes().as_ref()],
        bump
    )]
    pub player: Account<'info, Player>,

    #[account(
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    pub system_program: Program<'info, System>,
}

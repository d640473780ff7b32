use anchor_lang::prelude::*;

use crate::state::*;
use crate::constants::*;
use crate::error::GameError;
use crate::events::{RoundSettled, RoundStarted};

/// Read-only eligibility check, the result is returned and logged
pub fn check_eligibility(ctx: Context<CheckEligibility>) -> Result<Eligibility> {
    let player = &ctx.accounts.player;
    let clock = Clock::get()?;

    let eligibility = player.evaluate(clock.unix_timestamp, &ctx.accounts.game_config);

    // Backend parses this line
    msg!(
        "ELIGIBILITY: player={}, permitted={}, reason={:?}, unlimited={}, wait_minutes={}, guesses_left={:?}, invites_to_unlimited={:?}, reset_needed={}",
        player.external_id,
        eligibility.permitted,
        eligibility.reason,
        eligibility.unlimited,
        eligibility.wait_minutes,
        eligibility.guesses_left,
        eligibility.invites_to_unlimited,
        eligibility.reset_needed
    );

    Ok(eligibility)
}

/// Check eligibility and hand out a single-use round token
pub fn start_round(ctx: Context<PlayRound>) -> Result<u64> {
    let game_config = &ctx.accounts.game_config;
    let player = &mut ctx.accounts.player;
    let clock = Clock::get()?;

    let round_id = player.begin_round(clock.unix_timestamp, game_config).map_err(|err| {
        let eligibility = player.evaluate(clock.unix_timestamp, game_config);
        msg!(
            "⏳ Guess refused: player={} reason={:?} wait_minutes={}",
            player.external_id,
            eligibility.reason,
            eligibility.wait_minutes
        );
        err
    })?;

    msg!("🎯 Round {} started for player {}", round_id, player.external_id);
    emit!(RoundStarted {
        player: player.key(),
        round_id,
        started_at: clock.unix_timestamp,
    });

    Ok(round_id)
}

/// Settle the open round: count the guess and pay the reward when correct.
/// The token is consumed, so a repeated report for the same round fails.
pub fn report_round_outcome(
    ctx: Context<PlayRound>,
    round_id: u64,
    correct: bool,
) -> Result<PlayerView> {
    let game_config = &ctx.accounts.game_config;
    let player = &mut ctx.accounts.player;
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let reward = player.settle_round(round_id, correct, now, game_config)?;

    msg!(
        "🏁 Round {} settled: player={} correct={} reward={} balance={}",
        round_id,
        player.external_id,
        correct,
        reward,
        player.balance
    );
    emit!(RoundSettled {
        player: player.key(),
        round_id,
        correct,
        reward,
        daily_guess_count: player.daily_guess_count,
        balance: player.balance,
        settled_at: now,
    });

    Ok(player.view())
}

#[derive(Accounts)]
pub struct PlayRound<'info> {
    #[account(
        constraint = operator.key() == game_config.operator @ GameError::UnauthorizedOperator
    )]
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [PLAYER_SEED, player.external_id.to_le_bytes().as_ref()],
        bump = player.bump
    )]
    pub player: Account<'info, Player>,

    #[account(
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,
}

#[derive(Accounts)]
pub struct CheckEligibility<'info> {
    #[account(
        seeds = [PLAYER_SEED, player.external_id.to_le_bytes().as_ref()],
        bump = player.bump
    )]
    pub player: Account<'info, Player>,

    #[account(
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,
}

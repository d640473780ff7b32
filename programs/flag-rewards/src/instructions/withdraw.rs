// instructions/withdraw.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;
use crate::error::*;
use crate::events::{WithdrawalRequested, WithdrawalSettled};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithdrawalResult {
    pub request: Pubkey,
    pub sequence: u64,
    pub remaining_balance: u64,
}

/// Validate, debit and record a withdrawal. The debit and the pending
/// request are written in the same transaction or not at all.
pub fn request_withdrawal(
    ctx: Context<RequestWithdrawal>,
    amount: u64,
    destination: String,
) -> Result<WithdrawalResult> {
    let game_config = &ctx.accounts.game_config;
    let player = &mut ctx.accounts.player;
    let request = &mut ctx.accounts.withdrawal_request;
    let clock = Clock::get()?;

    let sequence = player.withdraw(amount, &destination, game_config).map_err(|err| {
        msg!(
            "💸 Withdrawal refused: player={} amount={} balance={}",
            player.external_id,
            amount,
            player.balance
        );
        err
    })?;

    **request = WithdrawalRequest::new(
        player.key(),
        sequence,
        amount,
        destination.trim().to_string(),
        clock.unix_timestamp,
        ctx.bumps.withdrawal_request,
    );

    msg!(
        "💸 Withdrawal #{} requested: player={} amount={} remaining={}",
        sequence,
        player.external_id,
        amount,
        player.balance
    );
    emit!(WithdrawalRequested {
        player: player.key(),
        external_id: player.external_id,
        request: request.key(),
        sequence,
        amount,
        remaining_balance: player.balance,
        created_at: clock.unix_timestamp,
    });

    Ok(WithdrawalResult {
        request: request.key(),
        sequence,
        remaining_balance: player.balance,
    })
}

/// Out-of-band settlement reports the final status of a pending request
pub fn settle_withdrawal(ctx: Context<SettleWithdrawal>, status: WithdrawalStatus) -> Result<()> {
    let request = &mut ctx.accounts.withdrawal_request;
    let clock = Clock::get()?;

    request.settle(status, clock.unix_timestamp)?;

    msg!("Withdrawal #{} for {} settled: {:?}", request.sequence, request.player, status);
    emit!(WithdrawalSettled {
        request: request.key(),
        player: request.player,
        amount: request.amount,
        status,
        settled_at: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RequestWithdrawal<'info> {
    /// Backend signer, pays for the request record
    #[account(
        mut,
        constraint = operator.key() == game_config.operator @ GameError::UnauthorizedOperator
    )]
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [PLAYER_SEED, player.external_id.to_le_bytes().as_ref()],
        bump = player.bump
    )]
    pub player: Account<'info, Player>,

    /// Address is fixed by the player's next withdrawal sequence
    #[account(
        init,
        payer = operator,
        space = WithdrawalRequest::SIZE,
        seeds = [WITHDRAWAL_SEED, player.key().as_ref(), player.withdrawal_count.to_le_bytes().as_ref()],
        bump
    )]
    pub withdrawal_request: Account<'info, WithdrawalRequest>,

    #[account(
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SettleWithdrawal<'info> {
    #[account(
        constraint = operator.key() == game_config.operator @ GameError::UnauthorizedOperator
    )]
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [WITHDRAWAL_SEED, withdrawal_request.player.as_ref(), withdrawal_request.sequence.to_le_bytes().as_ref()],
        bump = withdrawal_request.bump
    )]
    pub withdrawal_request: Account<'info, WithdrawalRequest>,

    #[account(
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,
}

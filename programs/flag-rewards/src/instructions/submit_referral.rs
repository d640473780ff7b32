// instructions/submit_referral.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;
use crate::error::*;
use crate::events::ReferralCredited;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferralResult {
    /// False when this exact referral was already recorded
    pub created: bool,
    pub invite_count: u32,
    pub unlimited: bool,
}

/// Record referrer -> referred once and credit the referrer in the same transaction
pub fn handler(ctx: Context<SubmitReferral>) -> Result<ReferralResult> {
    let game_config = &ctx.accounts.game_config;
    let referral = &mut ctx.accounts.referral;
    let referrer = &mut ctx.accounts.referrer;
    let referrer_key = referrer.key();
    let referred_key = ctx.accounts.referred.key();
    let bump = ctx.bumps.referral;
    let clock = Clock::get()?;

    let created = referral.apply(
        referrer,
        referrer_key,
        referred_key,
        game_config,
        clock.unix_timestamp,
        bump,
    )?;
    let unlimited = referrer.is_unlimited(game_config);

    if !created {
        msg!("Referral already recorded: {} -> {}", referrer_key, referred_key);
        return Ok(ReferralResult {
            created: false,
            invite_count: referrer.invite_count,
            unlimited,
        });
    }

    let reward = game_config.referral_reward;

    msg!("🤝 Referral registered: {} referred by {}", referred_key, referrer_key);
    msg!("Referrer invites: {} (unlimited: {}), balance: {}", referrer.invite_count, unlimited, referrer.balance);

    emit!(ReferralCredited {
        referrer: referrer_key,
        referred: referred_key,
        reward,
        invite_count: referrer.invite_count,
        unlimited,
        timestamp: clock.unix_timestamp,
    });

    Ok(ReferralResult {
        created: true,
        invite_count: referrer.invite_count,
        unlimited,
    })
}

#[derive(Accounts)]
pub struct SubmitReferral<'info> {
    /// Backend signer, pays for the referral record
    #[account(
        mut,
        constraint = operator.key() == game_config.operator @ GameError::UnauthorizedOperator
    )]
    pub operator: Signer<'info>,

    /// Player receiving the referral reward
    #[account(
        mut,
        seeds = [PLAYER_SEED, referrer.external_id.to_le_bytes().as_ref()],
        bump = referrer.bump
    )]
    pub referrer: Account<'info, Player>,

    /// Player who joined through the invite
    #[account(
        seeds = [PLAYER_SEED, referred.external_id.to_le_bytes().as_ref()],
        bump = referred.bump
    )]
    pub referred: Account<'info, Player>,

    /// One record per referred player, the seed enforces it
    #[account(
        init_if_needed,
        payer = operator,
        space = Referral::LEN,
        seeds = [REFERRAL_SEED, referred.key().as_ref()],
        bump
    )]
    pub referral: Account<'info, Referral>,

    #[account(
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump
    )]
    pub game_config: Account<'info, GameConfig>,

    pub system_program: Program<'info, System>,
}

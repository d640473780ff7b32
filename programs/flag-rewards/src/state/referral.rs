use anchor_lang::prelude::*;
use crate::error::GameError;
use crate::state::{GameConfig, Player};
use crate::utils::validate_referral_pair;

/// Referral record - one per referred player, never modified after creation
#[account]
#[derive(Default)]
pub struct Referral {
    /// Player account that earned the reward
    pub referrer: Pubkey,

    /// Player account that was referred
    pub referred: Pubkey,

    /// Referrer was credited in the same transaction
    pub rewarded: bool,

    /// Timestamp when the referral was created
    pub created_at: i64,

    pub bump: u8,
}

impl Referral {
    pub const LEN: usize = 8 + // discriminator
        32 + // referrer
        32 + // referred
        1 +  // rewarded
        8 +  // created_at
        1;   // bump

    pub fn new(referrer: Pubkey, referred: Pubkey, created_at: i64, bump: u8) -> Self {
        Self {
            referrer,
            referred,
            rewarded: true,
            created_at,
            bump,
        }
    }

    /// init_if_needed hands us zeroed data on first use
    pub fn exists(&self) -> bool {
        self.referred != Pubkey::default()
    }

    /// Ok(true) for a fresh record, Ok(false) when `referrer` already got this referral.
    /// Any other referrer is rejected.
    pub fn needs_creation(&self, referrer: Pubkey) -> Result<bool> {
        if !self.exists() {
            return Ok(true);
        }
        require!(self.referrer == referrer, GameError::AlreadyReferred);
        Ok(false)
    }

    /// Record `referrer_key -> referred_key` and credit the referrer.
    /// Ok(false) when this exact referral was already recorded.
    pub fn apply(
        &mut self,
        referrer: &mut Player,
        referrer_key: Pubkey,
        referred_key: Pubkey,
        config: &GameConfig,
        now: i64,
        bump: u8,
    ) -> Result<bool> {
        config.ensure_active()?;
        validate_referral_pair(referrer_key, referred_key)?;
        if !self.needs_creation(referrer_key)? {
            return Ok(false);
        }

        referrer.register_invite(config.referral_reward)?;
        *self = Referral::new(referrer_key, referred_key, now, bump);
        Ok(true)
    }
}

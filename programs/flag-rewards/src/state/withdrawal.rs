use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::GameError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WithdrawalStatus {
    Pending,
    Completed,
    Failed,
}

/// One accepted withdrawal. Created together with the balance debit.
#[account]
pub struct WithdrawalRequest {
    pub player: Pubkey,
    pub sequence: u64,
    pub amount: u64,
    pub destination: String,
    pub status: WithdrawalStatus,
    pub created_at: i64,
    pub settled_at: Option<i64>,
    pub bump: u8,
}

impl WithdrawalRequest {
    pub const SIZE: usize = 8 + // discriminator
        32 + // player
        8 + // sequence
        8 + // amount
        4 + MAX_DESTINATION_LEN + // destination
        1 + // status
        8 + // created_at
        1 + 8 + // settled_at
        1; // bump

    pub fn new(
        player: Pubkey,
        sequence: u64,
        amount: u64,
        destination: String,
        created_at: i64,
        bump: u8,
    ) -> Self {
        Self {
            player,
            sequence,
            amount,
            destination,
            status: WithdrawalStatus::Pending,
            created_at,
            settled_at: None,
            bump,
        }
    }

    /// Pending -> Completed | Failed, nothing else
    pub fn settle(&mut self, status: WithdrawalStatus, settled_at: i64) -> Result<()> {
        require!(self.status == WithdrawalStatus::Pending, GameError::InvalidStatusTransition);
        require!(status != WithdrawalStatus::Pending, GameError::InvalidStatusTransition);

        self.status = status;
        self.settled_at = Some(settled_at);
        Ok(())
    }
}

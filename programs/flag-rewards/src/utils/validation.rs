use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::state::GameConfig;

/// Validate withdrawal amount against the configured bounds
pub fn validate_withdrawal_amount(amount: u64, config: &GameConfig) -> Result<()> {
    if amount < config.min_withdrawal {
        return Err(GameError::WithdrawalBelowMinimum.into());
    }
    if amount > config.max_withdrawal {
        return Err(GameError::WithdrawalAboveMaximum.into());
    }
    Ok(())
}

/// Validate payout destination (opaque payment-rail identifier)
pub fn validate_destination(destination: &str, config: &GameConfig) -> Result<()> {
    let trimmed = destination.trim();
    require!(!trimmed.is_empty(), GameError::InvalidDestination);
    require!(
        trimmed.len() >= config.min_destination_len as usize,
        GameError::InvalidDestination
    );
    require!(trimmed.len() <= MAX_DESTINATION_LEN, GameError::InvalidDestination);
    Ok(())
}

/// Validate referrer and referred are different players
pub fn validate_referral_pair(referrer: Pubkey, referred: Pubkey) -> Result<()> {
    if referrer == referred {
        return Err(GameError::SelfReferral.into());
    }
    Ok(())
}

/// Display name to store for a new player; blank names fall back to the default
pub fn normalize_display_name(display_name: &str) -> Result<String> {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_DISPLAY_NAME.to_string());
    }
    require!(trimmed.len() <= MAX_DISPLAY_NAME_LEN, GameError::DisplayNameTooLong);
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn config() -> GameConfig {
        GameConfig::new(Pubkey::default(), Pubkey::default(), 255)
    }

    #[test]
    fn test_withdrawal_bounds() {
        let config = config();
        assert_eq!(
            validate_withdrawal_amount(14_999, &config).unwrap_err(),
            Error::from(GameError::WithdrawalBelowMinimum)
        );
        assert!(validate_withdrawal_amount(MIN_WITHDRAWAL, &config).is_ok());
        assert!(validate_withdrawal_amount(MAX_WITHDRAWAL, &config).is_ok());
        assert_eq!(
            validate_withdrawal_amount(55_501, &config).unwrap_err(),
            Error::from(GameError::WithdrawalAboveMaximum)
        );
    }

    #[test]
    fn test_destination_length() {
        let config = config();
        assert!(validate_destination("09171234567", &config).is_ok());
        assert_eq!(
            validate_destination("", &config).unwrap_err(),
            Error::from(GameError::InvalidDestination)
        );
        assert_eq!(
            validate_destination("   ", &config).unwrap_err(),
            Error::from(GameError::InvalidDestination)
        );
        assert_eq!(
            validate_destination("091712", &config).unwrap_err(),
            Error::from(GameError::InvalidDestination)
        );
        let too_long = "9".repeat(MAX_DESTINATION_LEN + 1);
        assert_eq!(
            validate_destination(&too_long, &config).unwrap_err(),
            Error::from(GameError::InvalidDestination)
        );
    }

    #[test]
    fn test_self_referral() {
        let player = Pubkey::new_unique();
        assert_eq!(
            validate_referral_pair(player, player).unwrap_err(),
            Error::from(GameError::SelfReferral)
        );
        assert!(validate_referral_pair(player, Pubkey::new_unique()).is_ok());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(normalize_display_name("  ").unwrap(), DEFAULT_DISPLAY_NAME);
        assert_eq!(normalize_display_name(" Juan Dela Cruz ").unwrap(), "Juan Dela Cruz");
        assert_eq!(
            normalize_display_name(&"x".repeat(MAX_DISPLAY_NAME_LEN + 1)).unwrap_err(),
            Error::from(GameError::DisplayNameTooLong)
        );
    }
}

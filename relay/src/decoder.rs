use anchor_lang::{AnchorDeserialize, Discriminator};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use flag_rewards::WithdrawalRequested;

use crate::error::{RelayError, RelayResult};

/// Log prefix the runtime puts in front of `emit!` payloads
pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// Decode one transaction log line.
///
/// `Ok(None)` for lines that are not event data or carry another event.
/// A line with the right discriminator that does not deserialize is an error.
pub fn decode_withdrawal_log(line: &str) -> RelayResult<Option<WithdrawalRequested>> {
    let Some(encoded) = line.strip_prefix(PROGRAM_DATA_PREFIX) else {
        return Ok(None);
    };
    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|err| RelayError::Decode(err.to_string()))?;

    let Some(payload) = data.strip_prefix(&WithdrawalRequested::DISCRIMINATOR[..]) else {
        return Ok(None);
    };
    WithdrawalRequested::try_from_slice(payload)
        .map(Some)
        .map_err(|err| RelayError::Decode(err.to_string()))
}

use flag_rewards::WithdrawalRequested;

/// Centavos to a peso amount with two decimals
pub fn format_pesos(centavos: u64) -> String {
    format!("₱{}.{:02}", centavos / 100, centavos % 100)
}

/// Operational channel text for a committed withdrawal
pub fn withdrawal_message(event: &WithdrawalRequested) -> String {
    format!(
        "✨ New withdrawal request #{}\n\n💰 Amount: {}\n\n👤 Player: {}\n\n🧾 Request: {}",
        event.sequence,
        format_pesos(event.amount),
        event.external_id,
        event.request,
    )
}

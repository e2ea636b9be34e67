use std::fmt::Write;

use warikan_domain::{Money, Participant, SettlementResult};

use crate::config::AppConfig;

pub const NOT_COMPUTABLE: &str =
    "Not enough data to settle (need at least 2 participants and 1 payment)";
pub const NO_TRANSFERS: &str = "No settlement required";

/// Plain-text settlement report, one participant per line in roster order
pub fn settlement(
    participants: &[Participant],
    result: &SettlementResult,
    config: &AppConfig,
) -> String {
    let unit = config.currency_unit.as_str();
    let mut reply = String::with_capacity(256);

    for participant in participants {
        let _ = writeln!(
            &mut reply,
            "{}: paid {}, equal share {}, obligation {}",
            participant.name,
            amount(result.paid_amounts.get(&participant.id), unit),
            amount(shown_share(result.equal_shares.get(&participant.id)), unit),
            amount(result.obligations.get(&participant.id), unit),
        );
    }
    let _ = writeln!(&mut reply, "Total: {}", amount(result.total_amount, unit));
    reply.push('\n');

    if result.transfers.is_empty() {
        reply.push_str(NO_TRANSFERS);
    } else {
        reply.push_str("Transfers:");
        for transfer in &result.transfers {
            let _ = write!(
                &mut reply,
                "\n{} → {}: {}",
                transfer.from.name,
                transfer.to.name,
                amount(transfer.amount, unit)
            );
        }
    }

    reply
}

fn amount(value: Money, unit: &str) -> String {
    format!("{value}{unit}")
}

// Equal shares are unrounded; two decimals is enough for display.
fn shown_share(share: Money) -> Money {
    Money::from_decimal(share.as_decimal().round_dp(2))
}

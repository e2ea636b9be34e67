use crate::{
    model::{Money, Participant, ParticipantAmounts, Payment, SettlementResult, SplitConfig},
    services::{BalanceSettler, ObligationResolver, ShareCalculator},
};

/// Fewest participants for which a settlement is computed.
pub const MIN_PARTICIPANTS: usize = 2;

/// Runs share calculation, obligation resolution and balance settling in sequence.
///
/// Stateless: every call recomputes from the given snapshots and the result
/// owns all of its data.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementEngine;

impl SettlementEngine {
    /// Whether the inputs are enough to settle (at least two participants and one payment).
    pub fn is_computable(participants: &[Participant], payments: &[Payment]) -> bool {
        participants.len() >= MIN_PARTICIPANTS && !payments.is_empty()
    }

    /// Calculate the settlement
    ///
    /// Returns `None` while the inputs are not yet computable; this is not an error.
    pub fn calculate(
        &self,
        participants: &[Participant],
        payments: &[Payment],
        config: &SplitConfig,
    ) -> Option<SettlementResult> {
        if !Self::is_computable(participants, payments) {
            tracing::debug!(
                participant_count = participants.len(),
                payment_count = payments.len(),
                "Settlement not computable yet"
            );
            return None;
        }

        let equal_shares = ShareCalculator.compute_equal_shares(participants, payments);
        let total_amount: Money = payments.iter().map(Payment::effective_amount).sum();
        let paid_amounts = Self::paid_amounts(participants, payments);
        let obligations = ObligationResolver.compute_obligations(
            participants,
            &equal_shares,
            total_amount,
            config,
        );
        let transfers = BalanceSettler.settle(participants, &paid_amounts, &obligations);

        tracing::debug!(
            participant_count = participants.len(),
            payment_count = payments.len(),
            method = ?config.method,
            total_amount = %total_amount,
            shared_total = %equal_shares.total(),
            obligation_total = %obligations.total(),
            transfer_count = transfers.len(),
            "Settlement calculated"
        );

        Some(SettlementResult {
            total_amount,
            equal_shares,
            paid_amounts,
            obligations,
            transfers,
        })
    }

    fn paid_amounts(participants: &[Participant], payments: &[Payment]) -> ParticipantAmounts {
        let mut paid = ParticipantAmounts::zeroed(participants);
        for payment in payments {
            if !paid.add_existing(&payment.payer, payment.effective_amount()) {
                tracing::warn!(
                    payment_id = %payment.id,
                    payer = %payment.payer,
                    amount = %payment.amount,
                    "Payer is not a participant; payment counts toward the total only"
                );
            }
        }
        paid
    }
}

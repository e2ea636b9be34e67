use crate::model::{Participant, ParticipantAmounts, Payment};

/// Equal-share distribution service
pub struct ShareCalculator;

impl ShareCalculator {
    /// Distribute every payment evenly across the participants it does not exclude
    ///
    /// # Arguments
    /// * `participants` - Participants in display order
    /// * `payments` - Payments to distribute
    ///
    /// # Returns
    /// Unrounded share per participant. Payments that exclude everyone are
    /// left unattributed and contribute to no share.
    pub fn compute_equal_shares(
        &self,
        participants: &[Participant],
        payments: &[Payment],
    ) -> ParticipantAmounts {
        let mut shares = ParticipantAmounts::zeroed(participants);

        for payment in payments {
            let eligible: Vec<&Participant> = participants
                .iter()
                .filter(|participant| !payment.is_excluded(&participant.id))
                .collect();

            let Some(share) = payment.effective_amount().checked_split(eligible.len()) else {
                tracing::warn!(
                    payment_id = %payment.id,
                    amount = %payment.amount,
                    participant_count = participants.len(),
                    "Payment excludes every participant; amount left unattributed"
                );
                continue;
            };

            for participant in eligible {
                shares.add(&participant.id, share);
            }
        }

        shares
    }
}

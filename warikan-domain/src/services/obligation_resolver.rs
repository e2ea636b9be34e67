use crate::model::{
    Money, Participant, ParticipantAmounts, ParticipantId, SplitConfig, SplitMethod,
};

/// Resolves how much each participant should have paid
pub struct ObligationResolver;

impl ObligationResolver {
    /// Compute each participant's obligation under the configured split method
    ///
    /// # Arguments
    /// * `participants` - Participants in display order
    /// * `equal_shares` - Unrounded equal shares from [`crate::ShareCalculator`]
    /// * `total_amount` - Sum of every payment amount
    /// * `config` - Split method with fixed amounts and zero flags
    ///
    /// # Returns
    /// Obligations rounded half-up to the integer unit. Fixed amounts are kept
    /// as entered. The rounded total may drift from `total_amount`.
    pub fn compute_obligations(
        &self,
        participants: &[Participant],
        equal_shares: &ParticipantAmounts,
        total_amount: Money,
        config: &SplitConfig,
    ) -> ParticipantAmounts {
        match config.method {
            SplitMethod::Equal => participants
                .iter()
                .map(|participant| {
                    let share = equal_shares.get(&participant.id);
                    (participant.id.clone(), share.round_half_up())
                })
                .collect(),
            SplitMethod::Weighted => {
                Self::resolve_weighted(participants, equal_shares, total_amount, config)
            }
        }
    }

    fn resolve_weighted(
        participants: &[Participant],
        equal_shares: &ParticipantAmounts,
        total_amount: Money,
        config: &SplitConfig,
    ) -> ParticipantAmounts {
        let mut obligations = ParticipantAmounts::zeroed(participants);
        let mut fixed_total = Money::ZERO;
        let mut unfixed: Vec<&ParticipantId> = Vec::new();

        for participant in participants {
            if config.is_zeroed(&participant.id) {
                continue;
            }
            let fixed = config.fixed_amount(&participant.id);
            if fixed.is_positive() {
                obligations.insert(participant.id.clone(), fixed);
                fixed_total = fixed_total.saturating_add(fixed);
            } else {
                unfixed.push(&participant.id);
            }
        }

        let remaining = total_amount - fixed_total;
        if unfixed.is_empty() || !remaining.is_positive() {
            tracing::debug!(
                total_amount = %total_amount,
                fixed_total = %fixed_total,
                remaining = %remaining,
                unfixed_count = unfixed.len(),
                "No remainder to distribute across unfixed participants"
            );
            return obligations;
        }

        let unfixed_share_total: Money = unfixed.iter().map(|id| equal_shares.get(id)).sum();
        let even_split = unfixed_share_total.is_zero();

        tracing::debug!(
            total_amount = %total_amount,
            fixed_total = %fixed_total,
            remaining = %remaining,
            unfixed_count = unfixed.len(),
            unfixed_share_total = %unfixed_share_total,
            even_split,
            "Distributing remainder across unfixed participants"
        );

        for id in &unfixed {
            let portion = if even_split {
                remaining.checked_split(unfixed.len())
            } else {
                remaining.checked_scale(equal_shares.get(id), unfixed_share_total)
            };
            obligations.insert(
                (*id).clone(),
                portion.unwrap_or(Money::ZERO).round_half_up(),
            );
        }

        obligations
    }
}

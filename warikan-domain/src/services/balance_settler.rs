use crate::model::{Money, Participant, ParticipantAmounts, Transfer};

/// Greedy debtor-to-creditor transfer construction
pub struct BalanceSettler;

struct OpenBalance<'a> {
    participant: &'a Participant,
    remaining: Money,
}

impl BalanceSettler {
    /// Build transfers that clear every `paid - obligation` balance
    ///
    /// Creditors and debtors are matched largest-first; ties keep participant
    /// order. Produces at most `creditors + debtors - 1` transfers.
    pub fn settle(
        &self,
        participants: &[Participant],
        paid_amounts: &ParticipantAmounts,
        obligations: &ParticipantAmounts,
    ) -> Vec<Transfer> {
        let mut creditors = Vec::new();
        let mut debtors = Vec::new();

        for participant in participants {
            let balance = paid_amounts.get(&participant.id) - obligations.get(&participant.id);
            if balance.is_positive() {
                creditors.push(OpenBalance {
                    participant,
                    remaining: balance,
                });
            } else if balance.is_negative() {
                debtors.push(OpenBalance {
                    participant,
                    remaining: -balance,
                });
            }
        }

        // `sort_by` is stable, equal magnitudes stay in participant order.
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let mut transfers = Vec::with_capacity(creditors.len() + debtors.len());
        let mut creditor_idx = 0;
        let mut debtor_idx = 0;

        while creditor_idx < creditors.len() && debtor_idx < debtors.len() {
            let creditor = &mut creditors[creditor_idx];
            let debtor = &mut debtors[debtor_idx];

            let amount = creditor.remaining.min(debtor.remaining);
            if amount.is_positive() {
                transfers.push(Transfer {
                    from: debtor.participant.clone(),
                    to: creditor.participant.clone(),
                    amount,
                });
            }
            creditor.remaining -= amount;
            debtor.remaining -= amount;

            if creditor.remaining.is_zero() {
                creditor_idx += 1;
            }
            if debtor.remaining.is_zero() {
                debtor_idx += 1;
            }
        }

        let unsettled_credit: Money = creditors[creditor_idx..].iter().map(|c| c.remaining).sum();
        let unsettled_debt: Money = debtors[debtor_idx..].iter().map(|d| d.remaining).sum();
        tracing::debug!(
            creditor_count = creditors.len(),
            debtor_count = debtors.len(),
            transfer_count = transfers.len(),
            unsettled_credit = %unsettled_credit,
            unsettled_debt = %unsettled_debt,
            "Balances settled"
        );

        transfers
    }
}

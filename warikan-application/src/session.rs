use crate::{error::SessionError, model::PaymentDraft, ports::IdGenerator};
use fxhash::FxHashSet;
use warikan_domain::{
    Money, Participant, ParticipantAmounts, ParticipantId, Payment, PaymentId, SettlementEngine,
    SettlementResult, ShareCalculator, SplitConfig, SplitMethod,
};

pub const DEFAULT_PAYMENT_DESCRIPTION: &str = "Payment";

/// Participants, payments and split settings of one bill-splitting session.
///
/// The session validates input the way the entry form does (unique names,
/// known payer, positive amount). Settlement is recomputed from scratch on
/// every [`Session::calculate`] call.
pub struct Session<G: IdGenerator> {
    ids: G,
    participants: Vec<Participant>,
    payments: Vec<Payment>,
    split: SplitConfig,
    engine: SettlementEngine,
}

impl<G: IdGenerator> Session<G> {
    pub fn new(ids: G) -> Self {
        Self {
            ids,
            participants: Vec::new(),
            payments: Vec::new(),
            split: SplitConfig::default(),
            engine: SettlementEngine,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn split(&self) -> &SplitConfig {
        &self.split
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn participant_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn payment(&self, id: &PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| &p.id == id)
    }

    pub fn add_participant(&mut self, name: &str) -> Result<ParticipantId, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.participant_by_name(name).is_some() {
            return Err(SessionError::DuplicateName(name.to_owned()));
        }

        let id = self.ids.participant_id();
        tracing::debug!(participant_id = %id, name, "Participant added");
        self.participants.push(Participant::new(id.clone(), name));
        Ok(id)
    }

    /// Removes a participant together with every payment they paid.
    ///
    /// Exclusion lists, fixed amounts and zero flags that mention the
    /// participant are left as they are.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, SessionError> {
        let Some(index) = self.participants.iter().position(|p| &p.id == id) else {
            return Err(SessionError::UnknownParticipant(id.clone()));
        };
        let removed = self.participants.remove(index);

        let before = self.payments.len();
        self.payments.retain(|payment| &payment.payer != id);
        tracing::debug!(
            participant_id = %id,
            removed_payments = before - self.payments.len(),
            "Participant removed"
        );

        Ok(removed)
    }

    pub fn add_payment(&mut self, draft: PaymentDraft) -> Result<PaymentId, SessionError> {
        let id = self.ids.payment_id();
        let payment = self.validate_payment(id.clone(), draft)?;
        tracing::debug!(
            payment_id = %id,
            payer = %payment.payer,
            amount = %payment.amount,
            excluded_count = payment.excluded.len(),
            "Payment added"
        );
        self.payments.push(payment);
        Ok(id)
    }

    /// Replaces a payment in place, keeping its id and position.
    pub fn update_payment(
        &mut self,
        id: &PaymentId,
        draft: PaymentDraft,
    ) -> Result<(), SessionError> {
        let Some(index) = self.payments.iter().position(|p| &p.id == id) else {
            return Err(SessionError::UnknownPayment(id.clone()));
        };
        let payment = self.validate_payment(id.clone(), draft)?;
        tracing::debug!(payment_id = %id, amount = %payment.amount, "Payment updated");
        self.payments[index] = payment;
        Ok(())
    }

    pub fn remove_payment(&mut self, id: &PaymentId) -> Result<Payment, SessionError> {
        let Some(index) = self.payments.iter().position(|p| &p.id == id) else {
            return Err(SessionError::UnknownPayment(id.clone()));
        };
        tracing::debug!(payment_id = %id, "Payment removed");
        Ok(self.payments.remove(index))
    }

    pub fn set_split_method(&mut self, method: SplitMethod) {
        tracing::debug!(?method, "Split method changed");
        self.split.method = method;
    }

    /// Sets a fixed obligation for the weighted split. Zero clears it.
    pub fn set_fixed_amount(
        &mut self,
        id: &ParticipantId,
        amount: Money,
    ) -> Result<(), SessionError> {
        self.ensure_participant(id)?;
        if amount.is_negative() {
            return Err(SessionError::NegativeFixedAmount(amount));
        }
        if amount.is_zero() {
            self.split.fixed_amounts.remove(id);
        } else {
            self.split.fixed_amounts.insert(id.clone(), amount);
        }
        tracing::debug!(participant_id = %id, amount = %amount, "Fixed amount set");
        Ok(())
    }

    pub fn set_zeroed(&mut self, id: &ParticipantId, zeroed: bool) -> Result<(), SessionError> {
        self.ensure_participant(id)?;
        if zeroed {
            self.split.zeroed.insert(id.clone());
        } else {
            self.split.zeroed.remove(id);
        }
        tracing::debug!(participant_id = %id, zeroed, "Zero flag set");
        Ok(())
    }

    /// Unrounded equal shares, available even before a settlement can be computed.
    pub fn equal_shares(&self) -> ParticipantAmounts {
        ShareCalculator.compute_equal_shares(&self.participants, &self.payments)
    }

    pub fn is_computable(&self) -> bool {
        SettlementEngine::is_computable(&self.participants, &self.payments)
    }

    pub fn calculate(&self) -> Option<SettlementResult> {
        self.engine.calculate(&self.participants, &self.payments, &self.split)
    }

    pub fn reset(&mut self) {
        tracing::debug!(
            participant_count = self.participants.len(),
            payment_count = self.payments.len(),
            "Session reset"
        );
        self.participants.clear();
        self.payments.clear();
        self.split = SplitConfig::default();
    }

    fn ensure_participant(&self, id: &ParticipantId) -> Result<(), SessionError> {
        match self.participant(id) {
            Some(_) => Ok(()),
            None => Err(SessionError::UnknownParticipant(id.clone())),
        }
    }

    fn validate_payment(
        &self,
        id: PaymentId,
        draft: PaymentDraft,
    ) -> Result<Payment, SessionError> {
        self.ensure_participant(&draft.payer)?;
        if !draft.amount.is_positive() {
            return Err(SessionError::NonPositiveAmount(draft.amount));
        }
        for excluded in &draft.excluded {
            self.ensure_participant(excluded)?;
        }

        let description = match draft.description.trim() {
            "" => DEFAULT_PAYMENT_DESCRIPTION.to_owned(),
            description => description.to_owned(),
        };
        let excluded: FxHashSet<ParticipantId> = draft.excluded.into_iter().collect();

        Ok(Payment {
            id,
            payer: draft.payer,
            description,
            amount: draft.amount,
            excluded,
        })
    }
}

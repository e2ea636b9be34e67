use warikan_domain::{Money, ParticipantId};

/// Payment form contents before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    pub payer: ParticipantId,
    pub description: String,
    pub amount: Money,
    pub excluded: Vec<ParticipantId>,
}

impl PaymentDraft {
    pub fn new(payer: ParticipantId, amount: Money) -> Self {
        Self {
            payer,
            description: String::new(),
            amount,
            excluded: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn excluding<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        self.excluded.extend(ids);
        self
    }
}

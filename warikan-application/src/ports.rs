use std::sync::atomic::{AtomicU64, Ordering};
use warikan_domain::{ParticipantId, PaymentId};

pub trait IdGenerator: Send + Sync {
    fn participant_id(&self) -> ParticipantId;
    fn payment_id(&self) -> PaymentId;
}

/// Deterministic ids (`participant-1`, `payment-1`, ...), one counter per kind.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    participants: AtomicU64,
    payments: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn participant_id(&self) -> ParticipantId {
        let next = self.participants.fetch_add(1, Ordering::Relaxed) + 1;
        ParticipantId::new(format!("participant-{next}"))
    }

    fn payment_id(&self) -> PaymentId {
        let next = self.payments.fetch_add(1, Ordering::Relaxed) + 1;
        PaymentId::new(format!("payment-{next}"))
    }
}

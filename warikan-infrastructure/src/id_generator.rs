use uuid::Uuid;
use warikan_application::IdGenerator;
use warikan_domain::{ParticipantId, PaymentId};

/// Random v4 UUID ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn participant_id(&self) -> ParticipantId {
        ParticipantId::new(Uuid::new_v4().to_string())
    }

    fn payment_id(&self) -> PaymentId {
        PaymentId::new(Uuid::new_v4().to_string())
    }
}

use thiserror::Error;
use warikan_domain::{Money, ParticipantId, PaymentId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Participant name must not be empty")]
    EmptyName,
    #[error("Participant '{0}' already exists")]
    DuplicateName(String),
    #[error("Unknown participant '{0}'")]
    UnknownParticipant(ParticipantId),
    #[error("Unknown payment '{0}'")]
    UnknownPayment(PaymentId),
    #[error("Payment amount must be positive (found {0})")]
    NonPositiveAmount(Money),
    #[error("Fixed amount must not be negative (found {0})")]
    NegativeFixedAmount(Money),
}

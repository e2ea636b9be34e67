#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Money, Participant, ParticipantAmounts, ParticipantId, Payment, PaymentId, SettlementResult,
    SplitConfig, SplitMethod, Transfer,
};
pub use services::{
    BalanceSettler, MIN_PARTICIPANTS, ObligationResolver, SettlementEngine, ShareCalculator,
};

#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod session;

pub use error::SessionError;
pub use model::PaymentDraft;
pub use ports::{IdGenerator, SequentialIdGenerator};
pub use session::{DEFAULT_PAYMENT_DESCRIPTION, Session};

pub mod balance_settler;
pub mod obligation_resolver;
pub mod settlement_engine;
pub mod share_calculator;

pub use balance_settler::BalanceSettler;
pub use obligation_resolver::ObligationResolver;
pub use settlement_engine::{MIN_PARTICIPANTS, SettlementEngine};
pub use share_calculator::ShareCalculator;

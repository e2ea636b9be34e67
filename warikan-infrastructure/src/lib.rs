#![warn(clippy::uninlined_format_args)]

pub mod id_generator;
pub mod script;

pub use id_generator::UuidIdGenerator;
pub use script::{ScriptError, ScriptPayment, ScriptSplit, ScriptSplitMethod, SessionScript};

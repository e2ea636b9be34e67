use std::env;

pub const DEFAULT_CURRENCY_UNIT: &str = "円";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub currency_unit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_unit: DEFAULT_CURRENCY_UNIT.to_owned(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let currency_unit = lookup("WARIKAN_CURRENCY_UNIT")
            .map(|unit| unit.trim().to_owned())
            .filter(|unit| !unit.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY_UNIT.to_owned());

        tracing::debug!(currency_unit = %currency_unit, "Configuration loaded");
        Self { currency_unit }
    }
}

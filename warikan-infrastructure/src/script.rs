//! JSON session scripts.
//!
//! A script lists participants by name, then payments and split settings that
//! refer to those names. Replaying a script goes through the regular
//! [`Session`] operations, so it is validated exactly like interactive input.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, io, path::Path};
use thiserror::Error;
use warikan_application::{IdGenerator, PaymentDraft, Session, SessionError};
use warikan_domain::{Money, ParticipantId, SplitMethod};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("Invalid session script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown participant '{name}' in {context}")]
    UnknownName { name: String, context: String },
    #[error("Cannot add participant '{name}': {source}")]
    Participant { name: String, source: SessionError },
    #[error("Payment #{index} is invalid: {source}")]
    Payment { index: usize, source: SessionError },
    #[error("Invalid split setting for '{name}': {source}")]
    Split { name: String, source: SessionError },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionScript {
    pub participants: Vec<String>,
    #[serde(default)]
    pub payments: Vec<ScriptPayment>,
    #[serde(default)]
    pub split: Option<ScriptSplit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptPayment {
    pub payer: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptSplit {
    #[serde(default)]
    pub method: ScriptSplitMethod,
    #[serde(default)]
    pub fixed: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub zeroed: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptSplitMethod {
    #[default]
    Equal,
    #[serde(alias = "fixed")]
    Weighted,
}

impl From<ScriptSplitMethod> for SplitMethod {
    fn from(method: ScriptSplitMethod) -> Self {
        match method {
            ScriptSplitMethod::Equal => SplitMethod::Equal,
            ScriptSplitMethod::Weighted => SplitMethod::Weighted,
        }
    }
}

impl SessionScript {
    pub fn from_json(source: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Applies participants, payments and split settings to `session` in order.
    ///
    /// Stops at the first rejected entry; entries before it stay applied.
    pub fn replay<G: IdGenerator>(&self, session: &mut Session<G>) -> Result<(), ScriptError> {
        for name in &self.participants {
            session
                .add_participant(name)
                .map_err(|source| ScriptError::Participant {
                    name: name.clone(),
                    source,
                })?;
        }

        for (offset, payment) in self.payments.iter().enumerate() {
            let index = offset + 1;
            let context = || format!("payment #{index}");
            let payer = resolve(session, &payment.payer, context)?;
            let excluded = payment
                .excluded
                .iter()
                .map(|name| resolve(session, name, context))
                .collect::<Result<Vec<_>, _>>()?;

            let draft = PaymentDraft::new(payer, Money::from_decimal(payment.amount))
                .with_description(payment.description.as_str())
                .excluding(excluded);
            session
                .add_payment(draft)
                .map_err(|source| ScriptError::Payment { index, source })?;
        }

        if let Some(split) = &self.split {
            session.set_split_method(split.method.into());
            for (name, amount) in &split.fixed {
                let id = resolve(session, name, || "fixed amounts".to_owned())?;
                session
                    .set_fixed_amount(&id, Money::from_decimal(*amount))
                    .map_err(|source| ScriptError::Split {
                        name: name.clone(),
                        source,
                    })?;
            }
            for name in &split.zeroed {
                let id = resolve(session, name, || "zeroed participants".to_owned())?;
                session
                    .set_zeroed(&id, true)
                    .map_err(|source| ScriptError::Split {
                        name: name.clone(),
                        source,
                    })?;
            }
        }

        tracing::debug!(
            participant_count = self.participants.len(),
            payment_count = self.payments.len(),
            method = ?self.split.as_ref().map(|split| split.method),
            "Session script replayed"
        );
        Ok(())
    }
}

fn resolve<G, F>(
    session: &Session<G>,
    name: &str,
    context: F,
) -> Result<ParticipantId, ScriptError>
where
    G: IdGenerator,
    F: FnOnce() -> String,
{
    match session.participant_by_name(name.trim()) {
        Some(participant) => Ok(participant.id.clone()),
        None => Err(ScriptError::UnknownName {
            name: name.to_owned(),
            context: context(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use warikan_application::SequentialIdGenerator;

    #[fixture]
    fn session() -> Session<SequentialIdGenerator> {
        Session::new(SequentialIdGenerator::new())
    }

    const DINNER: &str = r#"{
        "participants": ["Alice", "Bob", "Carol"],
        "payments": [
            { "payer": "Alice", "description": "Dinner", "amount": 600 },
            { "payer": "Bob", "amount": 300, "excluded": ["Carol"] }
        ],
        "split": { "method": "weighted", "fixed": { "Bob": 200 }, "zeroed": ["Alice"] }
    }"#;

    #[test]
    fn parses_full_script() {
        let script = SessionScript::from_json(DINNER).expect("valid script");

        assert_eq!(script.participants, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(script.payments.len(), 2);
        assert_eq!(script.payments[0].amount, Decimal::from(600));
        assert_eq!(script.payments[1].excluded, vec!["Carol"]);
        let split = script.split.expect("split present");
        assert_eq!(split.method, ScriptSplitMethod::Weighted);
        assert_eq!(split.fixed.get("Bob"), Some(&Decimal::from(200)));
    }

    #[rstest]
    #[case::equal(r#""equal""#, ScriptSplitMethod::Equal)]
    #[case::weighted(r#""weighted""#, ScriptSplitMethod::Weighted)]
    #[case::fixed_alias(r#""fixed""#, ScriptSplitMethod::Weighted)]
    fn parses_split_methods(#[case] json: &str, #[case] expected: ScriptSplitMethod) {
        let method: ScriptSplitMethod = serde_json::from_str(json).expect("valid method");
        assert_eq!(method, expected);
    }

    #[rstest]
    #[case::not_json("participants: Alice")]
    #[case::missing_participants(r#"{ "payments": [] }"#)]
    #[case::unknown_field(r#"{ "participants": [], "currency": "JPY" }"#)]
    #[case::unknown_method(r#"{ "participants": [], "split": { "method": "random" } }"#)]
    fn rejects_malformed_scripts(#[case] json: &str) {
        assert!(matches!(
            SessionScript::from_json(json),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn accepts_fractional_amounts() {
        let script = SessionScript::from_json(
            r#"{ "participants": ["A", "B"], "payments": [{ "payer": "A", "amount": 12.5 }] }"#,
        )
        .expect("valid script");
        assert_eq!(script.payments[0].amount, Decimal::new(125, 1));
    }

    #[rstest]
    fn replay_builds_session(mut session: Session<SequentialIdGenerator>) {
        let script = SessionScript::from_json(DINNER).expect("valid script");

        script.replay(&mut session).expect("script replays");

        let names: Vec<&str> = session.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(session.payments()[0].description, "Dinner");
        assert_eq!(session.split().method, SplitMethod::Weighted);

        let result = session.calculate().expect("computable");
        let obligations: Vec<Money> = session
            .participants()
            .iter()
            .map(|p| result.obligations.get(&p.id))
            .collect();
        assert_eq!(
            obligations,
            vec![Money::ZERO, Money::from_i64(200), Money::from_i64(700)]
        );
    }

    #[rstest]
    #[case::unknown_payer(
        r#"{ "participants": ["A", "B"], "payments": [{ "payer": "Z", "amount": 10 }] }"#,
        "Unknown participant 'Z' in payment #1"
    )]
    #[case::unknown_exclusion(
        r#"{ "participants": ["A", "B"], "payments": [
            { "payer": "A", "amount": 10 },
            { "payer": "A", "amount": 10, "excluded": ["Q"] }
        ] }"#,
        "Unknown participant 'Q' in payment #2"
    )]
    #[case::duplicate_participant(
        r#"{ "participants": ["A", "A"] }"#,
        "Cannot add participant 'A': Participant 'A' already exists"
    )]
    #[case::non_positive_amount(
        r#"{ "participants": ["A", "B"], "payments": [{ "payer": "A", "amount": 0 }] }"#,
        "Payment #1 is invalid: Payment amount must be positive (found 0)"
    )]
    #[case::negative_fixed_amount(
        r#"{ "participants": ["A", "B"], "split": { "fixed": { "B": -5 } } }"#,
        "Invalid split setting for 'B': Fixed amount must not be negative (found -5)"
    )]
    #[case::unknown_zeroed(
        r#"{ "participants": ["A", "B"], "split": { "zeroed": ["C"] } }"#,
        "Unknown participant 'C' in zeroed participants"
    )]
    fn replay_reports_rejected_entries(
        mut session: Session<SequentialIdGenerator>,
        #[case] json: &str,
        #[case] expected: &str,
    ) {
        let script = SessionScript::from_json(json).expect("valid script");

        let err = script.replay(&mut session).expect_err("replay should fail");

        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SessionScript::load("/nonexistent/warikan/session.json")
            .expect_err("file does not exist");
        assert!(matches!(err, ScriptError::Read { .. }));
        assert!(
            err.to_string()
                .starts_with("Failed to read '/nonexistent/warikan/session.json'")
        );
    }
}

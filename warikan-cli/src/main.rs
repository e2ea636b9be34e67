#![warn(clippy::uninlined_format_args)]

mod config;
mod render;

use std::{borrow::Cow, env, process};

use config::AppConfig;
use tracing_subscriber::EnvFilter;
use warikan_application::Session;
use warikan_infrastructure::{SessionScript, UuidIdGenerator};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    init_logging();

    let Some(path) = env::args().nth(1) else {
        return Err("Usage: warikan <session.json>".into());
    };

    let config = AppConfig::from_env();
    let script = SessionScript::load(&path).map_err(|err| err.to_string())?;

    let mut session = Session::new(UuidIdGenerator);
    script.replay(&mut session).map_err(|err| err.to_string())?;

    let output = match session.calculate() {
        Some(result) => render::settlement(session.participants(), &result, &config),
        None => render::NOT_COMPUTABLE.to_owned(),
    };
    println!("{output}");

    Ok(())
}

/// Logs go to stderr so stdout carries only the settlement
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

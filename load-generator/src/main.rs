use std::io::{BufWriter, Write};

use anyhow::Context;
use load_generator::{config::EnvVars, generator::EventGenerator};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        // stdout carries the records
        .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
        .with(sentry::integrations::tracing::layer())
        .init();
    tracing::info!("Starting xAPI load generator...");

    let env_vars = EnvVars::new();

    let _guard = if let Some(sentry_dsn) = env_vars.sentry_dsn.clone() {
        tracing::info!("initializing Sentry");
        Some(sentry::init((
            sentry_dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(env_vars.environment.to_string().into()),
                ..Default::default()
            },
        )))
    } else {
        None
    };

    if let Err(e) = run(&env_vars) {
        tracing::error!("Error generating events: {:?}", e);
    } else {
        tracing::info!(batch_size = env_vars.batch_size, "Successfully generated events");
    }
}

fn run(env_vars: &EnvVars) -> anyhow::Result<()> {
    let mut generator = EventGenerator::new(env_vars.batch_size);
    let events = generator.batch()?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    for event in &events {
        serde_json::to_writer(&mut out, event).context("unable to write event")?;
        out.write_all(b"\n")?;
    }
    out.flush().context("unable to flush events")?;

    Ok(())
}

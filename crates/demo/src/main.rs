//! Behavior tree demo entry point.
mod config;
mod patrol;

use anyhow::Result;
use async_behavior_tree::{Cause, Payload, Status};
use config::DemoConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::from_env();
    tracing::info!(?config, "building patrol tree");

    let tree = patrol::build(&config)?;
    let status = tree.evaluate().await;
    report(&status);

    Ok(())
}

fn report(status: &Status<patrol::Report>) {
    match status {
        Status::Success(Payload::Value(value)) => tracing::info!(%value, "tree succeeded"),
        Status::Success(Payload::Children(children)) => {
            tracing::info!(children = children.len(), "tree succeeded")
        }
        Status::Success(Payload::Unit) => tracing::info!("tree succeeded"),
        Status::Failure(Cause::Domain) => tracing::warn!("tree failed"),
        Status::Failure(Cause::Error(error)) => tracing::warn!(%error, "tree failed with error"),
    }
}

mod cli;
mod config;
mod documents;
mod errors;
mod fields;
mod matching;
mod ranking;
mod routes;
mod state;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Vocabularies and the field extractor are shared by both commands
    let state = AppState::from_config(config.clone())?;
    let vocabularies = state.matcher.vocabularies();
    info!(
        "Vocabularies loaded: {} v{} ({} skills), {} v{} ({} skills); field extractor: {}",
        vocabularies.resume.name(),
        vocabularies.resume.version(),
        vocabularies.resume.len(),
        vocabularies.jd.name(),
        vocabularies.jd.version(),
        vocabularies.jd.len(),
        state.field_extractor.name()
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(state).await,
        Commands::Rank {
            resumes,
            jds,
            output,
        } => {
            // Folder reads and scoring are CPU-bound; keep them off the runtime threads.
            tokio::task::spawn_blocking(move || {
                cli::run_rank(
                    &state.matcher,
                    state.field_extractor.as_ref(),
                    &state.config.text_encodings,
                    &resumes,
                    &jds,
                    &output,
                )
                .map(|_| ())
            })
            .await?
        }
    }
}

async fn serve(state: AppState) -> Result<()> {
    info!("Starting skillmatch API v{}", env!("CARGO_PKG_VERSION"));

    let port = state.config.port;
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

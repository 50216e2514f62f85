use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use clientdesk_ai::{ClassificationAdvisor, OpenAIProvider, ProviderConfig};
use clientdesk_core::repositories::Repositories;
use clientdesk_core::scheduler::{QstashClient, SignatureVerifier};
use clientdesk_core::web::{start_web_server, AppState};
use clientdesk_core::Database;

#[derive(Parser, Debug, Clone)]
#[command(name = "clientdesk")]
#[command(author, version, about = "clientdesk - CRM backend with inactivity automation")]
struct Args {
    /// Address to which the HTTP server will bind
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:3000")]
    server_addr: String,

    /// Postgres connection URL. Required unless --in-memory is given.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Keep everything in process memory (nothing survives a restart)
    #[arg(long, default_value = "false")]
    in_memory: bool,

    /// Public origin of this service; the scheduler webhook is built from it
    #[arg(long, env = "APP_BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,

    #[arg(long, env = "QSTASH_URL")]
    qstash_url: Option<String>,

    #[arg(long, env = "QSTASH_TOKEN")]
    qstash_token: Option<String>,

    #[arg(long, env = "QSTASH_CURRENT_SIGNING_KEY")]
    qstash_current_signing_key: Option<String>,

    #[arg(long, env = "QSTASH_NEXT_SIGNING_KEY")]
    qstash_next_signing_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_BASE")]
    openai_api_base: Option<String>,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    openai_model: String,

    /// Load the demo data set on start-up
    #[arg(long, default_value = "false")]
    seed: bool,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("clientdesk=info".parse().unwrap_or_default())
        .add_directive("clientdesk_core=info".parse().unwrap_or_default())
        .add_directive("clientdesk_ai=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

async fn build_repositories(args: &Args) -> anyhow::Result<Repositories> {
    if args.in_memory {
        warn!("Running with in-memory storage; data is lost on exit");
        return Ok(Repositories::in_memory());
    }
    let url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL (or --database-url) is required unless --in-memory is set")?;
    let db = Database::new(url).await?;
    db.migrate().await?;
    Ok(Repositories::postgres(db.pool().clone()))
}

fn build_state(args: &Args, repos: Repositories) -> AppState {
    let mut state = AppState::new(repos, args.base_url.clone());

    match args.openai_api_key.as_ref() {
        Some(key) => {
            let mut config = ProviderConfig::openai(key.clone());
            config.api_base = args.openai_api_base.clone();
            config.default_model = args.openai_model.clone();
            let advisor = ClassificationAdvisor::new(Arc::new(OpenAIProvider::new(config)));
            info!("Classification advisor enabled ({})", advisor.provider_name());
            state = state.with_advisor(advisor);
        }
        None => warn!("OPENAI_API_KEY not set; /ai routes will fail"),
    }

    match args.qstash_token.as_ref() {
        Some(token) => {
            let client = QstashClient::new(args.qstash_url.clone(), token.clone());
            state = state.with_scheduler(Arc::new(client));
        }
        None => warn!("QSTASH_TOKEN not set; /setup-automation is unavailable"),
    }

    match (
        args.qstash_current_signing_key.as_ref(),
        args.qstash_next_signing_key.as_ref(),
    ) {
        (Some(current), Some(next)) => {
            state = state.with_verifier(SignatureVerifier::new(current.clone(), next.clone()));
        }
        _ => warn!("QStash signing keys not set; POST /check-inactive-clients will be rejected"),
    }

    state
}

async fn run_server(args: Args) -> anyhow::Result<()> {
    let addr: SocketAddr = args
        .server_addr
        .parse()
        .with_context(|| format!("invalid --server-addr '{}'", args.server_addr))?;

    let repos = build_repositories(&args).await?;
    let state = build_state(&args, repos);

    if args.seed {
        let summary = state.seed.seed().await?;
        info!("{}", summary.message);
    }

    let (shutdown_tx, server_done) = start_web_server(addr, state).await?;

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received, shutting down...");
    let _ = shutdown_tx.send(());
    server_done.await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "clientdesk starting. addr={}, in_memory={}, base_url={}",
        args.server_addr, args.in_memory, args.base_url
    );

    if let Err(e) = run_server(args).await {
        error!("Server error: {:?}", e);
        return Err(e);
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

// src/web/mod.rs

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use axum_server::{Handle, Server};
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use clientdesk_ai::ClassificationAdvisor;

use crate::repositories::Repositories;
use crate::scheduler::{ScheduleRegistry, SignatureVerifier};
use crate::services::{ClientService, ConfigService, SeedService};
use crate::tasks::SweepTrigger;
use crate::Error;

/// Everything the handlers need. Cheap to clone; every service holds `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub clients: ClientService,
    pub config: ConfigService,
    pub seed: SeedService,
    pub sweep: SweepTrigger,
    pub advisor: Option<ClassificationAdvisor>,
    pub scheduler: Option<Arc<dyn ScheduleRegistry>>,
    pub verifier: Option<SignatureVerifier>,
    /// Public origin of this service, used to build the webhook URL.
    pub base_url: String,
}

impl AppState {
    pub fn new(repos: Repositories, base_url: impl Into<String>) -> Self {
        let config = ConfigService::new(repos.config.clone());
        Self {
            clients: ClientService::new(
                repos.clients.clone(),
                repos.interactions.clone(),
                repos.analyses.clone(),
            ),
            seed: SeedService::new(repos.clients.clone(), repos.interactions.clone()),
            sweep: SweepTrigger::new(config.clone(), repos.clients.clone()),
            config,
            advisor: None,
            scheduler: None,
            verifier: None,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_advisor(mut self, advisor: ClassificationAdvisor) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn ScheduleRegistry>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_verifier(mut self, verifier: SignatureVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn webhook_url(&self) -> String {
        format!("{}/check-inactive-clients", self.base_url)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/check-inactive-clients",
            get(handlers::sweep::manual_trigger).post(handlers::sweep::scheduled_trigger),
        )
        .route(
            "/setup-automation",
            get(handlers::automation::list_schedules).post(handlers::automation::setup_automation),
        )
        .route("/ai/analyze-client", post(handlers::advisor::analyze_client))
        .route("/ai/categorize-client", post(handlers::advisor::categorize_client))
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route("/clients/count", get(handlers::clients::count_clients))
        .route("/clients/stats", get(handlers::clients::client_stats))
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client).patch(handlers::clients::update_client),
        )
        .route("/clients/{id}/interactions", post(handlers::clients::add_interaction))
        .route("/clients/{id}/analyses", post(handlers::clients::add_analysis))
        .route("/automation-config", get(handlers::config::get_all))
        .route("/automation-config/initialize", post(handlers::config::initialize))
        .route(
            "/automation-config/{key}",
            get(handlers::config::get_one).put(handlers::config::put_one),
        )
        .route("/seed-data", post(handlers::misc::seed_data))
        .route("/interaction-types", get(handlers::misc::interaction_types))
        .route("/health", get(handlers::misc::health))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Binds `addr` and serves in the background. Send on (or drop) the returned
/// sender to shut down gracefully; the join handle resolves once connections drain.
pub async fn start_web_server(
    addr: SocketAddr,
    state: AppState,
) -> Result<(oneshot::Sender<()>, tokio::task::JoinHandle<()>), Error> {
    let app = router(state);

    let (shutdown_send, shutdown_recv) = oneshot::channel::<()>();
    let handle = Handle::new();
    let handle_clone = handle.clone();

    tokio::spawn(async move {
        let _ = shutdown_recv.await;
        info!("Web server shutting down...");
        handle_clone.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
    });

    let server = Server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service());

    info!("clientdesk listening on http://{}", addr);
    let join = tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("Web server error: {}", e);
        }
        info!("Web server stopped.");
    });

    Ok((shutdown_send, join))
}

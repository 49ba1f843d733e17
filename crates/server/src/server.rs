use std::net::SocketAddr;

use {
    axum::{
        Router,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
    },
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::info,
};

use {
    parlance_domain::{Domain, ResponseTemplate},
    parlance_tracker::Tracker,
};

use crate::{request::NlgRequest, state::AppState};

/// Default port of the NLG endpoint.
pub const DEFAULT_PORT: u16 = 5056;

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub bind: String,
    pub port: u16,
    #[cfg(feature = "tls")]
    pub tls: crate::tls::TlsOptions,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            #[cfg(feature = "tls")]
            tls: crate::tls::TlsOptions::default(),
        }
    }
}

// ── App construction ─────────────────────────────────────────────────────────

/// Build the NLG router (shared between production startup and tests).
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/nlg", post(nlg_handler).options(nlg_options_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Start the NLG HTTP server and serve until shutdown.
pub async fn start_server(domain: Domain, opts: ServerOptions) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", opts.bind, opts.port).parse()?;

    #[cfg(feature = "tls")]
    let tls_enabled = opts.tls.is_configured();
    #[cfg(not(feature = "tls"))]
    let tls_enabled = false;

    // Startup banner.
    let lines = [
        format!("parlance nlg server v{}", env!("CARGO_PKG_VERSION")),
        format!(
            "listening on {}{}",
            addr,
            if tls_enabled { " (tls)" } else { "" }
        ),
        format!("{} response templates loaded", domain.template_count()),
    ];
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) + 4;
    info!("┌{}┐", "─".repeat(width));
    for line in &lines {
        info!("│  {:<w$}│", line, w = width - 2);
    }
    info!("└{}┘", "─".repeat(width));

    let app = build_app(AppState::new(domain));

    #[cfg(feature = "tls")]
    if tls_enabled {
        let config = crate::tls::build_server_config(&opts.tls)?;
        let rustls_config = axum_server::tls_rustls::RustlsConfig::from_config(config.into());
        axum_server::bind_rustls(addr, rustls_config)
            .serve(app.into_make_service())
            .await?;
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "templates": state.domain.template_count(),
    }))
}

/// Render one response template against the shipped conversation state.
///
/// An unknown template renders as JSON `null` with status 200; the generator
/// already logged the miss. Malformed bodies get axum's default rejection.
async fn nlg_handler(
    State(state): State<AppState>,
    Json(request): Json<NlgRequest>,
) -> Json<Option<ResponseTemplate>> {
    let tracker = Tracker::from_events(
        request.tracker.sender_id,
        &request.tracker.events,
        &state.domain.slots,
    );
    let rendered = state.generator.generate(
        &request.template,
        &tracker,
        request.channel.as_deref(),
        &request.arguments,
    );
    Json(rendered)
}

async fn nlg_options_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

//! casaval Web Server
//!
//! Axum-based REST API for the casaval housing valuation service.
//!
//! The server owns two pieces of state: the inference engine (absent when the
//! model artifacts failed to load at startup — every predict-class endpoint
//! then answers 503) and the in-memory prediction history ledger. All error
//! paths render the generic JSON envelope `{"error": "..."}`.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use casaval_core::{HistoryLedger, InferenceEngine};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only in production)
    pub allowed_origins: Vec<String>,
    /// Optional bound on the history ledger (None = unbounded)
    pub history_capacity: Option<usize>,
}

/// Shared application state
pub struct AppState {
    /// Loaded model artifacts; `None` means the engine is in the documented
    /// unavailable state and predict-class endpoints must short-circuit.
    pub engine: Option<InferenceEngine>,
    pub history: HistoryLedger,
}

impl AppState {
    /// The engine, or the 503 that every predict-class endpoint owes the
    /// caller while artifacts are missing.
    pub fn engine(&self) -> Result<&InferenceEngine, AppError> {
        self.engine.as_ref().ok_or_else(|| {
            casaval_core::Error::ModelUnavailable("model artifacts are not loaded".to_string())
                .into()
        })
    }
}

/// Create the application router
pub fn create_router(
    engine: Option<InferenceEngine>,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let history = match config.history_capacity {
        Some(cap) => HistoryLedger::with_capacity(cap),
        None => HistoryLedger::new(),
    };

    let state = Arc::new(AppState { engine, history });

    let api_routes = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/batch-predict", post(handlers::batch_predict))
        .route("/history", get(handlers::get_history))
        .route("/clear-history", post(handlers::clear_history))
        .route("/export", get(handlers::export_history))
        .route("/export-pdf", post(handlers::export_pdf))
        .route("/model-info", get(handlers::model_info))
        .route("/health", get(handlers::health))
        .fallback(not_found);

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Serve static files if directory provided, otherwise keep the JSON 404
    app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.fallback(not_found),
    };

    app
}

/// Start the server
pub async fn serve(
    engine: Option<InferenceEngine>,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    match &engine {
        Some(engine) => info!(
            model = engine.model_label(),
            features = engine.schema().width(),
            "Model ready"
        ),
        None => warn!("Serving without a model - predict endpoints will answer 503"),
    }

    let app = create_router(engine, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON 404 for unmatched routes
async fn not_found() -> AppError {
    AppError::not_found("Not found")
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<casaval_core::Error> for AppError {
    fn from(err: casaval_core::Error) -> Self {
        use casaval_core::Error;

        match err {
            Error::InvalidInput(_) | Error::Empty(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
                internal: None,
            },
            Error::ModelUnavailable(_) => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: err.to_string(),
                internal: None,
            },
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(err.into()),
            },
        }
    }
}

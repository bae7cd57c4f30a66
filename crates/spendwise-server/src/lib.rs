//! Spendwise Web Server
//!
//! Axum-based REST API for the Spendwise shared expense tracker.
//!
//! Security features:
//! - Bearer token authentication on every route except register/login
//! - Argon2id password hashes, never serialized into responses
//! - Restrictive CORS policy
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{debug, error, info, warn};

use spendwise_core::db::Database;
use spendwise_core::models::User;

mod handlers;
pub mod token;

/// Default bearer token lifetime
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Maximum accepted JSON body size (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// HMAC secret for signing bearer tokens
    pub jwt_secret: String,
    /// Bearer token lifetime in days
    pub token_ttl_days: i64,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            allowed_origins: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// The authenticated caller, inserted as a request extension by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Authentication middleware - resolves the bearer token to a user
///
/// Handlers behind this layer read the caller from the `AuthUser` extension.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        warn!(path = %request.uri().path(), "Unauthorized request - no token");
        return AppError::unauthorized("Not authorized, no token").into_response();
    };

    let claims = match token::verify(token, &state.config.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, path = %request.uri().path(), "Invalid bearer token");
            return AppError::unauthorized("Token failed").into_response();
        }
    };

    match state.db.get_user(claims.id) {
        Ok(Some(user)) => {
            debug!(user_id = user.id, path = %request.uri().path(), "Authenticated");
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        Ok(None) => {
            warn!(user_id = claims.id, "Token for unknown user");
            AppError::unauthorized("User not found").into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Parse a JSON request body, reporting malformed input as 400
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        AppError::bad_request("Invalid JSON")
    })
}

/// Plain message response
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    // Everything except register/login requires a bearer token
    let protected_routes = Router::new()
        // Auth
        .route("/auth/me", get(handlers::get_me))
        // Profile
        .route("/users/me", get(handlers::get_profile))
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/insights", get(handlers::get_insights))
        .route(
            "/expenses/:id",
            put(handlers::update_expense).delete(handlers::delete_expense),
        )
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    // Build CORS layer
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve a built frontend if provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.jwt_secret.is_empty() {
        anyhow::bail!("A token signing secret is required (set SPENDWISE_JWT_SECRET)");
    }
    if config.token_ttl_days <= 0 {
        anyhow::bail!("Token lifetime must be at least one day");
    }

    match db.count_users() {
        Ok(count) => info!(users = count, db = db.path(), "Database ready"),
        Err(e) => warn!("Failed to count users: {}", e),
    }

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    fn with_status(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self::with_status(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn forbidden(msg: &str) -> Self {
        Self::with_status(StatusCode::FORBIDDEN, msg)
    }

    pub fn not_found(msg: &str) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, msg)
    }

    pub fn internal(msg: &str) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, msg)
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

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        use spendwise_core::Error as CoreError;

        let err = err.into();
        match err.downcast_ref::<CoreError>() {
            Some(CoreError::InvalidData(msg)) => return Self::bad_request(msg),
            // Duplicate registrations are reported as a bad request
            Some(CoreError::Conflict(msg)) => return Self::bad_request(msg),
            Some(CoreError::NotFound(msg)) => return Self::not_found(msg),
            Some(CoreError::Forbidden(msg)) => return Self::forbidden(msg),
            _ => {}
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

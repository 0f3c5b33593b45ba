use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use bookmark_api_rust::config::{self, Environment};
use bookmark_api_rust::database::manager::DatabaseManager;
use bookmark_api_rust::handlers;
use bookmark_api_rust::middleware::auth::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting bookmark API in {:?} mode", config.environment);

    // Pool connections are lazy, so a missing database degrades /health
    // instead of preventing startup
    match DatabaseManager::run_migrations().await {
        Ok(()) => {}
        Err(e) => tracing::warn!("Could not apply migrations at startup: {}", e),
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("BOOKMARK_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Bookmark API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        // Protected, bearer-token guarded
        .merge(user_routes())
        .merge(bookmark_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    use axum::routing::post;

    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/signin", post(handlers::auth::signin))
}

fn user_routes() -> Router {
    use axum::routing::patch;

    Router::new()
        .route("/users/me", get(handlers::users::me))
        .route("/users", patch(handlers::users::update))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn bookmark_routes() -> Router {
    Router::new()
        .route(
            "/bookmarks",
            get(handlers::bookmarks::list).post(handlers::bookmarks::create),
        )
        .route(
            "/bookmarks/:id",
            get(handlers::bookmarks::get)
                .patch(handlers::bookmarks::update)
                .delete(handlers::bookmarks::delete),
        )
        .route_layer(from_fn(jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }

    match config::config().environment {
        Environment::Development => CorsLayer::permissive(),
        _ => {
            let origins: Vec<HeaderValue> = security
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Bookmark API (Rust)",
        "version": version,
        "description": "Minimal bookmark manager REST API with JWT authentication",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/signup, /auth/signin (public)",
            "users": "/users/me, /users (bearer token)",
            "bookmarks": "/bookmarks[/:id] (bearer token)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}

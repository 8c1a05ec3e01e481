//! Demo routes

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use poplog_http::HttpLogger;

pub fn build_router(http_logger: &HttpLogger, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/echo", post(echo))
        .route("/search", get(search))
        .route("/fail", get(fail));

    let mut router = http_logger.attach(router);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    info!("Echoing {} bytes", body.to_string().len());
    Json(body)
}

async fn search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("q") {
        Some(q) => (StatusCode::OK, Json(json!({ "query": q, "results": [] }))),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing query parameter 'q'" })),
        ),
    }
}

async fn fail() -> impl IntoResponse {
    warn!("Failure route hit");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "something went wrong" })),
    )
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use storefront_gateway_executor::{
    ExecuteError, Gateway, OperationRequest, RequestDetails, MASKED_ERROR_MESSAGE,
};
use tracing::error;

pub async fn serve(addr: &str, graphql_path: &str, gateway: Arc<Gateway>) -> std::io::Result<()> {
    let app = Router::new()
        .route(graphql_path, post(graphql_handler))
        .route("/health", get(health_handler))
        .with_state(gateway);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn graphql_handler(
    State(gateway): State<Arc<Gateway>>,
    headers: HeaderMap,
    Json(request): Json<OperationRequest>,
) -> impl IntoResponse {
    match gateway.execute(request, RequestDetails::new(headers)).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(err @ ExecuteError::MissingQuery { .. }) | Err(err @ ExecuteError::Parse(_)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errors": [{ "message": err.to_string() }] })),
        ),
        Err(err) => {
            error!("request rejected: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "errors": [{ "message": MASKED_ERROR_MESSAGE }] })),
            )
        }
    }
}

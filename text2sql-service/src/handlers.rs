//! Handler module

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::errors::AppError;
use common::models::query::{QueryOutcome, QueryRequest};

use crate::service::QueryPipeline;
use crate::state::AppState;

/// Translate a natural-language prompt into SQL and run it
#[utoipa::path(
    post,
    path = "/query",
    tag = "query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Query result, or a logical error as `{\"error\": ...}`", body = QueryOutcome),
    )
)]
pub async fn execute_query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryOutcome>, AppError> {
    let Some((prompt, connection)) = req.into_validated() else {
        return Err(AppError::MissingInput);
    };

    let pipeline = QueryPipeline::new(state.llm.clone(), state.config.connect_timeout());
    let outcome = pipeline.run(&prompt, &connection).await?;
    Ok(Json(outcome))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "text2sql-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use common::config::AppConfig;
    use tower::ServiceExt;

    use crate::routes;
    use crate::state::AppState;

    fn test_app() -> axum::Router {
        let config = AppConfig::load(0);
        routes::router().with_state(AppState::new(config))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_query(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    #[tokio::test]
    async fn empty_body_yields_missing_input_error() {
        let (status, json) = post_query(serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({ "error": "Prompt or DB connection details missing." })
        );
    }

    #[tokio::test]
    async fn prompt_without_connection_yields_missing_input_error() {
        let (status, json) = post_query(serde_json::json!({ "prompt": "show users" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["error"],
            "Prompt or DB connection details missing."
        );
    }

    #[tokio::test]
    async fn connection_without_prompt_yields_missing_input_error() {
        let (status, json) = post_query(serde_json::json!({
            "connection": {
                "host": "localhost",
                "port": 3306,
                "user": "root",
                "password": "",
                "database": "shop"
            }
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["error"],
            "Prompt or DB connection details missing."
        );
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "text2sql-service");
    }
}

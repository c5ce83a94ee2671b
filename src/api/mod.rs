use crate::domain::{Match, PlayerMatch, PlayerProfile, Record};
use crate::error::{ProxyError, Result};
use crate::services::{DateWindow, DotabuffService};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    service: Arc<DotabuffService>,
}

impl AppState {
    pub fn new(service: Arc<DotabuffService>) -> Self {
        Self { service }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/proxy/match/:match_id", get(get_match))
        .route("/proxy/player/:player_id/records", get(get_player_records))
        .route("/proxy/player/:player_id/matches", get(get_player_matches))
        .route("/proxy/player/:player_id/profile", get(get_player_profile))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Proxy listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "health": "ok" }))
}

async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<u64>,
) -> Result<Json<Match>> {
    state.service.get_match(match_id).await.map(Json)
}

async fn get_player_records(
    State(state): State<AppState>,
    Path(player_id): Path<u64>,
) -> Result<Json<Vec<Record>>> {
    state.service.get_records(player_id).await.map(Json)
}

async fn get_player_matches(
    State(state): State<AppState>,
    Path(player_id): Path<u64>,
    Query(window): Query<DateWindow>,
) -> Result<Json<Vec<PlayerMatch>>> {
    state.service.get_matches(player_id, window).await.map(Json)
}

async fn get_player_profile(
    State(state): State<AppState>,
    Path(player_id): Path<u64>,
) -> Result<Json<PlayerProfile>> {
    state.service.get_profile(player_id).await.map(Json)
}

impl ProxyError {
    fn status_and_detail(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Item does not exist."),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Try again later.",
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Unknown error occurred."),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            info!(error = %self, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body, json!({ "health": "ok" }));
    }

    #[tokio::test]
    async fn upstream_errors_map_to_statuses() {
        let cases = [
            (
                ProxyError::NotFound("x".into()),
                StatusCode::NOT_FOUND,
                "Item does not exist.",
            ),
            (
                ProxyError::RateLimited,
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Try again later.",
            ),
            (
                ProxyError::UpstreamUnavailable(StatusCode::BAD_GATEWAY),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error occurred.",
            ),
            (
                ProxyError::missing("match list: results table"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error occurred.",
            ),
            (
                ProxyError::Validation("too many heroes".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error occurred.",
            ),
        ];

        for (err, status, detail) in cases {
            let response = err.into_response();
            assert_eq!(response.status(), status);
            assert_eq!(body_json(response).await, json!({ "detail": detail }));
        }
    }

    #[test]
    fn date_window_reads_iso_dates() {
        let window: DateWindow =
            serde_json::from_value(json!({ "start_date": "2024-01-31", "end_date": null }))
                .unwrap();
        assert_eq!(
            window.start_date,
            Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert_eq!(window.end_date, None);
    }
}

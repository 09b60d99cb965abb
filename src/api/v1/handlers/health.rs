/*
 * Responsibility
 * - GET /health (疎通用, token middleware を通さない)
 * - 登録済み strategy 名を返して配線を確認できるようにする
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use token_auth::Strategy;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "strategy": state.strategy.name()})),
    )
}

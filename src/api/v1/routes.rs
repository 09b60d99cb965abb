/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、/me は token middleware の内側
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/me", get(me));
    let protected = middleware::auth::token::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}

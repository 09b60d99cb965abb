//! cookie (username / token) を token strategy で検証 → AuthCtx を extensions に入れる
//!
//! strategy の outcome は `HttpOutcome` で HTTP に写す：
//! - success → AuthCtx を extensions に格納して次へ
//! - fail (credentials 不足) → 400 (message は AUTH_BAD_REQUEST_MESSAGE か既定値)
//! - fail (delegate が拒否) → 401
//! - error (delegate が検証できなかった) → 500

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use token_auth::Strategy;
use token_auth::strategy::{CookieSource, Failure, OutcomeSink};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthInfo, VerifyError};
use crate::state::AppState;

/// 保護したい router に token 認証を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::token::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, token_middleware))
}

async fn token_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_ctx = state
        .strategy
        .authenticate(
            &CookieSource::new(req.headers()),
            &state.auth_options,
            HttpOutcome,
        )
        .await?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

/// Outcome sink that turns the strategy verdict into the middleware result.
struct HttpOutcome;

impl OutcomeSink<AuthCtx, AuthInfo, VerifyError> for HttpOutcome {
    type Output = Result<AuthCtx, AppError>;

    fn success(self, principal: AuthCtx, _info: Option<AuthInfo>) -> Self::Output {
        tracing::debug!(user_id = %principal.user_id, "token authentication succeeded");
        Ok(principal)
    }

    fn fail(self, failure: Failure<AuthInfo>) -> Self::Output {
        match failure {
            Failure::BadRequest(err) => {
                tracing::debug!(error = %err, "token credentials missing");
                Err(AppError::bad_request("BAD_REQUEST", err.message()))
            }
            Failure::Rejected(reason) => {
                tracing::warn!(reason = ?reason, "token authentication rejected");
                Err(AppError::Unauthorized)
            }
        }
    }

    fn error(self, cause: VerifyError) -> Self::Output {
        tracing::error!(error = ?cause, "token verification failed");
        Err(AppError::Internal)
    }
}

/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - token strategy (verify delegate は strategy 内で共有) と host 全体の authenticate options
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use token_auth::{AuthenticateOptions, TokenStrategy};

use crate::services::auth::DynVerify;

#[derive(Clone, Debug)]
pub struct AppState {
    pub strategy: Arc<TokenStrategy<DynVerify>>,
    pub auth_options: Arc<AuthenticateOptions>,
}

impl AppState {
    pub fn new(
        strategy: Arc<TokenStrategy<DynVerify>>,
        auth_options: AuthenticateOptions,
    ) -> Self {
        Self {
            strategy,
            auth_options: Arc::new(auth_options),
        }
    }
}

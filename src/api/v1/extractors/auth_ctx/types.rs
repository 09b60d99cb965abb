/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が strategy の success を受けて request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - identity / token の検証は verify delegate (services/auth) の責務
 * - ここは「型（契約）」として固定化する
 */

use serde::Serialize;
use uuid::Uuid;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は内部ユーザーID（UUID）
/// - `identity` は cookie で送られてきた identity (username)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub identity: String,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, identity: impl Into<String>) -> Self {
        Self {
            user_id,
            identity: identity.into(),
        }
    }
}

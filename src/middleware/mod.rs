/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http: 全ルート共通 (request id / body limit / timeout / trace)
 * - auth: token strategy による cookie 認証
 */
pub mod auth;
pub mod http;

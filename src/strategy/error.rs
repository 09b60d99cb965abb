/**
 * Responsibility
 * - strategy 構築時の失敗の定義 (リクエスト処理前に確定する)
 */
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("token authentication strategy requires a verify delegate")]
    MissingVerify,
    #[error("credential field name must not be empty: {0}")]
    EmptyField(&'static str),
}

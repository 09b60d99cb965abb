pub mod factory;
pub mod static_store;
pub mod types;

pub use factory::build_token_strategy;
pub use static_store::StaticTokenStore;
pub use types::{AuthInfo, DynVerify, VerifyError};

pub mod auth;
pub mod response;

pub use auth::{authenticate_token, extract_bearer_token, AuthContext, AuthError};
pub use response::{ApiResponse, ApiResult};

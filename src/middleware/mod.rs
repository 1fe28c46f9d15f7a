pub mod auth;
pub mod remove_blanks;
pub mod response;

pub use auth::require_token;
pub use remove_blanks::remove_blank_fields;
pub use response::{ApiResponse, ApiResult};

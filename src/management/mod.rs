mod cache;
mod session;

pub use cache::TokenCache;
pub use session::SessionState;
pub use session::TokenState;
pub use session::get_valid_token;
pub use session::get_valid_token_at;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::middleware::RateLimiter;

pub mod chore_entry;
pub mod chore_template;
pub mod friend_request;
pub mod household;
pub mod invite;
pub mod membership;
pub mod user;

pub use chore_entry::*;
pub use chore_template::*;
pub use friend_request::*;
pub use household::*;
pub use invite::*;
pub use membership::*;
pub use user::*;

/// Application state shared across all handlers
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    pub login_rate_limiter: Arc<RateLimiter>,
}

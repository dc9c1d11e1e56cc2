//! Axum extractors for request handling
//!
//! Custom extractors for authentication, role gating, validation, query strings and path ids.

mod auth;
mod authorized;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use authorized::{guards, Authorized, Guard};
pub use pagination::{PageParams, QueryParams};
pub use path::IdPath;
pub use validated::ValidatedJson;

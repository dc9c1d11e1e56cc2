//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in fame-core.

mod application;
mod error;
mod member;
mod user;

pub use application::PgApplicationRepository;
pub use member::PgMemberRepository;
pub use user::PgUserRepository;

//! Business logic services
//!
//! Every service borrows a [`ServiceContext`] and checks the access table before it
//! touches a repository.

pub mod application;
pub mod auth;
pub mod context;
pub mod error;
pub mod member;
pub mod notifier;
pub mod stats;
pub mod user;

pub use application::ApplicationService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use notifier::LoggingEventPublisher;
pub use stats::StatsService;
pub use user::UserService;

//! Database models - SQLx-compatible structs for PostgreSQL tables

mod application;
mod member;
mod user;

pub use application::ApplicationModel;
pub use member::{CategoryCountModel, MemberModel, MemberTotalsModel};
pub use user::UserModel;

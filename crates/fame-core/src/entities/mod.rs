//! Domain entities - core business objects

mod application;
mod member;
mod user;

pub use application::{Application, ApplicationFilter, Decision, NewApplication};
pub use member::{Member, MemberFilter, MemberPatch, MemberStats, NewMember};
pub use user::{NewUser, User};

//! Repository and outbound-event traits (ports)

mod publisher;
mod repositories;

pub use publisher::EventPublisher;
pub use repositories::{ApplicationRepository, MemberRepository, RepoResult, UserRepository};

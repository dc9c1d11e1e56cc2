//! # fame-core
//!
//! Domain layer for the fame list: users, applications, members, the access table,
//! repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod access;
pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{authorize, authorize_operation, Operation};
pub use entities::{
    Application, ApplicationFilter, Decision, Member, MemberFilter, MemberPatch, MemberStats,
    NewApplication, NewMember, NewUser, User,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    ApplicationRepository, EventPublisher, MemberRepository, RepoResult, UserRepository,
};
pub use value_objects::{
    ApplicationStatus, Category, CredentialFailure, Identity, ImageKind, ParseValueError, Role,
    RoleSet,
};

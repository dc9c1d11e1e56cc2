//! # fame-service
//!
//! Application layer: the application workflow engine, member administration,
//! authentication use cases, avatar file storage, and the DTOs shared with the HTTP layer.

pub mod dto;
pub mod services;
pub mod storage;

pub use services::{
    ApplicationService, AuthService, LoggingEventPublisher, MemberService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StatsService, UserService,
};
pub use storage::AvatarStore;

//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs (camelCase, always with `success`)
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ApplicationListQuery, CreateMemberRequest, LoginRequest, MemberListQuery, Pagination,
    RegisterRequest, SubmitApplicationRequest, UpdateMemberRequest, UpdateStatusRequest,
    UploadAvatar,
};

pub use responses::{
    ApplicantResponse, ApplicationEnvelope, ApplicationListResponse, ApplicationResponse,
    AuthResponse, CategoryCountResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    MemberEnvelope, MemberListResponse, MemberResponse, MessageResponse, MyApplicationsResponse,
    NextIdResponse, ReadinessResponse, StatsBody, StatsResponse, UploadAvatarResponse,
    UserResponse,
};

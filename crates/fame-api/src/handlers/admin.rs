//! Staff handlers
//!
//! Member administration, avatar upload and statistics for moderators and administrators.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use fame_core::DomainError;
use fame_service::dto::{
    CreateMemberRequest, MemberEnvelope, MemberListResponse, MessageResponse, NextIdResponse,
    StatsResponse, UpdateMemberRequest, UploadAvatar, UploadAvatarResponse,
};
use fame_service::{MemberService, StatsService};
use tracing::debug;

use crate::extractors::{guards, Authorized, IdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Multipart field carrying the image
const AVATAR_FIELD: &str = "avatar";
/// Multipart field carrying the target member id
const MEMBER_ID_FIELD: &str = "memberId";

/// GET /api/admin/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: Authorized<guards::ListMembers>,
) -> ApiResult<Json<MemberListResponse>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.list(&auth.identity()).await?))
}

/// GET /api/admin/next-id
pub async fn next_id(
    State(state): State<AppState>,
    auth: Authorized<guards::NextMemberId>,
) -> ApiResult<Json<NextIdResponse>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.next_id(&auth.identity()).await?))
}

/// POST /api/admin/members
pub async fn create_member(
    State(state): State<AppState>,
    auth: Authorized<guards::CreateMember>,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<MemberEnvelope>>> {
    let service = MemberService::new(state.service_context());
    let response = service.create(&auth.identity(), request).await?;
    Ok(Created(Json(response)))
}

/// Merge the present fields into a member
///
/// PUT /api/admin/members/:id
pub async fn update_member(
    State(state): State<AppState>,
    auth: Authorized<guards::UpdateMember>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberEnvelope>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.update(&auth.identity(), id, request).await?))
}

/// DELETE /api/admin/members/:id
pub async fn delete_member(
    State(state): State<AppState>,
    auth: Authorized<guards::DeleteMember>,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.delete(&auth.identity(), id).await?))
}

/// Store an avatar image for a member id
///
/// POST /api/admin/upload-avatar (multipart: `avatar`, `memberId`)
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: Authorized<guards::UploadAvatar>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadAvatarResponse>> {
    let mut multipart = multipart.map_err(|e| ApiError::invalid_body(e.body_text()))?;
    let max_mb = state.config().storage.max_avatar_size_mb;

    let mut upload = UploadAvatar {
        member_id: None,
        file_name: String::new(),
        content_type: None,
        bytes: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status(), e.body_text(), max_mb))?
    {
        match field.name() {
            Some(AVATAR_FIELD) => {
                upload.file_name = field.file_name().unwrap_or_default().to_string();
                upload.content_type = field.content_type().map(str::to_string);
                upload.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e.status(), e.body_text(), max_mb))?
                    .to_vec();
            }
            Some(MEMBER_ID_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e.status(), e.body_text(), max_mb))?;
                upload.member_id = Some(text);
            }
            other => debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    let service = MemberService::new(state.service_context());
    Ok(Json(service.upload_avatar(&auth.identity(), upload).await?))
}

/// An oversized body is reported like an oversized file
fn multipart_error(status: StatusCode, text: String, max_mb: u64) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::from(DomainError::FileTooLarge { max_mb })
    } else {
        ApiError::invalid_body(text)
    }
}

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: Authorized<guards::ViewStats>,
) -> ApiResult<Json<StatsResponse>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.get(&auth.identity()).await?))
}

//! Application handlers
//!
//! Submission by users and review by moderators and administrators.

use axum::{extract::State, Json};
use fame_service::dto::{
    ApplicationEnvelope, ApplicationListQuery, ApplicationListResponse, MyApplicationsResponse,
    SubmitApplicationRequest, UpdateStatusRequest,
};
use fame_service::ApplicationService;

use crate::extractors::{
    guards, AuthUser, Authorized, IdPath, PageParams, QueryParams, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Submit an application
///
/// POST /api/applications
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SubmitApplicationRequest>,
) -> ApiResult<Created<Json<ApplicationEnvelope>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.submit(&auth.identity(), request).await?;
    Ok(Created(Json(response)))
}

/// The caller's own applications, newest first
///
/// GET /api/applications/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MyApplicationsResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.list_mine(&auth.identity()).await?;
    Ok(Json(response))
}

/// Filtered, paginated listing
///
/// GET /api/applications?status=&category=&search=&page=&limit=
pub async fn list(
    State(state): State<AppState>,
    auth: Authorized<guards::ListApplications>,
    QueryParams(query): QueryParams<ApplicationListQuery>,
    PageParams(page): PageParams,
) -> ApiResult<Json<ApplicationListResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.list(&auth.identity(), query, page).await?;
    Ok(Json(response))
}

/// GET /api/applications/:id
pub async fn get(
    State(state): State<AppState>,
    auth: Authorized<guards::ViewApplication>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApplicationEnvelope>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.get(&auth.identity(), id).await?;
    Ok(Json(response))
}

/// Approve or reject a pending application
///
/// PUT /api/applications/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: Authorized<guards::DecideApplication>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<ApplicationEnvelope>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.update_status(&auth.identity(), id, request).await?;
    Ok(Json(response))
}

//! Public fame list handlers

use axum::{extract::State, Json};
use fame_service::dto::{MemberEnvelope, MemberListQuery, MemberListResponse};
use fame_service::MemberService;

use crate::extractors::{IdPath, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/members?category=&search=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MemberListQuery>,
) -> ApiResult<Json<MemberListResponse>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.list_public(query).await?))
}

/// GET /api/members/:id
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<MemberEnvelope>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.get_public(id).await?))
}

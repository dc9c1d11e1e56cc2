//! Member administration service
//!
//! Public reads of the fame list plus staff CRUD over member records and avatars.

use chrono::Utc;
use fame_core::events::{MemberCreatedEvent, MemberDeletedEvent, MemberUpdatedEvent};
use fame_core::{
    authorize_operation, Category, DomainError, DomainEvent, Identity, ImageKind, Member,
    MemberFilter, MemberPatch, NewMember, Operation,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    CreateMemberRequest, MemberEnvelope, MemberListQuery, MemberListResponse, MemberResponse,
    MessageResponse, NextIdResponse, UpdateMemberRequest, UploadAvatar, UploadAvatarResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Member administration service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Public reads
    // ========================================================================

    /// The published fame list: pinned first, then by id
    #[instrument(skip(self))]
    pub async fn list_public(&self, query: MemberListQuery) -> ServiceResult<MemberListResponse> {
        let category = match query.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) if value.eq_ignore_ascii_case("all") => None,
            Some(value) => Some(parse_category(value)?),
        };
        let filter = MemberFilter {
            category,
            search: non_blank(query.search),
        };

        let members = self.ctx.member_repo().list_public(&filter).await?;
        Ok(member_list(members))
    }

    #[instrument(skip(self))]
    pub async fn get_public(&self, id: i64) -> ServiceResult<MemberEnvelope> {
        let member = self.find(id).await?;
        Ok(MemberEnvelope::new(MemberResponse::from(member)))
    }

    // ========================================================================
    // Staff operations
    // ========================================================================

    /// Every member, by id
    #[instrument(skip(self, identity), fields(user_id = identity.id))]
    pub async fn list(&self, identity: &Identity) -> ServiceResult<MemberListResponse> {
        authorize_operation(identity, Operation::ListMembers)?;

        let members = self.ctx.member_repo().list_all().await?;
        Ok(member_list(members))
    }

    /// Id the next created member is expected to get; advisory only
    #[instrument(skip(self, identity), fields(user_id = identity.id))]
    pub async fn next_id(&self, identity: &Identity) -> ServiceResult<NextIdResponse> {
        authorize_operation(identity, Operation::NextMemberId)?;

        let next_id = self.ctx.member_repo().next_id().await?;
        Ok(NextIdResponse {
            success: true,
            next_id,
        })
    }

    #[instrument(skip(self, identity, request), fields(user_id = identity.id, nickname = %request.nickname))]
    pub async fn create(
        &self,
        identity: &Identity,
        request: CreateMemberRequest,
    ) -> ServiceResult<MemberEnvelope> {
        authorize_operation(identity, Operation::CreateMember)?;

        let nickname = request.nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(ServiceError::validation("Fill in all required fields"));
        }
        let category = parse_category(&request.category)?;
        let telegram = non_blank(request.telegram).map(|t| t.trim_start_matches('@').to_string());
        let username = non_blank(request.username).unwrap_or_else(|| match &telegram {
            Some(handle) => format!("@{handle}"),
            None => nickname.clone(),
        });
        let avatar = non_blank(request.avatar);
        if let Some(reference) = avatar.as_deref() {
            self.ctx.avatar_store().resolve_member(reference)?;
        }

        let new_member = NewMember {
            nickname,
            username,
            category,
            role: non_blank(request.role),
            telegram,
            description: request.description.unwrap_or_default().trim().to_string(),
            project: non_blank(request.project),
            join_date: request.join_date.unwrap_or_else(|| Utc::now().date_naive()),
            avatar,
            verified: request.verified,
            pinned: request.pinned,
            scam: request.scam,
            activity: non_blank(request.activity),
            details: non_blank(request.details),
            skills: clean_list(request.skills),
            application_id: None,
        };

        let member = self.ctx.member_repo().create(&new_member).await?;

        info!(member_id = member.id, "Member created");
        self.ctx
            .publish(DomainEvent::MemberCreated(MemberCreatedEvent::new(&member)))
            .await;

        Ok(MemberEnvelope::new(MemberResponse::from(member)).with_message("Member added"))
    }

    /// Merge the present fields into a member
    #[instrument(skip(self, identity, request), fields(user_id = identity.id))]
    pub async fn update(
        &self,
        identity: &Identity,
        id: i64,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberEnvelope> {
        authorize_operation(identity, Operation::UpdateMember)?;

        let patch = build_patch(request)?;
        if let Some(Some(reference)) = patch.avatar.as_ref() {
            self.ctx.avatar_store().resolve_member(reference)?;
        }

        let mut member = self.find(id).await?;
        member.apply(patch);
        self.ctx.member_repo().update(&member).await?;

        info!(member_id = id, "Member updated");
        self.ctx
            .publish(DomainEvent::MemberUpdated(MemberUpdatedEvent::new(id)))
            .await;

        Ok(MemberEnvelope::new(MemberResponse::from(member)).with_message("Member updated"))
    }

    /// Delete a member and its avatar file
    #[instrument(skip(self, identity), fields(user_id = identity.id))]
    pub async fn delete(&self, identity: &Identity, id: i64) -> ServiceResult<MessageResponse> {
        authorize_operation(identity, Operation::DeleteMember)?;

        let member = self.find(id).await?;
        self.ctx.member_repo().delete(id).await?;

        // The record is gone either way; a stray file is only logged
        if let Some(reference) = member.avatar.as_deref() {
            self.remove_avatar(id, reference).await;
        }

        info!(member_id = id, "Member deleted");
        self.ctx
            .publish(DomainEvent::MemberDeleted(MemberDeletedEvent::new(id)))
            .await;

        Ok(MessageResponse::ok("Member deleted"))
    }

    /// Store an uploaded avatar as `avatar<memberId>.<ext>`
    ///
    /// If the member already exists its avatar reference is switched to the new file.
    #[instrument(skip(self, identity, upload), fields(user_id = identity.id, file = %upload.file_name))]
    pub async fn upload_avatar(
        &self,
        identity: &Identity,
        upload: UploadAvatar,
    ) -> ServiceResult<UploadAvatarResponse> {
        authorize_operation(identity, Operation::UploadAvatar)?;

        let member_id = upload
            .member_id
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| ServiceError::validation("memberId must be a positive integer"))?;

        if upload.bytes.is_empty() {
            return Err(ServiceError::validation("No file uploaded"));
        }
        let kind = image_kind(&upload)?;

        let stored = self
            .ctx
            .avatar_store()
            .save_member_avatar(member_id, kind, &upload.bytes)
            .await?;

        if let Some(mut member) = self.ctx.member_repo().find_by_id(member_id).await? {
            let previous = member.avatar.replace(stored.reference.clone());
            self.ctx.member_repo().update(&member).await?;

            if let Some(old) = previous.filter(|old| *old != stored.reference) {
                self.remove_avatar(member_id, &old).await;
            }
            self.ctx
                .publish(DomainEvent::MemberUpdated(MemberUpdatedEvent::new(member_id)))
                .await;
        }

        info!(member_id, file = %stored.file_name, "Avatar uploaded");
        Ok(UploadAvatarResponse {
            success: true,
            message: "Avatar uploaded".to_string(),
            path: stored.url_path(),
            filename: stored.file_name,
        })
    }

    /// Best-effort removal of a member's avatar file
    ///
    /// References outside the member naming scheme are left on disk.
    async fn remove_avatar(&self, member_id: i64, reference: &str) {
        let store = self.ctx.avatar_store();
        if let Err(e) = store.resolve_member(reference) {
            warn!(member_id, %reference, error = %e, "Not removing foreign avatar file");
            return;
        }
        if let Err(e) = store.remove(reference).await {
            warn!(member_id, %reference, error = %e, "Failed to remove avatar file");
        }
    }

    async fn find(&self, id: i64) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(id).into())
    }
}

fn member_list(members: Vec<Member>) -> MemberListResponse {
    MemberListResponse {
        success: true,
        members: members.into_iter().map(MemberResponse::from).collect(),
    }
}

fn parse_category(raw: &str) -> ServiceResult<Category> {
    raw.parse()
        .map_err(|_| DomainError::InvalidCategory(raw.trim().to_string()).into())
}

/// Both the MIME type and the extension must name a supported image
fn image_kind(upload: &UploadAvatar) -> ServiceResult<ImageKind> {
    let by_mime = upload.content_type.as_deref().and_then(ImageKind::from_mime);
    let by_ext = ImageKind::from_file_name(&upload.file_name);
    match (by_mime, by_ext) {
        (Some(_), Some(kind)) => Ok(kind),
        _ => Err(DomainError::UnsupportedImage.into()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// `Some("")` on an optional text clears it
fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| Some(v.trim().to_string()).filter(|v| !v.is_empty()))
}

fn required(value: Option<String>, field: &str) -> ServiceResult<Option<String>> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Err(ServiceError::validation(format!("{field} cannot be empty"))),
        other => Ok(other),
    }
}

fn build_patch(request: UpdateMemberRequest) -> ServiceResult<MemberPatch> {
    Ok(MemberPatch {
        nickname: required(request.nickname, "Nickname")?,
        username: required(request.username, "Username")?,
        category: request
            .category
            .as_deref()
            .map(parse_category)
            .transpose()?,
        role: clearable(request.role),
        telegram: clearable(request.telegram)
            .map(|t| t.map(|h| h.trim_start_matches('@').to_string())),
        description: request.description.map(|d| d.trim().to_string()),
        project: clearable(request.project),
        join_date: request.join_date,
        avatar: clearable(request.avatar),
        verified: request.verified,
        pinned: request.pinned,
        scam: request.scam,
        activity: clearable(request.activity),
        details: clearable(request.details),
        skills: request.skills.map(clean_list),
    })
}

//! Application workflow service
//!
//! Owns the application lifecycle: `pending` → `approved` | `rejected`, both terminal.
//! Approval marks the application and creates its member in one storage transaction;
//! the avatar is carried over afterwards and never undoes the approval.

use std::collections::HashMap;

use chrono::Utc;
use fame_core::events::MemberCreatedEvent;
use fame_core::{
    authorize_operation, Application, ApplicationFilter, ApplicationStatus, Category, Decision,
    DomainError, DomainEvent, Identity, Member, NewApplication, Operation, User,
};
use tracing::{error, info, instrument, warn};

use crate::dto::{
    ApplicationEnvelope, ApplicationListQuery, ApplicationListResponse, ApplicationResponse,
    MemberResponse, MyApplicationsResponse, Pagination, SubmitApplicationRequest,
    UpdateStatusRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Application workflow service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApplicationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a new application for the caller
    #[instrument(skip(self, identity, request), fields(user_id = identity.id))]
    pub async fn submit(
        &self,
        identity: &Identity,
        request: SubmitApplicationRequest,
    ) -> ServiceResult<ApplicationEnvelope> {
        authorize_operation(identity, Operation::SubmitApplication)?;

        let nickname = request.nickname.trim();
        let telegram = request.telegram.trim();
        let description = request.description.trim();
        if nickname.is_empty() || telegram.is_empty() || description.is_empty() {
            return Err(ServiceError::validation("Fill in all required fields"));
        }
        let category = parse_category(&request.category)?;
        let links: Vec<String> = request
            .links
            .iter()
            .map(|link| link.trim())
            .filter(|link| !link.is_empty())
            .map(str::to_string)
            .collect();

        // Fast refusal; the partial unique index is what actually guarantees it
        let existing = self.ctx.application_repo().find_by_user(identity.id).await?;
        if existing.iter().any(Application::is_pending) {
            warn!("Submission refused: application already pending");
            return Err(DomainError::ActiveApplicationExists.into());
        }

        let avatar = match request.avatar.as_deref().map(str::trim) {
            Some(uri) if !uri.is_empty() => Some(self.ctx.avatar_store().save_data_uri(uri).await?),
            _ => None,
        };

        let new_application = NewApplication {
            user_id: identity.id,
            nickname: nickname.to_string(),
            telegram: telegram.to_string(),
            category,
            description: description.to_string(),
            links,
            avatar: avatar.as_ref().map(|a| a.reference.clone()),
        };

        let application = match self.ctx.application_repo().create(&new_application).await {
            Ok(application) => application,
            Err(e) => {
                if let Some(stored) = avatar {
                    self.discard_avatar(&stored.reference).await;
                }
                return Err(e.into());
            }
        };

        info!(application_id = application.id, %category, "Application submitted");
        self.ctx
            .publish(DomainEvent::application_submitted(&application))
            .await;

        Ok(ApplicationEnvelope::new(ApplicationResponse::from(application))
            .with_message("Application submitted for review"))
    }

    /// The caller's applications, newest first
    #[instrument(skip(self, identity), fields(user_id = identity.id))]
    pub async fn list_mine(&self, identity: &Identity) -> ServiceResult<MyApplicationsResponse> {
        authorize_operation(identity, Operation::ListOwnApplications)?;

        let applications = self.ctx.application_repo().find_by_user(identity.id).await?;
        Ok(MyApplicationsResponse {
            success: true,
            applications: applications
                .into_iter()
                .map(ApplicationResponse::from)
                .collect(),
        })
    }

    /// Filtered, paginated listing for staff
    #[instrument(skip(self, identity), fields(user_id = identity.id))]
    pub async fn list(
        &self,
        identity: &Identity,
        query: ApplicationListQuery,
        page: Pagination,
    ) -> ServiceResult<ApplicationListResponse> {
        authorize_operation(identity, Operation::ListApplications)?;

        let filter = ApplicationFilter {
            status: parse_filter(query.status.as_deref())?,
            category: parse_filter(query.category.as_deref())?,
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        let repo = self.ctx.application_repo();
        let total = repo.count(&filter).await?;
        let applications = repo
            .search(&filter, page.offset(), i64::from(page.limit))
            .await?;
        let applications = self.with_applicants(applications).await?;

        Ok(ApplicationListResponse {
            success: true,
            applications,
            total,
            page: page.page,
            total_pages: page.total_pages(total),
        })
    }

    /// Single application with applicant details
    #[instrument(skip(self, identity), fields(user_id = identity.id))]
    pub async fn get(&self, identity: &Identity, id: i64) -> ServiceResult<ApplicationEnvelope> {
        authorize_operation(identity, Operation::ViewApplication)?;

        let application = self.find(id).await?;
        let applicant = self.ctx.user_repo().find_by_id(application.user_id).await?;

        Ok(ApplicationEnvelope::new(
            ApplicationResponse::from(application).with_user(applicant.as_ref()),
        ))
    }

    /// Approve or reject a pending application
    #[instrument(skip(self, identity, request), fields(admin_id = identity.id, status = %request.status))]
    pub async fn update_status(
        &self,
        identity: &Identity,
        id: i64,
        request: UpdateStatusRequest,
    ) -> ServiceResult<ApplicationEnvelope> {
        authorize_operation(identity, Operation::DecideApplication)?;

        let decision = parse_decision(&request)?;
        match decision {
            Decision::Approve => self.approve(identity, id).await,
            Decision::Reject { reason } => self.reject(identity, id, &reason).await,
        }
    }

    async fn approve(&self, identity: &Identity, id: i64) -> ServiceResult<ApplicationEnvelope> {
        let pending = self.find(id).await?;
        pending.ensure_pending()?;

        let now = Utc::now();
        let seed = pending.member_seed(now.date_naive());
        let (application, member) = self
            .ctx
            .application_repo()
            .approve(id, identity.id, now, &seed)
            .await
            .inspect_err(|e| warn!(error = %e, "Approval refused"))?;

        let member = self.carry_over_avatar(&application, member).await;

        info!(application_id = id, member_id = member.id, "Application approved");
        self.ctx
            .publish(DomainEvent::application_decided(&application, Some(member.id)))
            .await;
        self.ctx
            .publish(DomainEvent::MemberCreated(MemberCreatedEvent::new(&member)))
            .await;

        Ok(ApplicationEnvelope::new(ApplicationResponse::from(application))
            .with_message("Application approved, member added to the list")
            .with_member(MemberResponse::from(member)))
    }

    async fn reject(
        &self,
        identity: &Identity,
        id: i64,
        reason: &str,
    ) -> ServiceResult<ApplicationEnvelope> {
        let application = self
            .ctx
            .application_repo()
            .reject(id, identity.id, reason, Utc::now())
            .await
            .inspect_err(|e| warn!(error = %e, "Rejection refused"))?;

        info!(application_id = id, "Application rejected");
        self.ctx
            .publish(DomainEvent::application_decided(&application, None))
            .await;

        Ok(ApplicationEnvelope::new(ApplicationResponse::from(application))
            .with_message("Application rejected"))
    }

    /// Copy the application's avatar onto the new member; failures leave it without one
    async fn carry_over_avatar(&self, application: &Application, mut member: Member) -> Member {
        let Some(reference) = application.avatar.as_deref() else {
            return member;
        };

        let stored = match self.ctx.avatar_store().promote(reference, member.id).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(member_id = member.id, error = %e, "Failed to copy application avatar");
                return member;
            }
        };

        let previous = member.avatar.replace(stored.reference);
        if let Err(e) = self.ctx.member_repo().update(&member).await {
            error!(member_id = member.id, error = %e, "Failed to attach avatar to member");
            member.avatar = previous;
        }
        member
    }

    async fn find(&self, id: i64) -> ServiceResult<Application> {
        self.ctx
            .application_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ApplicationNotFound(id).into())
    }

    /// Attach applicant details, loading each user once
    async fn with_applicants(
        &self,
        applications: Vec<Application>,
    ) -> ServiceResult<Vec<ApplicationResponse>> {
        let mut users: HashMap<i64, Option<User>> = HashMap::new();
        let mut responses = Vec::with_capacity(applications.len());

        for application in applications {
            if !users.contains_key(&application.user_id) {
                let user = self.ctx.user_repo().find_by_id(application.user_id).await?;
                users.insert(application.user_id, user);
            }
            let user = users.get(&application.user_id).and_then(Option::as_ref);
            responses.push(ApplicationResponse::from(application).with_user(user));
        }
        Ok(responses)
    }

    async fn discard_avatar(&self, reference: &str) {
        if let Err(e) = self.ctx.avatar_store().remove(reference).await {
            warn!(%reference, error = %e, "Failed to remove orphaned avatar");
        }
    }
}

fn parse_category(raw: &str) -> ServiceResult<Category> {
    raw.parse::<Category>()
        .map_err(|_| DomainError::InvalidCategory(raw.trim().to_string()).into())
}

/// Parse an optional filter value; blank and `all` mean "no filter"
fn parse_filter<T>(raw: Option<&str>) -> ServiceResult<Option<T>>
where
    T: std::str::FromStr<Err = fame_core::ParseValueError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| ServiceError::validation(e.to_string())),
    }
}

fn parse_decision(request: &UpdateStatusRequest) -> ServiceResult<Decision> {
    let status: ApplicationStatus = request
        .status
        .parse()
        .map_err(|_| DomainError::InvalidStatus(request.status.clone()))?;

    match status {
        ApplicationStatus::Approved => Ok(Decision::Approve),
        ApplicationStatus::Rejected => {
            let reason = request
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| ServiceError::validation("Rejection reason is required"))?;
            Ok(Decision::Reject {
                reason: reason.to_string(),
            })
        }
        ApplicationStatus::Pending => Err(ServiceError::validation(
            "Status must be either approved or rejected",
        )),
    }
}

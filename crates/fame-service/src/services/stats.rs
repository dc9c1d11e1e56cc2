//! Aggregate counts for the admin dashboard

use fame_core::{authorize_operation, ApplicationFilter, ApplicationStatus, Identity, Operation};
use tracing::instrument;

use crate::dto::mappers::category_counts;
use crate::dto::{StatsBody, StatsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Counts derived at read time; nothing here is stored
    #[instrument(skip(self, identity), fields(user_id = identity.id))]
    pub async fn get(&self, identity: &Identity) -> ServiceResult<StatsResponse> {
        authorize_operation(identity, Operation::ViewStats)?;

        let applications = self.ctx.application_repo();
        let total_applications = applications.count(&ApplicationFilter::default()).await?;
        let pending_applications = applications
            .count(&ApplicationFilter::with_status(ApplicationStatus::Pending))
            .await?;
        let total_users = self.ctx.user_repo().count().await?;
        let members = self.ctx.member_repo().stats().await?;

        Ok(StatsResponse {
            success: true,
            stats: StatsBody {
                total_members: members.total,
                total_applications,
                pending_applications,
                total_users,
                scam_members: members.scam,
                verified_members: members.verified,
                members_by_category: category_counts(&members),
            },
        })
    }
}

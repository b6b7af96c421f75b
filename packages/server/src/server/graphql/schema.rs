//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptyMutation, EmptySubscription, FieldError, FieldResult, RootNode};
use ledger_rpc::JobFilters;
use tracing::error;

use crate::domains::jobs::actions::{self as job_actions, JOBS_STREAM_ROOT_URL};
use crate::domains::jobs::data::JobValue;

// =============================================================================
// Helper functions
// =============================================================================

/// Convert anyhow::Error to juniper FieldError for thin resolvers
fn to_field_error(e: anyhow::Error) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// Get a single job by ledger id
    async fn job(ctx: &GraphQLContext, id: i32) -> FieldResult<Option<JobValue>> {
        let job = job_actions::get_job(id, ctx.deps()).await.map_err(|e| {
            error!(job_id = id, "Failed to get job: {}", e);
            to_field_error(e)
        })?;

        Ok(Some(job.into()))
    }

    /// Get jobs from the ledger
    ///
    /// Arguments:
    /// - dead: include jobs whose stream is not live (default: false)
    /// - streamRootUrl: root the stream playlists are resolved against
    /// - broadcaster: only jobs from this broadcaster address
    async fn jobs(
        ctx: &GraphQLContext,
        #[graphql(default = false)] dead: bool,
        #[graphql(default = JOBS_STREAM_ROOT_URL)] stream_root_url: String,
        broadcaster: Option<String>,
    ) -> FieldResult<Vec<Option<JobValue>>> {
        let filters = JobFilters { broadcaster };

        let jobs = job_actions::get_jobs(&filters, dead, &stream_root_url, ctx.deps())
            .await
            .map_err(|e| {
                error!("Failed to get jobs: {}", e);
                to_field_error(e)
            })?;

        Ok(jobs.into_iter().map(|job| Some(job.into())).collect())
    }
}

pub type Schema =
    RootNode<'static, Query, EmptyMutation<GraphQLContext>, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, EmptyMutation::new(), EmptySubscription::new())
}

use std::sync::Arc;

use crate::kernel::ServerDeps;

/// GraphQL request context
///
/// Contains shared resources available to all resolvers. Every request sees the
/// same `ServerDeps`, so the dead-job cache is shared across requests.
#[derive(Clone)]
pub struct GraphQLContext {
    pub server_deps: Arc<ServerDeps>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(server_deps: Arc<ServerDeps>) -> Self {
        Self { server_deps }
    }

    pub fn deps(&self) -> &ServerDeps {
        &self.server_deps
    }
}

mod cache;
mod config;
mod error;
mod memory;
mod model;
mod mutation;
mod navigation;
mod permissions;
mod service;
mod state;
mod views;

use state::ProjectsState;
use tokio::sync::watch;

pub use config::{ProjectsConfig, TeamProjectsLimit};
pub use error::{ProjectsError, Result};
pub use memory::{InMemoryProjectService, InMemoryResourceStores, ResourceEvent, Seed, ServiceCall, ServiceOp};
pub use model::{
    Actor, CreateProjectRequest, HomeProjectRef, Project, ProjectIcon, ProjectId, ProjectListItem,
    ProjectRelation, ProjectRole, ProjectType, ProjectsCount, RelationUpdate, ResourceKind,
    UpdateProjectRequest,
};
pub use navigation::{ActiveSelection, Route, RouteParams};
pub use permissions::{
    PermissionContext, PermissionOracle, ProjectPermissions, ScopeOracle, SCOPE_PROJECT_CREATE,
    SCOPE_PROJECT_LIST,
};
pub use service::{ProjectService, ResourceStores};
pub use state::ProjectsCache;
pub use views::ProjectsView;

/// Session-scoped project cache.
///
/// Constructed empty, populated through the `load_*` operations, the
/// navigation synchronizer and the mutation operations, and discarded with
/// the session. All remote work goes through `service`; sibling workflow and
/// credential stores are reached through `resources`.
pub struct ProjectsStore<S, O, R> {
    state: ProjectsState,
    service: S,
    oracle: O,
    resources: R,
    actor: Actor,
    config: ProjectsConfig,
}

impl<S, O, R> std::fmt::Debug for ProjectsStore<S, O, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectsStore")
            .field("actor", &self.actor.id)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}

impl<S, O, R> ProjectsStore<S, O, R> {
    pub fn new(service: S, oracle: O, resources: R, actor: Actor, config: ProjectsConfig) -> Self {
        Self {
            state: ProjectsState::new(),
            service,
            oracle,
            resources,
            actor,
            config,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn config(&self) -> &ProjectsConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn resources(&self) -> &R {
        &self.resources
    }

    /// Read-only borrow of the cache. Do not hold it across an `.await`.
    pub fn cache(&self) -> watch::Ref<'_, ProjectsCache> {
        self.state.read()
    }

    /// Change stream over the cache; every write marks the receiver changed.
    pub fn subscribe(&self) -> watch::Receiver<ProjectsCache> {
        self.state.subscribe()
    }
}

use tokio::sync::watch;

use crate::core::projects::{
    model::{Project, ProjectListItem, ProjectsCount},
    navigation::{ActiveSelection, Route},
};

/// Snapshot of everything the store caches for the session.
///
/// Consumers only ever see this through a shared borrow; writes go through
/// [`ProjectsState::modify`].
#[derive(Debug, Clone, Default)]
pub struct ProjectsCache {
    pub all_projects: Vec<ProjectListItem>,
    pub my_projects: Vec<ProjectListItem>,
    pub personal_project: Option<Project>,
    pub current_project: Option<Project>,
    pub projects_count: ProjectsCount,
    /// Last route seen by the navigation synchronizer.
    pub route: Route,
    /// Locally owned fallback for the active selection.
    pub active_override: Option<ActiveSelection>,
}

/// Owns the cache cell. Every write publishes a change to subscribers.
pub(super) struct ProjectsState {
    cache: watch::Sender<ProjectsCache>,
}

impl std::fmt::Debug for ProjectsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("ProjectsState")
            .field("all_projects", &cache.all_projects.len())
            .field("my_projects", &cache.my_projects.len())
            .field("current_project", &cache.current_project.as_ref().map(|p| &p.id))
            .field("subscribers", &self.cache.receiver_count())
            .finish()
    }
}

impl ProjectsState {
    pub(super) fn new() -> Self {
        Self {
            cache: watch::Sender::new(ProjectsCache::default()),
        }
    }

    /// Shared borrow of the cache. Must not be held across an `.await`.
    pub(super) fn read(&self) -> watch::Ref<'_, ProjectsCache> {
        self.cache.borrow()
    }

    pub(super) fn modify(&self, f: impl FnOnce(&mut ProjectsCache)) {
        self.cache.send_modify(f);
    }

    pub(super) fn subscribe(&self) -> watch::Receiver<ProjectsCache> {
        self.cache.subscribe()
    }
}

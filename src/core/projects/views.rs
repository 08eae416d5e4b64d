//! Derived views over the cache.
//!
//! Everything here is recomputed from a [`ProjectsCache`] snapshot plus the
//! permission and feature-limit inputs on each call. Nothing is stored.

use serde::Serialize;

use crate::core::projects::{
    ProjectsStore,
    config::TeamProjectsLimit,
    model::{ProjectId, ProjectListItem, ProjectType, ProjectsCount},
    navigation::ActiveSelection,
    permissions::{PermissionContext, PermissionOracle, ProjectPermissions, SCOPE_PROJECT_CREATE},
    state::ProjectsCache,
};

/// The whole "all" collection when the actor may list every project,
/// otherwise the whole "mine" collection. Never a mix of both.
pub fn available_projects<'a>(
    cache: &'a ProjectsCache,
    permissions: &ProjectPermissions,
) -> &'a [ProjectListItem] {
    if permissions.list {
        &cache.all_projects
    } else {
        &cache.my_projects
    }
}

pub fn projects_of_type(
    cache: &ProjectsCache,
    project_type: ProjectType,
) -> impl Iterator<Item = &ProjectListItem> {
    cache
        .all_projects
        .iter()
        .filter(move |project| project.project_type == project_type)
}

/// Route path parameter, then query parameter, then the loaded project.
pub fn current_project_id(cache: &ProjectsCache) -> Option<&ProjectId> {
    cache
        .route
        .params
        .project_id
        .as_ref()
        .or(cache.route.query.project_id.as_ref())
        .or(cache.current_project.as_ref().map(|project| &project.id))
}

/// Route path parameter, then query parameter, then the local override.
pub fn active_selection(cache: &ProjectsCache) -> Option<ActiveSelection> {
    cache
        .route
        .params
        .project_id
        .as_ref()
        .or(cache.route.query.project_id.as_ref())
        .map(|id| ActiveSelection::Project(id.clone()))
        .or_else(|| cache.active_override.clone())
}

/// Everything a consumer renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsView {
    pub available_projects: Vec<ProjectListItem>,
    pub personal_projects: Vec<ProjectListItem>,
    pub team_projects: Vec<ProjectListItem>,
    pub current_project_id: Option<ProjectId>,
    pub active_selection: Option<ActiveSelection>,
    pub is_project_home: bool,
    pub projects_count: ProjectsCount,
    pub team_projects_limit: TeamProjectsLimit,
    pub is_team_project_feature_enabled: bool,
    pub has_unlimited_projects: bool,
    pub is_team_project_limit_exceeded: bool,
    pub can_create_projects: bool,
    pub has_permission_to_create_projects: bool,
}

impl ProjectsView {
    pub fn compute(
        cache: &ProjectsCache,
        permissions: &ProjectPermissions,
        limit: TeamProjectsLimit,
        has_permission_to_create_projects: bool,
    ) -> Self {
        let team_count = cache.projects_count.team;
        Self {
            available_projects: available_projects(cache, permissions).to_vec(),
            personal_projects: projects_of_type(cache, ProjectType::Personal).cloned().collect(),
            team_projects: projects_of_type(cache, ProjectType::Team).cloned().collect(),
            current_project_id: current_project_id(cache).cloned(),
            active_selection: active_selection(cache),
            is_project_home: cache.route.is_home(),
            projects_count: cache.projects_count,
            team_projects_limit: limit,
            is_team_project_feature_enabled: limit.is_feature_enabled(),
            has_unlimited_projects: limit.is_unlimited(),
            is_team_project_limit_exceeded: limit.is_exceeded(team_count),
            can_create_projects: limit.allows_creation(team_count),
            has_permission_to_create_projects,
        }
    }
}

impl<S, O: PermissionOracle, R> ProjectsStore<S, O, R> {
    pub fn permissions(&self) -> ProjectPermissions {
        self.oracle.resource_permissions(&self.actor.global_scopes)
    }

    pub fn available_projects(&self) -> Vec<ProjectListItem> {
        let permissions = self.permissions();
        available_projects(&self.state.read(), &permissions).to_vec()
    }

    /// Asked of the oracle on every call.
    pub fn has_permission_to_create_projects(&self) -> bool {
        let context = PermissionContext {
            scopes: &self.actor.global_scopes,
        };
        self.oracle.has_permission(&[SCOPE_PROJECT_CREATE], &context)
    }

    pub fn view(&self) -> ProjectsView {
        let permissions = self.permissions();
        let may_create = self.has_permission_to_create_projects();
        ProjectsView::compute(
            &self.state.read(),
            &permissions,
            self.config.team_projects_limit,
            may_create,
        )
    }
}

impl<S, O, R> ProjectsStore<S, O, R> {
    pub fn personal_projects(&self) -> Vec<ProjectListItem> {
        projects_of_type(&self.state.read(), ProjectType::Personal)
            .cloned()
            .collect()
    }

    pub fn team_projects(&self) -> Vec<ProjectListItem> {
        projects_of_type(&self.state.read(), ProjectType::Team)
            .cloned()
            .collect()
    }

    pub fn current_project_id(&self) -> Option<ProjectId> {
        current_project_id(&self.state.read()).cloned()
    }

    pub fn active_selection(&self) -> Option<ActiveSelection> {
        active_selection(&self.state.read())
    }

    pub fn is_project_home(&self) -> bool {
        self.state.read().route.is_home()
    }

    pub fn is_team_project_feature_enabled(&self) -> bool {
        self.config.team_projects_limit.is_feature_enabled()
    }

    pub fn has_unlimited_projects(&self) -> bool {
        self.config.team_projects_limit.is_unlimited()
    }

    pub fn is_team_project_limit_exceeded(&self) -> bool {
        let team_count = self.state.read().projects_count.team;
        self.config.team_projects_limit.is_exceeded(team_count)
    }

    pub fn can_create_projects(&self) -> bool {
        let team_count = self.state.read().projects_count.team;
        self.config.team_projects_limit.allows_creation(team_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projects::navigation::{Route, RouteParams};

    #[test]
    fn path_param_beats_query_and_override() {
        let cache = ProjectsCache {
            route: Route {
                path: "/projects/p1/workflows".to_string(),
                params: RouteParams {
                    project_id: Some("p1".to_string()),
                },
                query: RouteParams {
                    project_id: Some("p2".to_string()),
                },
            },
            active_override: Some(ActiveSelection::Home),
            ..ProjectsCache::default()
        };
        assert_eq!(
            active_selection(&cache),
            Some(ActiveSelection::Project("p1".to_string()))
        );
    }

    #[test]
    fn query_param_beats_override() {
        let cache = ProjectsCache {
            route: Route::new("/workflows").with_query_project("p2"),
            active_override: Some(ActiveSelection::Home),
            ..ProjectsCache::default()
        };
        assert_eq!(
            active_selection(&cache),
            Some(ActiveSelection::Project("p2".to_string()))
        );
    }

    #[test]
    fn override_used_without_route_params() {
        let mut cache = ProjectsCache::default();
        assert_eq!(active_selection(&cache), None);

        cache.active_override = Some(ActiveSelection::Home);
        assert_eq!(active_selection(&cache), Some(ActiveSelection::Home));
    }
}

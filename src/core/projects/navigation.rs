//! Keeps the active selection in step with the router.
//!
//! Each route change runs the same rule: drop the local override, derive a
//! new one from the path (home view, workflow detail view), then load the
//! project named by the route's path parameter if there is one. Fetches
//! started by earlier routes are never cancelled.

use std::fmt;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize, Serializer};
use tokio::sync::watch;

use crate::core::projects::{
    ProjectsStore,
    error::Result,
    model::{HomeProjectRef, ProjectId, ProjectType},
    service::ProjectService,
    views,
};

const HOME: &str = "home";

/// What the navigation currently focuses on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActiveSelection {
    Home,
    Project(ProjectId),
}

impl fmt::Display for ActiveSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveSelection::Home => f.write_str(HOME),
            ActiveSelection::Project(id) => f.write_str(id),
        }
    }
}

impl Serialize for ActiveSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteParams {
    pub project_id: Option<ProjectId>,
}

/// Router state as delivered by the navigation context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    pub path: String,
    pub params: RouteParams,
    pub query: RouteParams,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_path_project(mut self, id: impl Into<ProjectId>) -> Self {
        self.params.project_id = Some(id.into());
        self
    }

    pub fn with_query_project(mut self, id: impl Into<ProjectId>) -> Self {
        self.query.project_id = Some(id.into());
        self
    }

    /// Build router state from a URL such as `/projects/p1/workflows?projectId=p2`.
    ///
    /// The segment following `projects` is the path parameter; the
    /// `projectId` query key is the query parameter. No percent-decoding.
    pub fn parse(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let mut route = Route::new(path);

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        while let Some(segment) = segments.next() {
            if segment == "projects" {
                route.params.project_id = segments.next().map(str::to_string);
                break;
            }
        }

        route.query.project_id = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "projectId")
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty());
        route
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Views are named by the first path segment, so `/projects/home` is not home.
    pub fn is_home(&self) -> bool {
        self.segments().next() == Some(HOME)
    }

    /// A workflow detail view: `/workflow/<id>`.
    pub fn is_workflow(&self) -> bool {
        let mut segments = self.segments();
        segments.next() == Some("workflow") && segments.next().is_some()
    }
}

impl<S: ProjectService, O, R> ProjectsStore<S, O, R> {
    /// Record the new route and recompute the override. Returns the project
    /// that still has to be loaded for it.
    fn apply_route(&self, route: Route) -> Option<ProjectId> {
        let to_load = route.params.project_id.clone();
        self.state.modify(|cache| {
            cache.route = route;
            cache.active_override = None;
            if cache.route.is_home() {
                cache.active_override = Some(ActiveSelection::Home);
                cache.current_project = None;
            } else if cache.route.is_workflow() {
                let selection = match views::current_project_id(cache) {
                    Some(id) => ActiveSelection::Project(id.clone()),
                    None => ActiveSelection::Home,
                };
                cache.active_override = Some(selection);
            }
            tracing::debug!(
                path = %cache.route.path,
                active = ?views::active_selection(cache),
                "navigation changed"
            );
        });
        to_load
    }

    /// Apply one navigation event and wait for the project fetch it triggers.
    pub async fn on_route_change(&self, route: Route) -> Result<()> {
        if let Some(id) = self.apply_route(route) {
            self.load_by_id(&id).await?;
        }
        Ok(())
    }

    /// Follow the navigation context until its sender is dropped.
    ///
    /// The current route is applied immediately. Fetches run concurrently
    /// with later route changes and are drained before returning. A failed
    /// fetch is logged since there is no caller to hand it to.
    pub async fn sync_navigation(&self, mut routes: watch::Receiver<Route>) {
        let mut in_flight = FuturesUnordered::new();

        let initial = routes.borrow_and_update().clone();
        if let Some(id) = self.apply_route(initial) {
            in_flight.push(self.fetch_for_route(id));
        }

        loop {
            tokio::select! {
                changed = routes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let route = routes.borrow_and_update().clone();
                    if let Some(id) = self.apply_route(route) {
                        in_flight.push(self.fetch_for_route(id));
                    }
                }
                Some(()) = in_flight.next(), if !in_flight.is_empty() => {}
            }
        }

        while in_flight.next().await.is_some() {}
    }

    async fn fetch_for_route(&self, id: ProjectId) {
        if let Err(error) = self.load_by_id(&id).await {
            tracing::warn!(project_id = %id, %error, "project fetch for route failed");
        }
    }

    /// Announce the home project of the resource being viewed, for routes
    /// that do not carry a project id themselves.
    pub async fn set_active_from_home_project(&self, home: Option<&HomeProjectRef>) -> Result<()> {
        if let Some(home) = home.filter(|home| home.project_type == ProjectType::Personal) {
            tracing::debug!(project_id = %home.id, "home project is personal");
            self.set_active_override(Some(ActiveSelection::Home));
            return Ok(());
        }

        let id = home.map(|home| home.id.clone());
        self.set_active_override(id.clone().map(ActiveSelection::Project));
        if let Some(id) = id {
            if self.current_project_id().is_none() {
                self.load_by_id(&id).await?;
            }
        }
        Ok(())
    }
}

impl<S, O, R> ProjectsStore<S, O, R> {
    pub fn set_active_override(&self, selection: Option<ActiveSelection>) {
        self.state.modify(|cache| cache.active_override = selection);
    }
}

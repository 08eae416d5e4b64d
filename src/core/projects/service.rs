use std::future::Future;

use crate::core::projects::{
    error::Result,
    model::{
        CreateProjectRequest, Project, ProjectId, ProjectListItem, ProjectsCount, ResourceKind,
        UpdateProjectRequest,
    },
};

/// Remote project API. Every call may suspend; failures come back as
/// [`ProjectsError`](crate::core::projects::ProjectsError).
pub trait ProjectService {
    fn list_all(&self) -> impl Future<Output = Result<Vec<ProjectListItem>>>;
    fn list_mine(&self) -> impl Future<Output = Result<Vec<ProjectListItem>>>;
    fn get_personal(&self) -> impl Future<Output = Result<Project>>;
    fn get(&self, id: &str) -> impl Future<Output = Result<Project>>;
    fn create(&self, request: &CreateProjectRequest) -> impl Future<Output = Result<Project>>;
    fn update(&self, request: &UpdateProjectRequest) -> impl Future<Output = Result<()>>;
    fn delete(&self, id: &str, transfer_id: Option<&str>) -> impl Future<Output = Result<()>>;
    fn count(&self) -> impl Future<Output = Result<ProjectsCount>>;
}

/// Sibling stores owning workflows and credentials.
pub trait ResourceStores {
    /// Move a resource into another project through the resource-specific API.
    fn transfer(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        target_project_id: &str,
    ) -> impl Future<Output = Result<()>>;

    /// Reload the store's listing, scoped to `project_id` when given.
    fn refresh_filtered_by_project(
        &self,
        kind: ResourceKind,
        project_id: Option<&ProjectId>,
    ) -> impl Future<Output = Result<()>>;
}

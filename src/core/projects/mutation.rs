use crate::core::projects::{
    ProjectsStore,
    error::Result,
    model::{CreateProjectRequest, Project, ResourceKind, UpdateProjectRequest},
    service::{ProjectService, ResourceStores},
};

impl<S: ProjectService, O, R> ProjectsStore<S, O, R> {
    /// Create a team project, refresh the counters and append the new project
    /// to "my projects".
    pub async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project> {
        let project = self.service.create(request).await?;
        self.load_counts().await?;

        let item = project.list_item_for(&self.actor.id);
        self.state.modify(|cache| cache.my_projects.push(item));
        tracing::info!(project_id = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Update a project and patch the cached copies in place.
    ///
    /// Relations are not part of the list shape, so a relation change reloads
    /// the project instead, but only when it is the current project.
    pub async fn update_project(&self, request: &UpdateProjectRequest) -> Result<()> {
        self.service.update(request).await?;

        self.state.modify(|cache| {
            let items = cache
                .my_projects
                .iter_mut()
                .chain(cache.all_projects.iter_mut())
                .filter(|item| item.id == request.id);
            for item in items {
                item.name.clone_from(&request.name);
                if let Some(icon) = &request.icon {
                    item.icon = Some(icon.clone());
                }
            }
            if let Some(current) = cache
                .current_project
                .as_mut()
                .filter(|project| project.id == request.id)
            {
                current.name.clone_from(&request.name);
                if let Some(icon) = &request.icon {
                    current.icon = Some(icon.clone());
                }
            }
        });
        tracing::info!(project_id = %request.id, "updated project");

        let is_current = self.current_project_id().as_ref() == Some(&request.id);
        if request.relations.is_some() && is_current {
            self.load_by_id(&request.id).await?;
        }
        Ok(())
    }

    /// Delete a project, optionally handing its resources to `transfer_id`.
    pub async fn delete_project(&self, id: &str, transfer_id: Option<&str>) -> Result<()> {
        self.service.delete(id, transfer_id).await?;
        self.load_counts().await?;

        self.state.modify(|cache| {
            cache.my_projects.retain(|item| item.id != id);
            cache.all_projects.retain(|item| item.id != id);
        });
        tracing::info!(project_id = %id, transfer_id = ?transfer_id, "deleted project");
        Ok(())
    }
}

impl<S: ProjectService, O, R: ResourceStores> ProjectsStore<S, O, R> {
    /// Move a workflow or credential into another project, then have its store
    /// reload the listing for the current project. The cache is not touched.
    pub async fn move_resource_to_project(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        target_project_id: &str,
    ) -> Result<()> {
        self.resources
            .transfer(kind, resource_id, target_project_id)
            .await?;
        tracing::info!(?kind, resource_id, target_project_id, "moved resource");

        let scope = self.current_project_id();
        self.resources
            .refresh_filtered_by_project(kind, scope.as_ref())
            .await
    }
}

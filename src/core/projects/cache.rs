use crate::core::projects::{
    ProjectsStore,
    error::Result,
    model::{Project, ProjectListItem, ProjectsCount},
    permissions::PermissionOracle,
    service::ProjectService,
};

// Every load writes only after the remote call succeeded, so a failure leaves
// the previous value in place. Overlapping loads of the same field are
// last-to-complete-wins.
impl<S: ProjectService, O, R> ProjectsStore<S, O, R> {
    pub async fn load_all(&self) -> Result<Vec<ProjectListItem>> {
        let projects = self.service.list_all().await?;
        tracing::debug!(count = projects.len(), "replaced all projects");
        let cached = projects.clone();
        self.state.modify(|cache| cache.all_projects = cached);
        Ok(projects)
    }

    pub async fn load_mine(&self) -> Result<Vec<ProjectListItem>> {
        let projects = self.service.list_mine().await?;
        tracing::debug!(count = projects.len(), "replaced my projects");
        let cached = projects.clone();
        self.state.modify(|cache| cache.my_projects = cached);
        Ok(projects)
    }

    pub async fn load_personal(&self) -> Result<Project> {
        let project = self.service.get_personal().await?;
        tracing::debug!(project_id = %project.id, "replaced personal project");
        let cached = project.clone();
        self.state.modify(|cache| cache.personal_project = Some(cached));
        Ok(project)
    }

    /// Fetch one project and make it the current project.
    ///
    /// Not cancellable: when two calls overlap, whichever response arrives
    /// last ends up in `current_project`, even if it answers the older call.
    pub async fn load_by_id(&self, id: &str) -> Result<Project> {
        let project = self.service.get(id).await?;
        tracing::debug!(project_id = %project.id, "replaced current project");
        let cached = project.clone();
        self.state.modify(|cache| cache.current_project = Some(cached));
        Ok(project)
    }

    pub async fn load_counts(&self) -> Result<ProjectsCount> {
        let count = self.service.count().await?;
        tracing::debug!(?count, "replaced project counts");
        self.state.modify(|cache| cache.projects_count = count);
        Ok(count)
    }

    pub fn set_current(&self, project: Option<Project>) {
        self.state.modify(|cache| cache.current_project = project);
    }
}

impl<S: ProjectService, O: PermissionOracle, R> ProjectsStore<S, O, R> {
    /// Load whichever collection [`available_projects`](Self::available_projects) reads.
    pub async fn load_available(&self) -> Result<Vec<ProjectListItem>> {
        if self.permissions().list {
            self.load_all().await
        } else {
            self.load_mine().await
        }
    }
}

impl<S, O, R> ProjectsStore<S, O, R> {
    pub fn all_projects(&self) -> Vec<ProjectListItem> {
        self.state.read().all_projects.clone()
    }

    pub fn my_projects(&self) -> Vec<ProjectListItem> {
        self.state.read().my_projects.clone()
    }

    pub fn personal_project(&self) -> Option<Project> {
        self.state.read().personal_project.clone()
    }

    pub fn current_project(&self) -> Option<Project> {
        self.state.read().current_project.clone()
    }

    pub fn projects_count(&self) -> ProjectsCount {
        self.state.read().projects_count
    }
}

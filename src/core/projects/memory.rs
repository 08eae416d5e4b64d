//! In-process backends for the remote project API and the sibling stores.
//!
//! Used by the `projectsync` binary to replay navigation against a seed file,
//! and by the integration tests, which rely on the call log, failure
//! injection and per-project latency.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    time::Duration,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::projects::{
    config::ProjectsConfig,
    error::{ProjectsError, Result},
    model::{
        Actor, CreateProjectRequest, Project, ProjectId, ProjectListItem, ProjectRelation,
        ProjectRole, ProjectType, ProjectsCount, ResourceKind, UpdateProjectRequest,
    },
    service::{ProjectService, ResourceStores},
};

/// Contents of a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub actor: Actor,
    #[serde(default)]
    pub config: ProjectsConfig,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Seed {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid seed file {:?}", path))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOp {
    ListAll,
    ListMine,
    GetPersonal,
    Get,
    Create,
    Update,
    Delete,
    Count,
}

impl ServiceOp {
    pub fn name(self) -> &'static str {
        match self {
            ServiceOp::ListAll => "list all projects",
            ServiceOp::ListMine => "list my projects",
            ServiceOp::GetPersonal => "get personal project",
            ServiceOp::Get => "get project",
            ServiceOp::Create => "create project",
            ServiceOp::Update => "update project",
            ServiceOp::Delete => "delete project",
            ServiceOp::Count => "count projects",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    ListAll,
    ListMine,
    GetPersonal,
    Get(ProjectId),
    Create(String),
    Update(ProjectId),
    Delete {
        id: ProjectId,
        transfer_id: Option<ProjectId>,
    },
    Count,
}

impl ServiceCall {
    pub fn op(&self) -> ServiceOp {
        match self {
            ServiceCall::ListAll => ServiceOp::ListAll,
            ServiceCall::ListMine => ServiceOp::ListMine,
            ServiceCall::GetPersonal => ServiceOp::GetPersonal,
            ServiceCall::Get(_) => ServiceOp::Get,
            ServiceCall::Create(_) => ServiceOp::Create,
            ServiceCall::Update(_) => ServiceOp::Update,
            ServiceCall::Delete { .. } => ServiceOp::Delete,
            ServiceCall::Count => ServiceOp::Count,
        }
    }
}

/// Project API backed by a vector, seen from one actor.
///
/// "Mine" means the actor appears in the project's relations.
#[derive(Debug)]
pub struct InMemoryProjectService {
    actor_id: String,
    projects: RwLock<Vec<Project>>,
    calls: RwLock<Vec<ServiceCall>>,
    failing: RwLock<HashSet<ServiceOp>>,
    latency: RwLock<HashMap<ProjectId, Duration>>,
}

impl InMemoryProjectService {
    pub fn new(actor_id: impl Into<String>, projects: Vec<Project>) -> Self {
        Self {
            actor_id: actor_id.into(),
            projects: RwLock::new(projects),
            calls: RwLock::new(Vec::new()),
            failing: RwLock::new(HashSet::new()),
            latency: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(seed.actor.id.clone(), seed.projects.clone())
    }

    /// Make every call of `op` fail with a transport error until [`recover`](Self::recover).
    pub async fn fail(&self, op: ServiceOp) {
        self.failing.write().await.insert(op);
    }

    pub async fn recover(&self, op: ServiceOp) {
        self.failing.write().await.remove(&op);
    }

    /// Delay `get` responses for one project.
    pub async fn set_latency(&self, id: impl Into<ProjectId>, delay: Duration) {
        self.latency.write().await.insert(id.into(), delay);
    }

    pub async fn calls(&self) -> Vec<ServiceCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self, op: ServiceOp) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.projects.read().await.clone()
    }

    async fn begin(&self, call: ServiceCall) -> Result<()> {
        let op = call.op();
        self.calls.write().await.push(call);
        if self.failing.read().await.contains(&op) {
            return Err(ProjectsError::transport(op.name(), "service unavailable"));
        }
        Ok(())
    }
}

impl ProjectService for InMemoryProjectService {
    async fn list_all(&self) -> Result<Vec<ProjectListItem>> {
        self.begin(ServiceCall::ListAll).await?;
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .map(|project| project.list_item_for(&self.actor_id))
            .collect())
    }

    async fn list_mine(&self) -> Result<Vec<ProjectListItem>> {
        self.begin(ServiceCall::ListMine).await?;
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .filter(|project| project.role_of(&self.actor_id).is_some())
            .map(|project| project.list_item_for(&self.actor_id))
            .collect())
    }

    async fn get_personal(&self) -> Result<Project> {
        self.begin(ServiceCall::GetPersonal).await?;
        self.projects
            .read()
            .await
            .iter()
            .find(|project| {
                project.project_type == ProjectType::Personal
                    && project.role_of(&self.actor_id) == Some(ProjectRole::PersonalOwner)
            })
            .cloned()
            .ok_or_else(|| ProjectsError::not_found(format!("personal:{}", self.actor_id)))
    }

    async fn get(&self, id: &str) -> Result<Project> {
        self.begin(ServiceCall::Get(id.to_string())).await?;
        let delay = self.latency.read().await.get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.projects
            .read()
            .await
            .iter()
            .find(|project| project.id == id)
            .cloned()
            .ok_or_else(|| ProjectsError::not_found(id))
    }

    async fn create(&self, request: &CreateProjectRequest) -> Result<Project> {
        self.begin(ServiceCall::Create(request.name.clone())).await?;
        let now = OffsetDateTime::now_utc();
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            project_type: ProjectType::Team,
            icon: request.icon.clone(),
            relations: vec![ProjectRelation {
                user_id: self.actor_id.clone(),
                role: ProjectRole::Admin,
            }],
            created_at: now,
            updated_at: now,
        };
        self.projects.write().await.push(project.clone());
        Ok(project)
    }

    async fn update(&self, request: &UpdateProjectRequest) -> Result<()> {
        self.begin(ServiceCall::Update(request.id.clone())).await?;
        let mut projects = self.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|project| project.id == request.id)
            .ok_or_else(|| ProjectsError::not_found(request.id.clone()))?;

        project.name.clone_from(&request.name);
        if let Some(icon) = &request.icon {
            project.icon = Some(icon.clone());
        }
        if let Some(relations) = &request.relations {
            project.relations = relations
                .iter()
                .map(|relation| ProjectRelation {
                    user_id: relation.user_id.clone(),
                    role: relation.role,
                })
                .collect();
        }
        project.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    async fn delete(&self, id: &str, transfer_id: Option<&str>) -> Result<()> {
        self.begin(ServiceCall::Delete {
            id: id.to_string(),
            transfer_id: transfer_id.map(str::to_string),
        })
        .await?;
        let mut projects = self.projects.write().await;
        let index = projects
            .iter()
            .position(|project| project.id == id)
            .ok_or_else(|| ProjectsError::not_found(id))?;
        projects.remove(index);
        Ok(())
    }

    async fn count(&self) -> Result<ProjectsCount> {
        self.begin(ServiceCall::Count).await?;
        let mut count = ProjectsCount::default();
        for project in self.projects.read().await.iter() {
            match project.project_type {
                ProjectType::Personal => count.personal += 1,
                ProjectType::Team => count.team += 1,
                ProjectType::Public => count.public += 1,
            }
        }
        Ok(count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceEvent {
    Transferred {
        kind: ResourceKind,
        resource_id: String,
        target_project_id: ProjectId,
    },
    Refreshed {
        kind: ResourceKind,
        project_id: Option<ProjectId>,
    },
}

/// Workflow and credential stores that only record what they were asked to do.
#[derive(Debug, Default)]
pub struct InMemoryResourceStores {
    events: RwLock<Vec<ResourceEvent>>,
    failing: RwLock<HashSet<ResourceKind>>,
}

impl InMemoryResourceStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make transfers of `kind` fail with a transport error.
    pub async fn fail_transfers(&self, kind: ResourceKind) {
        self.failing.write().await.insert(kind);
    }

    pub async fn events(&self) -> Vec<ResourceEvent> {
        self.events.read().await.clone()
    }
}

impl ResourceStores for InMemoryResourceStores {
    async fn transfer(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        target_project_id: &str,
    ) -> Result<()> {
        if self.failing.read().await.contains(&kind) {
            let operation = match kind {
                ResourceKind::Workflow => "move workflow",
                ResourceKind::Credential => "move credential",
            };
            return Err(ProjectsError::transport(operation, "service unavailable"));
        }
        self.events.write().await.push(ResourceEvent::Transferred {
            kind,
            resource_id: resource_id.to_string(),
            target_project_id: target_project_id.to_string(),
        });
        Ok(())
    }

    async fn refresh_filtered_by_project(
        &self,
        kind: ResourceKind,
        project_id: Option<&ProjectId>,
    ) -> Result<()> {
        self.events.write().await.push(ResourceEvent::Refreshed {
            kind,
            project_id: project_id.cloned(),
        });
        Ok(())
    }
}

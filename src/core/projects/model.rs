use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub type ProjectId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Personal,
    Team,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectRole {
    #[serde(rename = "project:personalOwner")]
    PersonalOwner,
    #[serde(rename = "project:admin")]
    Admin,
    #[serde(rename = "project:editor")]
    Editor,
    #[serde(rename = "project:viewer")]
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ProjectIcon {
    Emoji(String),
    Icon(String),
}

/// Membership of one user in a project, only present on fully loaded projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRelation {
    pub user_id: String,
    pub role: ProjectRole,
}

/// Summary shape held in the collection views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListItem {
    pub id: ProjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub icon: Option<ProjectIcon>,
    #[serde(default)]
    pub role: Option<ProjectRole>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub icon: Option<ProjectIcon>,
    #[serde(default)]
    pub relations: Vec<ProjectRelation>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Project {
    pub fn role_of(&self, user_id: &str) -> Option<ProjectRole> {
        self.relations
            .iter()
            .find(|relation| relation.user_id == user_id)
            .map(|relation| relation.role)
    }

    /// Summary of this project as seen by `user_id`.
    pub fn list_item_for(&self, user_id: &str) -> ProjectListItem {
        ProjectListItem {
            id: self.id.clone(),
            name: self.name.clone(),
            project_type: self.project_type,
            icon: self.icon.clone(),
            role: self.role_of(user_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Server-side counters. Not derivable from the loaded collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsCount {
    pub personal: u64,
    pub team: u64,
    pub public: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub icon: Option<ProjectIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationUpdate {
    pub user_id: String,
    pub role: ProjectRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<ProjectIcon>,
    /// Replaces the membership list when present.
    #[serde(default)]
    pub relations: Option<Vec<RelationUpdate>>,
}

/// The project a resource (workflow, credential) declares as its home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeProjectRef {
    pub id: ProjectId,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Workflow,
    Credential,
}

/// The signed-in user the cache is kept for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    #[serde(default)]
    pub global_scopes: Vec<String>,
}

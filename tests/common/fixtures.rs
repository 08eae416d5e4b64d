#![allow(dead_code)]

use projectsync::core::projects::{
    Actor, InMemoryProjectService, InMemoryResourceStores, Project, ProjectListItem,
    ProjectRelation, ProjectRole, ProjectType, ProjectsConfig, ProjectsStore, SCOPE_PROJECT_CREATE, SCOPE_PROJECT_LIST,
    ScopeOracle, TeamProjectsLimit,
};
use time::OffsetDateTime;

pub type TestStore = ProjectsStore<InMemoryProjectService, ScopeOracle, InMemoryResourceStores>;

pub const ACTOR_ID: &str = "user-1";
pub const OTHER_USER_ID: &str = "user-2";

/// Scopes of an instance owner: may list every project and create new ones.
pub const OWNER_SCOPES: &[&str] = &[SCOPE_PROJECT_LIST, SCOPE_PROJECT_CREATE];
/// Scopes of a plain member: sees only the projects they belong to.
pub const MEMBER_SCOPES: &[&str] = &[];

pub fn make_project(
    id: &str,
    name: &str,
    project_type: ProjectType,
    members: &[(&str, ProjectRole)],
) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        project_type,
        icon: None,
        relations: members
            .iter()
            .map(|(user_id, role)| ProjectRelation {
                user_id: user_id.to_string(),
                role: *role,
            })
            .collect(),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

/// Two personal projects, two team projects and one public project.
/// The actor owns `personal-1` and administers `team-1`.
pub fn sample_projects() -> Vec<Project> {
    vec![
        make_project(
            "personal-1",
            "Ada's project",
            ProjectType::Personal,
            &[(ACTOR_ID, ProjectRole::PersonalOwner)],
        ),
        make_project(
            "personal-2",
            "Bob's project",
            ProjectType::Personal,
            &[(OTHER_USER_ID, ProjectRole::PersonalOwner)],
        ),
        make_project(
            "team-1",
            "Marketing",
            ProjectType::Team,
            &[
                (ACTOR_ID, ProjectRole::Admin),
                (OTHER_USER_ID, ProjectRole::Editor),
            ],
        ),
        make_project(
            "team-2",
            "Finance",
            ProjectType::Team,
            &[(OTHER_USER_ID, ProjectRole::Admin)],
        ),
        make_project("public-1", "Templates", ProjectType::Public, &[]),
    ]
}

pub fn make_store_with(projects: Vec<Project>, scopes: &[&str], limit: i64) -> TestStore {
    let actor = Actor {
        id: ACTOR_ID.to_string(),
        global_scopes: scopes.iter().map(|s| s.to_string()).collect(),
    };
    let config = ProjectsConfig {
        team_projects_limit: TeamProjectsLimit(limit),
    };
    ProjectsStore::new(
        InMemoryProjectService::new(ACTOR_ID, projects),
        ScopeOracle,
        InMemoryResourceStores::new(),
        actor,
        config,
    )
}

pub fn make_store(scopes: &[&str]) -> TestStore {
    make_store_with(sample_projects(), scopes, -1)
}

/// Store with "all", "mine" and counts already loaded.
pub async fn make_loaded_store(scopes: &[&str]) -> TestStore {
    let store = make_store(scopes);
    store.load_all().await.expect("Failed to load all projects");
    store.load_mine().await.expect("Failed to load my projects");
    store.load_counts().await.expect("Failed to load counts");
    store
}

pub fn ids(projects: &[ProjectListItem]) -> Vec<String> {
    projects.iter().map(|project| project.id.clone()).collect()
}

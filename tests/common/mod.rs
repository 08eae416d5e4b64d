mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from projectsync for tests
pub use projectsync::core::projects::{
    ActiveSelection, CreateProjectRequest, HomeProjectRef, InMemoryProjectService,
    InMemoryResourceStores, Project, ProjectIcon, ProjectListItem, ProjectRelation, ProjectRole, ProjectType,
    ProjectsCount, ProjectsError, ProjectsStore, RelationUpdate, ResourceEvent, ResourceKind,
    Route, ScopeOracle, ServiceCall, ServiceOp, TeamProjectsLimit, UpdateProjectRequest,
};

use serde::{Deserialize, Serialize};

pub const SCOPE_PROJECT_LIST: &str = "project:list";
pub const SCOPE_PROJECT_CREATE: &str = "project:create";

/// Capabilities the current actor holds over projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPermissions {
    pub list: bool,
    pub create: bool,
}

/// The actor a permission question is asked about.
#[derive(Debug, Clone, Copy)]
pub struct PermissionContext<'a> {
    pub scopes: &'a [String],
}

/// External policy evaluator. The store only reads its answers.
pub trait PermissionOracle {
    fn resource_permissions(&self, scopes: &[String]) -> ProjectPermissions;
    fn has_permission(&self, required: &[&str], context: &PermissionContext<'_>) -> bool;
}

/// Grants exactly the scopes the actor carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeOracle;

impl PermissionOracle for ScopeOracle {
    fn resource_permissions(&self, scopes: &[String]) -> ProjectPermissions {
        let has = |scope: &str| scopes.iter().any(|s| s == scope);
        ProjectPermissions {
            list: has(SCOPE_PROJECT_LIST),
            create: has(SCOPE_PROJECT_CREATE),
        }
    }

    fn has_permission(&self, required: &[&str], context: &PermissionContext<'_>) -> bool {
        required
            .iter()
            .all(|scope| context.scopes.iter().any(|s| s == scope))
    }
}

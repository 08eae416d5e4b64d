use serde::{Deserialize, Serialize};

/// Team project quota from the feature settings. `-1` is unlimited, `0`
/// disables team projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamProjectsLimit(pub i64);

impl TeamProjectsLimit {
    pub const UNLIMITED: Self = Self(-1);
    pub const DISABLED: Self = Self(0);

    pub fn is_feature_enabled(self) -> bool {
        self.0 != 0
    }

    pub fn is_unlimited(self) -> bool {
        self.0 == -1
    }

    /// Meaningless for the unlimited sentinel; callers gate on
    /// [`is_unlimited`](Self::is_unlimited) first.
    pub fn is_exceeded(self, team_count: u64) -> bool {
        i128::from(team_count) >= i128::from(self.0)
    }

    pub fn allows_creation(self, team_count: u64) -> bool {
        self.is_unlimited() || (self.is_feature_enabled() && !self.is_exceeded(team_count))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectsConfig {
    pub team_projects_limit: TeamProjectsLimit,
}

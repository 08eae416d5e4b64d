use thiserror::Error;

use crate::core::projects::model::ProjectId;

/// Failures surfaced by remote calls. Propagated unchanged, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectsError {
    /// Network or server failure, including the server rejecting the request.
    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("project not found: {id}")]
    NotFound { id: ProjectId },
}

impl ProjectsError {
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<ProjectId>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

pub type Result<T, E = ProjectsError> = std::result::Result<T, E>;

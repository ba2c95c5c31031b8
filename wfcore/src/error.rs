use thiserror::Error;

/// Structural problems with a specification; these are detected before
/// any part of a document is produced.
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
pub enum SpecificationError {
    #[error("status must have a non-empty title")]
    EmptyStatusTitle,
    #[error("transition must have a non-empty title")]
    EmptyTransitionTitle,
    #[error("status registered as `{key}` is titled `{title}`")]
    StatusKeyMismatch {
        key: String,
        title: String,
    },
    #[error("duplicate transition title: {0}")]
    DuplicateTransition(String),
    #[error("initial status not found: {0}")]
    MissingInitialStatus(String),
    #[error("transition `{0}` has improperly defined src_status")]
    MissingSource(String),
    #[error("transition `{0}` has improperly defined dest_status")]
    MissingDestination(String),
    #[error("transition `{transition}` references unknown status `{status}`")]
    UnknownStatus {
        transition: String,
        status: String,
    },
}

/// Failures reported by the collaborators the generator consults, such
/// as the action group registry or the permission collector.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
    #[error("unknown workflow: {0}")]
    UnknownWorkflow(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Denotes custom collaborator failure; generally informative.
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

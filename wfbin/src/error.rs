use thiserror::Error;
use wfgen::error::GeneratorError;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WfbinError {
    #[error(transparent)]
    GeneratorError(#[from] GeneratorError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("no workflow id can be derived from `{0}`")]
    NoWorkflowId(String),
}

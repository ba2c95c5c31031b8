use thiserror::Error;
use wfcore::error::{
    RegistryError,
    SpecificationError,
};

use crate::ids::IdNamespace;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Specification(#[from] SpecificationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("customer role `{0}` has no role mapping")]
    UnmappedRole(String),
    #[error("action `{action}` on status `{status}` is neither action group nor transition")]
    UnclassifiableAction {
        action: String,
        status: String,
    },
    #[error("{namespace} id `{id}` is produced by both `{first}` and `{second}`")]
    IdentifierCollision {
        namespace: IdNamespace,
        id: String,
        first: String,
        second: String,
    },
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

use crate::ids::IdNamespace;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("An element is missing an id ({namespace} namespace).")]
    MissingId { namespace: IdNamespace },

    #[error("Duplicate {namespace} id: {id}.")]
    DuplicateId { id: String, namespace: IdNamespace },

    #[error("graph JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

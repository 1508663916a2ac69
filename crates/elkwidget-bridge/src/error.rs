use crate::host::BoxError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("render engine error: {0}")]
    Engine(#[source] BoxError),

    #[error("command channel error: {0}")]
    Command(#[source] BoxError),

    #[error("invalid action: {0}")]
    Action(#[from] serde_json::Error),
}

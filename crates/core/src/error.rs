use crate::visit::VisitStatus;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),
    #[error("visit not found: {0}")]
    VisitNotFound(uuid::Uuid),
    #[error("doctor not found: {0}")]
    DoctorNotFound(uuid::Uuid),
    #[error("visit {id} is terminal ({status}) and cannot change status")]
    VisitAlreadyTerminal { id: uuid::Uuid, status: VisitStatus },
}

pub type QueueResult<T> = std::result::Result<T, QueueError>;

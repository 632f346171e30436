use crate::types::DbId;

/// Domain error shared by the catalog, the battle engine and the random source.
///
/// Every message embeds the offending value or id so the HTTP layer can render
/// it verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{entity} with name '{name}' not found")]
    NameNotFound { entity: &'static str, name: String },

    /// The row exists but carries the soft-delete tag.
    #[error("{entity} with ID {id} has been deleted")]
    Deleted { entity: &'static str, id: DbId },

    #[error("{entity} with name '{name}' has been deleted")]
    NameDeleted { entity: &'static str, name: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// A bounded container refused another entry.
    #[error("{0}")]
    Capacity(String),

    /// The operation was invoked from a state that does not allow it.
    #[error("{0}")]
    Precondition(String),

    /// A collaborator (random source, storage transport) failed.
    #[error("{0}")]
    Runtime(String),

    #[error("{0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

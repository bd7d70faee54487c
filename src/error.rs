use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChathamError>;

#[derive(Debug, Error)]
pub enum ChathamError {
    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Storage not initialized")]
    NotInitialized,

    #[error("Invalid recovery phrase")]
    InvalidRecoveryPhrase,

    #[error("Cannot {action} during the {from} step")]
    InvalidSetupTransition { from: String, action: String },

    #[error("Document error: {0}")]
    Document(#[from] automerge::AutomergeError),

    #[error("Failed to write board content: {0}")]
    Reconcile(#[from] autosurgeon::ReconcileError),

    #[error("Failed to read board content: {0}")]
    Hydrate(#[from] autosurgeon::HydrateError),

    #[error("Mnemonic error: {0}")]
    Mnemonic(#[from] bip39::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

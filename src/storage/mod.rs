use crate::{document::BoardDocument, domain::CreatorProfile, error::Result};
use async_trait::async_trait;

pub mod file_storage;

pub use file_storage::FileStorage;

/// Storage trait for persisting board documents and the local profile
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves a board, merging it with any copy already stored.
    /// Returns the merged snapshot that was written.
    async fn save_board(&self, board: &BoardDocument) -> Result<BoardDocument>;

    /// Loads a board by ID
    async fn load_board(&self, board_id: &str) -> Result<BoardDocument>;

    /// Lists all stored board IDs
    async fn list_board_ids(&self) -> Result<Vec<String>>;

    /// Deletes a board
    async fn delete_board(&self, board_id: &str) -> Result<()>;

    /// Saves the profile used when creating boards
    async fn save_profile(&self, profile: &CreatorProfile) -> Result<()>;

    /// Loads the saved profile, or the default one if none was saved
    async fn load_profile(&self) -> Result<CreatorProfile>;

    /// Checks if storage has been initialized
    async fn is_initialized(&self) -> bool;
}

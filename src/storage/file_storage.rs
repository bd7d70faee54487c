use crate::{
    document::BoardDocument,
    domain::CreatorProfile,
    error::{ChathamError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use uuid::Uuid;

/// File-based storage implementation.
///
/// Board writes are serialized through `board_lock` so a read-merge-write in
/// `save_board` never interleaves with another one.
pub struct FileStorage {
    root_path: PathBuf,
    board_lock: Mutex<()>,
}

impl FileStorage {
    const CHATHAM_DIR: &'static str = ".chatham";
    const BOARDS_DIR: &'static str = "boards";
    const PROFILE_FILE: &'static str = "profile.json";
    const BOARD_EXTENSION: &'static str = "automerge";

    /// Creates a new FileStorage instance rooted at `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::CHATHAM_DIR),
            board_lock: Mutex::new(()),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn profile_file(&self) -> PathBuf {
        self.root_path.join(Self::PROFILE_FILE)
    }

    /// Board IDs are UUIDs; anything else never reaches the filesystem
    fn board_file(&self, board_id: &str) -> Result<PathBuf> {
        let id = Uuid::parse_str(board_id)
            .map_err(|_| ChathamError::BoardNotFound(board_id.to_string()))?;
        Ok(self
            .boards_dir()
            .join(format!("{}.{}", id, Self::BOARD_EXTENSION)))
    }

    /// Writes to a sibling temp file and renames it over `path`
    async fn write_atomically(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;

        if !self.profile_file().exists() {
            self.save_profile(&CreatorProfile::default()).await?;
        }

        info!(
            "event=storage_init module=storage status=ok root={}",
            self.root_path.display()
        );
        Ok(())
    }

    async fn save_board(&self, board: &BoardDocument) -> Result<BoardDocument> {
        if !self.is_initialized().await {
            return Err(ChathamError::NotInitialized);
        }

        let file_path = self.board_file(&board.id()?)?;
        let _guard = self.board_lock.lock().await;
        let merged = if file_path.exists() {
            let stored = BoardDocument::load(&fs::read(&file_path).await?)?;
            stored.merge(board)?
        } else {
            board.clone()
        };

        let bytes = merged.save();
        self.write_atomically(&file_path, &bytes).await?;
        debug!(
            "event=save_board module=storage status=ok path={} bytes={}",
            file_path.display(),
            bytes.len()
        );
        Ok(merged)
    }

    async fn load_board(&self, board_id: &str) -> Result<BoardDocument> {
        let file_path = self.board_file(board_id)?;

        if !file_path.exists() {
            return Err(ChathamError::BoardNotFound(board_id.to_string()));
        }

        let bytes = fs::read(&file_path).await?;
        BoardDocument::load(&bytes)
    }

    async fn list_board_ids(&self) -> Result<Vec<String>> {
        let boards_dir = self.boards_dir();

        if !boards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&boards_dir).await?;
        let mut ids: Vec<String> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some(Self::BOARD_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if Uuid::parse_str(stem).is_ok() {
                        ids.push(stem.to_string());
                    }
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    async fn delete_board(&self, board_id: &str) -> Result<()> {
        let file_path = self.board_file(board_id)?;
        let _guard = self.board_lock.lock().await;

        if !file_path.exists() {
            return Err(ChathamError::BoardNotFound(board_id.to_string()));
        }

        fs::remove_file(file_path).await?;
        Ok(())
    }

    async fn save_profile(&self, profile: &CreatorProfile) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.profile_file(), json).await?;

        Ok(())
    }

    async fn load_profile(&self) -> Result<CreatorProfile> {
        let profile_file = self.profile_file();

        if !profile_file.exists() {
            return Ok(CreatorProfile::default());
        }

        let contents = fs::read_to_string(&profile_file).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.boards_dir().exists()
    }
}

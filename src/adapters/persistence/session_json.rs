//! Implements SessionStorePort using a JSON file.
//!
//! Holds the session bag between console turns, the way a voice platform would carry it.

use crate::domain::{DomainError, SessionBag};
use crate::ports::SessionStorePort;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// JSON file-based session storage.
pub struct SessionJson {
    path: PathBuf,
}

impl SessionJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl SessionStorePort for SessionJson {
    /// A missing file is an empty bag. A corrupt one is logged and treated as empty, so the next
    /// Continue reports missing context instead of failing the turn.
    async fn load(&self) -> Result<SessionBag, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionBag::new()),
            Err(e) => return Err(DomainError::Session(format!("read session: {}", e))),
        };
        match serde_json::from_str(&raw) {
            Ok(bag) => Ok(bag),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable session");
                Ok(SessionBag::new())
            }
        }
    }

    /// Write to a temp file, sync, then rename over the target so a crash never leaves a
    /// half-written session.
    async fn save(&self, bag: &SessionBag) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(bag).map_err(|e| DomainError::Session(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Session(format!("create session dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Session(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Session(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Session(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Session(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

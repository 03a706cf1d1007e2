use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;

/// Token pair of a logged-in user.
///
/// Presence of the access token is the only thing that counts as "logged
/// in"; tokens are never decoded client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access: String,
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(rename = "refreshToken", skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Durable store for the session tokens.
///
/// Cloning yields another handle to the same state. One store is created at
/// startup and handed to both the API client and the app.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
    inner: Arc<Mutex<SessionFile>>,
}

impl SessionStore {
    /// Opens the store at `path`. A missing file means logged out.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<SessionFile>(&content) {
                Ok(file) => file,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "ignoring unreadable session file: {err}");
                    SessionFile::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => SessionFile::default(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path: Some(path),
            inner: Arc::new(Mutex::new(file)),
        })
    }

    /// A store that never touches the disk.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: Arc::new(Mutex::new(SessionFile::default())),
        }
    }

    pub async fn get(&self) -> Option<Session> {
        let guard = self.inner.lock().await;
        guard.access_token.as_ref().map(|access| Session {
            access: access.clone(),
            refresh: guard.refresh_token.clone(),
        })
    }

    pub async fn access_token(&self) -> Option<String> {
        self.inner.lock().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.inner.lock().await.refresh_token.clone()
    }

    pub async fn set(&self, access: &str, refresh: Option<&str>) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.access_token = Some(access.to_string());
        if let Some(refresh) = refresh {
            guard.refresh_token = Some(refresh.to_string());
        }
        self.persist(&guard)?;
        tracing::info!("session stored");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;
        *guard = SessionFile::default();
        self.persist(&guard)?;
        tracing::info!("session cleared");
        Ok(())
    }

    fn persist(&self, file: &SessionFile) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        write_session_file(path, file)
    }
}

fn write_session_file(path: &Path, file: &SessionFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let payload = serde_json::to_string_pretty(file)?;
    fs::write(path, payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::load(dir.path().join("session.json")).unwrap();
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn set_persists_under_literal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.json");
        let store = SessionStore::load(&path).unwrap();
        store.set("acc", Some("ref")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "acc");
        assert_eq!(raw["refreshToken"], "ref");

        let reopened = SessionStore::load(&path).unwrap();
        assert_eq!(
            reopened.get().await,
            Some(Session {
                access: "acc".to_string(),
                refresh: Some("ref".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn clear_drops_both_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::load(&path).unwrap();
        store.set("acc", Some("ref")).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.get().await, None);
        assert_eq!(store.refresh_token().await, None);
        let reopened = SessionStore::load(&path).unwrap();
        assert_eq!(reopened.get().await, None);
    }

    #[tokio::test]
    async fn handles_share_state() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set("acc", None).await.unwrap();
        assert_eq!(other.access_token().await.as_deref(), Some("acc"));
    }

    #[tokio::test]
    async fn corrupt_file_starts_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::load(&path).unwrap();
        assert_eq!(store.get().await, None);
    }
}

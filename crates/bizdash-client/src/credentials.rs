//! Process-wide bearer credential
//!
//! The store is a cheap cloneable handle; every request-issuing component is
//! handed one explicitly and reads the token at call time, so a sign-in or
//! sign-out is visible to the very next request and guard check.

use bizdash_core::Result;
use parking_lot::RwLock;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// Shared handle to the single stored credential token
#[derive(Clone, Default)]
pub struct CredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    /// Current token; blank tokens count as absent
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Whether a token is currently stored
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// Store a token, replacing any previous one
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let token = token.trim();
        *self.token.write() = if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        };
    }

    /// Forget the stored token
    pub fn clear(&self) {
        *self.token.write() = None;
    }

    /// Load the token persisted at `path`; a missing file leaves the store empty
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read.
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let store = Self::new();
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                store.set(contents);
                tracing::debug!(path = %path.display(), present = store.has_token(), "loaded credential");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no persisted credential");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(store)
    }

    /// Persist the current token to `path`, removing the file when signed out
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written or removed.
    pub async fn persist(&self, path: &Path) -> Result<()> {
        match self.token() {
            Some(token) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                write_private(path, &token).await?;
            }
            None => match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}

/// Write `token` readable by the owner only; an existing file is narrowed too
async fn write_private(path: &Path, token: &str) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .await?;
    }
    file.write_all(token.as_bytes()).await?;
    file.flush().await
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("token", &self.has_token().then_some("<redacted>"))
            .finish()
    }
}

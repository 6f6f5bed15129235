use std::path::{Path, PathBuf};
use async_trait::async_trait;
use parking_lot::RwLock;
use crate::error::{CoachError, ErrorKind};
use crate::state::coaching::UserCoachingState;

/// Whole-object persistence for one user's coaching state.
///
/// There are no partial writes: callers read, transform and replace.
/// Concurrent writers must be serialised by the caller.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current state, or the default state when nothing was stored yet
    async fn get(&self) -> Result<UserCoachingState, CoachError>;

    async fn replace(&self, state: &UserCoachingState) -> Result<(), CoachError>;
}

/// Pretty-printed JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn get(&self) -> Result<UserCoachingState, CoachError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                CoachError::new(
                    ErrorKind::Parse,
                    format!("Failed to parse coaching state: {}", e),
                    "store",
                )
                .with_context(format!("path: {:?}", self.path))
                .with_source("serde_json")
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "No stored coaching state, starting fresh");
                Ok(UserCoachingState::default())
            }
            Err(e) => Err(CoachError::new(
                ErrorKind::Io,
                format!("Failed to read coaching state: {}", e),
                "store",
            )
            .with_context(format!("path: {:?}", self.path))),
        }
    }

    async fn replace(&self, state: &UserCoachingState) -> Result<(), CoachError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    CoachError::new(
                        ErrorKind::Io,
                        format!("Failed to create directory: {}", e),
                        "store",
                    )
                    .with_context(format!("path: {:?}", parent))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(state).map_err(|e| {
            CoachError::new(
                ErrorKind::Parse,
                format!("Failed to serialize coaching state: {}", e),
                "store",
            )
        })?;

        // Write beside the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            CoachError::new(
                ErrorKind::Io,
                format!("Failed to write coaching state: {}", e),
                "store",
            )
            .with_context(format!("path: {:?}", tmp))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            CoachError::new(
                ErrorKind::Io,
                format!("Failed to move coaching state into place: {}", e),
                "store",
            )
            .with_context(format!("path: {:?}", self.path))
        })?;

        tracing::debug!(
            path = ?self.path,
            problems = state.solved_problems.len(),
            "Coaching state saved"
        );
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<UserCoachingState>,
}

impl MemoryStore {
    pub fn new(state: UserCoachingState) -> Self {
        MemoryStore {
            state: RwLock::new(state),
        }
    }

    pub fn snapshot(&self) -> UserCoachingState {
        self.state.read().clone()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self) -> Result<UserCoachingState, CoachError> {
        Ok(self.snapshot())
    }

    async fn replace(&self, state: &UserCoachingState) -> Result<(), CoachError> {
        *self.state.write() = state.clone();
        Ok(())
    }
}

//! The shared JSON document and its load/persist machinery.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use lumen_domain::error::{LumenError, StorageError};
use lumen_domain::group::Group;
use lumen_domain::id::{GroupId, LightId, ScheduleId};
use lumen_domain::light::Light;
use lumen_domain::schedule::Schedule;
use lumen_domain::settings::Settings;

/// The on-disk document. Unknown fields are dropped, missing ones default,
/// so the format tolerates version drift in both directions.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Document {
    pub lights: HashMap<LightId, Light>,
    pub groups: HashMap<GroupId, Group>,
    pub schedules: HashMap<ScheduleId, Schedule>,
    pub settings: Settings,
}

/// JSON-file-backed state store shared by the repository handles.
pub struct JsonStore {
    path: PathBuf,
    state: RwLock<Document>,
}

impl JsonStore {
    /// Load the document at `path`, or start empty when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Storage`] when the file exists but cannot be
    /// read or parsed, or its parent directory cannot be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Arc<Self>, LumenError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| storage_error("open", &err))?;
        }

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|err| storage_error("parse", &err))?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no state file yet, starting empty");
                Document::default()
            }
            Err(err) => return Err(storage_error("open", &err).into()),
        };

        Ok(Arc::new(Self {
            path,
            state: RwLock::new(document),
        }))
    }

    /// Run a read-only closure against the document.
    pub(crate) async fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        f(&*self.state.read().await)
    }

    /// Run a mutating closure against the document and persist the result.
    ///
    /// The write lock is held across the disk write, so concurrent
    /// mutations serialize and the file always reflects the latest state.
    pub(crate) async fn mutate<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Document) -> T,
    ) -> Result<T, LumenError> {
        let mut document = self.state.write().await;
        let out = f(&mut document);
        self.persist(&document, operation).await?;
        Ok(out)
    }

    async fn persist(&self, document: &Document, operation: &'static str) -> Result<(), LumenError> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|err| storage_error(operation, &err))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| storage_error(operation, &err))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| storage_error(operation, &err))?;
        Ok(())
    }
}

fn storage_error(operation: &'static str, err: &dyn std::fmt::Display) -> StorageError {
    StorageError {
        operation,
        message: err.to_string(),
    }
}

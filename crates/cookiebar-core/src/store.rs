//! Consent persistence
//!
//! The resolver and controller only ever touch storage through
//! [`ConsentStore`]. [`MemoryStore`] stands in for a browser document;
//! [`FileStore`] keeps a jar on disk so the CLI remembers choices between
//! runs.

use crate::cookie::Jar;
use crate::error::{Error, Result};
use crate::types::ConsentValue;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

pub trait ConsentStore: Send + Sync {
    /// Current consent record, if any.
    fn get(&self) -> Result<Option<ConsentValue>>;

    /// Persist `value`, replacing any existing record.
    fn set(&self, value: ConsentValue, remember_days: u32) -> Result<()>;

    /// Remove every cookie and local storage entry, the consent record included.
    fn clear(&self) -> Result<()>;

    /// Whether any cookie or local storage entry exists at all.
    fn has_any_data(&self) -> Result<bool>;
}

/// In-memory jar. Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    jar: Arc<Mutex<Jar>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn jar(&self) -> Result<MutexGuard<'_, Jar>> {
        self.jar
            .lock()
            .map_err(|_| Error::Store("cookie jar lock poisoned".into()))
    }

    /// Write a raw `document.cookie` assignment.
    pub fn write_cookie(&self, assignment: &str) -> Result<()> {
        self.jar()?.assign(assignment, Utc::now())
    }

    pub fn set_local_item(&self, key: &str, value: &str) -> Result<()> {
        self.jar()?.set_local_item(key, value);
        Ok(())
    }

    pub fn document_cookie(&self) -> Result<String> {
        Ok(self.jar()?.document_cookie(Utc::now()))
    }

    pub fn local_len(&self) -> Result<usize> {
        Ok(self.jar()?.local_len())
    }
}

impl ConsentStore for MemoryStore {
    fn get(&self) -> Result<Option<ConsentValue>> {
        Ok(self.jar()?.consent(Utc::now()))
    }

    fn set(&self, value: ConsentValue, remember_days: u32) -> Result<()> {
        self.jar()?.set_consent(value, remember_days, Utc::now())
    }

    fn clear(&self) -> Result<()> {
        self.jar()?.purge(Utc::now())
    }

    fn has_any_data(&self) -> Result<bool> {
        Ok(self.jar()?.has_any_data(Utc::now()))
    }
}

/// JSON jar on disk, re-read on every access.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Jar> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Jar::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, jar: &Jar) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(jar)?)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Jar) -> Result<()>) -> Result<()> {
        let mut jar = self.load()?;
        f(&mut jar)?;
        self.save(&jar)
    }
}

impl ConsentStore for FileStore {
    fn get(&self) -> Result<Option<ConsentValue>> {
        Ok(self.load()?.consent(Utc::now()))
    }

    fn set(&self, value: ConsentValue, remember_days: u32) -> Result<()> {
        self.update(|jar| jar.set_consent(value, remember_days, Utc::now()))
    }

    fn clear(&self) -> Result<()> {
        self.update(|jar| jar.purge(Utc::now()))
    }

    fn has_any_data(&self) -> Result<bool> {
        Ok(self.load()?.has_any_data(Utc::now()))
    }
}

// crates/regform-core/src/store/mod.rs

//! # Record Stores
//!
//! Where submitted registrations go. The form only ever talks to a
//! [`RecordStore`]; which backend sits behind it is decided by a
//! [`StoreConfig`] string such as `memory`, `file:users.json` or
//! `https://host/api/users`.

use crate::record::RegistrationRecord;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

mod file;
#[cfg(feature = "http")]
mod http;
mod memory;

pub use file::FileStore;
#[cfg(feature = "http")]
pub use http::HttpStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("no record with id '{0}'")]
    UnknownId(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid store configuration: {0}")]
    Config(String),
}

/// Persistence for registration records.
///
/// Ids are assigned by the store on [`create`](RecordStore::create) and are
/// opaque strings to everyone else.
pub trait RecordStore: Send + Sync {
    /// Persists a new record and returns its id. Any `id` on the input is
    /// ignored.
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError>;

    /// Replaces the record stored under `id`.
    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Every stored record, each with its `id` set.
    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError> {
        (**self).create(record)
    }

    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError> {
        (**self).update(id, record)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id)
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        (**self).list_all()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError> {
        (**self).create(record)
    }

    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError> {
        (**self).update(id, record)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id)
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        (**self).list_all()
    }
}

/// Which backend to open.
///
/// Parsed from `memory`, `file:<path>`, a bare path, or an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    File(PathBuf),
    Http(String),
}

impl StoreConfig {
    pub fn open(&self) -> Result<Box<dyn RecordStore>, StoreError> {
        match self {
            StoreConfig::Memory => Ok(Box::new(MemoryStore::new())),
            StoreConfig::File(path) => Ok(Box::new(FileStore::new(path))),
            #[cfg(feature = "http")]
            StoreConfig::Http(url) => Ok(Box::new(HttpStore::new(url)?)),
            #[cfg(not(feature = "http"))]
            StoreConfig::Http(url) => Err(StoreError::Config(format!(
                "{url}: REST store requested but 'http' disabled"
            ))),
        }
    }
}

impl FromStr for StoreConfig {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StoreError::Config("empty store location".into()));
        }
        if s.eq_ignore_ascii_case("memory") {
            return Ok(StoreConfig::Memory);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(StoreConfig::Http(s.trim_end_matches('/').to_owned()));
        }
        if let Some(path) = s.strip_prefix("file:") {
            if path.is_empty() {
                return Err(StoreError::Config("file: needs a path".into()));
            }
            return Ok(StoreConfig::File(PathBuf::from(path)));
        }
        // Anything with a scheme we don't know is a typo, not a file name.
        if let Some((scheme, _)) = s.split_once("://") {
            return Err(StoreError::Config(format!("unsupported scheme '{scheme}'")));
        }
        Ok(StoreConfig::File(PathBuf::from(s)))
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfig::Memory => f.write_str("memory"),
            StoreConfig::File(path) => write!(f, "file:{}", path.display()),
            StoreConfig::Http(url) => f.write_str(url),
        }
    }
}

// crates/regform-core/src/store/file.rs
use super::{RecordStore, StoreError};
use crate::record::RegistrationRecord;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A JSON array of records in one file.
///
/// Every operation reads the whole file, changes it, and writes it back via
/// a sibling temp file and a rename. A missing file is an empty store. Ids
/// are one past the largest numeric id present.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if file.metadata()?.len() == 0 {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn write(&self, records: &[RegistrationRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), records = records.len(), "record file written");
        Ok(())
    }

    fn with_records<T>(
        &self,
        f: impl FnOnce(&mut Vec<RegistrationRecord>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Unavailable("file store lock poisoned".into()))?;
        let mut records = self.read()?;
        let out = f(&mut records)?;
        self.write(&records)?;
        Ok(out)
    }
}

fn next_id(records: &[RegistrationRecord]) -> String {
    let max = records
        .iter()
        .filter_map(|r| r.id.as_deref()?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

fn position(records: &[RegistrationRecord], id: &str) -> Result<usize, StoreError> {
    records
        .iter()
        .position(|r| r.id.as_deref() == Some(id))
        .ok_or_else(|| StoreError::UnknownId(id.to_owned()))
}

impl RecordStore for FileStore {
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError> {
        self.with_records(|records| {
            let id = next_id(records);
            records.push(RegistrationRecord {
                id: Some(id.clone()),
                ..record.clone()
            });
            Ok(id)
        })
    }

    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError> {
        self.with_records(|records| {
            let at = position(records, id)?;
            records[at] = RegistrationRecord {
                id: Some(id.to_owned()),
                ..record.clone()
            };
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.with_records(|records| {
            let at = position(records, id)?;
            records.remove(at);
            Ok(())
        })
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Unavailable("file store lock poisoned".into()))?;
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("users.json"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn ids_continue_after_the_largest_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, r#"[{"fullName": "Old", "id": "41"}, {"fullName": "Odd", "id": "x"}]"#)
            .unwrap();

        let store = FileStore::new(&path);
        let id = store.create(&RegistrationRecord::default()).unwrap();
        assert_eq!(id, "42");
        assert_eq!(store.list_all().unwrap().len(), 3);
    }

    #[test]
    fn unknown_id_leaves_the_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");
        let store = FileStore::new(&path);
        store.create(&RegistrationRecord::default()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        assert!(matches!(store.delete("7"), Err(StoreError::UnknownId(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(FileStore::new(&path).list_all(), Err(StoreError::Json(_))));
    }
}

// crates/regform-core/src/store/memory.rs
use super::{RecordStore, StoreError};
use crate::record::RegistrationRecord;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<u64, RegistrationRecord>,
}

/// Process-local store. Ids are `1`, `2`, ... in creation order and are
/// never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

fn parse_id(id: &str) -> Result<u64, StoreError> {
    id.trim()
        .parse()
        .map_err(|_| StoreError::UnknownId(id.to_owned()))
}

impl RecordStore for MemoryStore {
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let key = inner.next_id;
        let id = key.to_string();
        inner.records.insert(
            key,
            RegistrationRecord {
                id: Some(id.clone()),
                ..record.clone()
            },
        );
        Ok(id)
    }

    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError> {
        let key = parse_id(id)?;
        let mut inner = self.lock()?;
        let slot = inner
            .records
            .get_mut(&key)
            .ok_or_else(|| StoreError::UnknownId(id.to_owned()))?;
        *slot = RegistrationRecord {
            id: Some(key.to_string()),
            ..record.clone()
        };
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let key = parse_id(id)?;
        self.lock()?
            .records
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StoreError::UnknownId(id.to_owned()))
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> RegistrationRecord {
        RegistrationRecord {
            full_name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let store = MemoryStore::new();
        assert_eq!(store.create(&named("a")).unwrap(), "1");
        assert_eq!(store.create(&named("b")).unwrap(), "2");
        store.delete("2").unwrap();
        assert_eq!(store.create(&named("c")).unwrap(), "3");

        let names: Vec<_> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| (r.id.unwrap(), r.full_name))
            .collect();
        assert_eq!(names, vec![("1".into(), "a".into()), ("3".into(), "c".into())]);
    }

    #[test]
    fn update_replaces_and_keeps_the_id() {
        let store = MemoryStore::new();
        let id = store.create(&named("a")).unwrap();
        let mut changed = named("renamed");
        changed.id = Some("999".into());
        store.update(&id, &changed).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].full_name, "renamed");
        assert_eq!(all[0].id.as_deref(), Some("1"));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let store = MemoryStore::new();
        assert!(matches!(store.update("4", &named("x")), Err(StoreError::UnknownId(_))));
        assert!(matches!(store.delete("abc"), Err(StoreError::UnknownId(_))));
        assert!(store.is_empty());
    }
}

// crates/regform-core/tests/submission.rs
mod common;

use regform_core::{
    FieldChange, FileStore, FormError, FormSession, MemoryStore, RecordStore, RegistrationRecord,
    SaveAction, StoreConfig, StoreError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Barrier, Mutex};
use std::thread;

/// Blocks inside `create` until the test lets it go.
struct GatedStore {
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
    inner: MemoryStore,
}

impl RecordStore for GatedStore {
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        self.inner.create(record)
    }

    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError> {
        self.inner.update(id, record)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.inner.delete(id)
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        self.inner.list_all()
    }
}

/// Counts the records it is asked to create.
#[derive(Default)]
struct CountingStore {
    creates: AtomicUsize,
    inner: MemoryStore,
}

impl RecordStore for CountingStore {
    fn create(&self, record: &RegistrationRecord) -> Result<String, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(record)
    }

    fn update(&self, id: &str, record: &RegistrationRecord) -> Result<(), StoreError> {
        self.inner.update(id, record)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.inner.delete(id)
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        self.inner.list_all()
    }
}

/// Fails every write.
struct DownStore;

impl RecordStore for DownStore {
    fn create(&self, _: &RegistrationRecord) -> Result<String, StoreError> {
        Err(StoreError::Status(503))
    }

    fn update(&self, _: &str, _: &RegistrationRecord) -> Result<(), StoreError> {
        Err(StoreError::Status(503))
    }

    fn delete(&self, _: &str) -> Result<(), StoreError> {
        Err(StoreError::Status(503))
    }

    fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        Err(StoreError::Status(503))
    }
}

#[test]
fn second_submit_while_in_flight_is_rejected() {
    let tree = common::tree();
    let session = FormSession::with_record(&tree, common::complete_record(), common::reference_day());

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let store = GatedStore {
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
        inner: MemoryStore::new(),
    };

    thread::scope(|s| {
        let first = s.spawn(|| session.submit(&store));

        entered_rx.recv().unwrap();
        assert!(matches!(session.submit(&store), Err(FormError::InFlight)));
        release_tx.send(()).unwrap();

        let saved = first.join().unwrap().unwrap();
        assert_eq!(saved.action, SaveAction::Created);
    });

    assert_eq!(store.inner.len(), 1);
    assert!(session.is_submitted());
}

#[test]
fn racing_submits_save_exactly_once() {
    const THREADS: usize = 4;
    let tree = common::tree();

    for _ in 0..1000 {
        let session =
            FormSession::with_record(&tree, common::complete_record(), common::reference_day());
        let store = CountingStore::default();
        let barrier = Barrier::new(THREADS);

        let outcomes: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        session.submit(&store)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(store.creates.load(Ordering::SeqCst), 1);
        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .filter_map(|o| o.as_ref().err())
            .all(|e| matches!(e, FormError::InFlight | FormError::Submitted)));
        assert!(session.is_submitted());
    }
}

#[test]
fn failed_save_keeps_the_record_and_allows_retry() {
    let tree = common::tree();
    let session = FormSession::with_record(&tree, common::complete_record(), common::reference_day());
    let before = session.record().clone();

    let err = session.submit(&DownStore).unwrap_err();
    assert!(matches!(err, FormError::Persistence(StoreError::Status(503))));
    assert_eq!(err.to_string(), "Failed to save data. Please try again.");
    assert_eq!(session.record(), &before);
    assert!(!session.is_submitted());

    let saved = session.submit(&MemoryStore::new()).unwrap();
    assert_eq!(saved.id, "1");
}

#[test]
fn file_store_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let tree = common::tree();

    let id = {
        let store = FileStore::new(&path);
        let session =
            FormSession::with_record(&tree, common::complete_record(), common::reference_day());
        session.submit(&store).unwrap().id
    };

    let store = FileStore::new(&path);
    let stored = store.list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.as_deref(), Some(id.as_str()));
    assert_eq!(stored[0].postal_code, "600001");

    // Edit hand-off: the stored record seeds a session that updates in place.
    let mut edit = FormSession::with_record(&tree, stored[0].clone(), common::reference_day());
    edit.apply(FieldChange::State("Kerala".into())).unwrap();
    edit.apply(FieldChange::City("Kochi".into())).unwrap();
    let saved = edit.submit(&store).unwrap();
    assert_eq!(saved.action, SaveAction::Updated);

    let reopened = FileStore::new(&path).list_all().unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened[0].city, "Kochi");
    assert_eq!(reopened[0].postal_code, "682001");
}

#[test]
fn store_config_opens_working_stores() {
    let dir = tempfile::tempdir().unwrap();
    let location = format!("file:{}", dir.path().join("users.json").display());

    for config in [StoreConfig::Memory, location.parse().unwrap()] {
        let store = config.open().unwrap();
        let id = store.create(&common::complete_record()).unwrap();
        store.delete(&id).unwrap();
        assert!(store.list_all().unwrap().is_empty(), "{config}");
    }
}

#[test]
fn stored_json_uses_the_endpoint_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    FileStore::new(&path).create(&common::complete_record()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &raw[0];
    assert_eq!(first["fullName"], "Asha Rao");
    assert_eq!(first["dob"], "2000-06-15");
    assert_eq!(first["pincode"], "600001");
    assert_eq!(first["id"], "1");
}

//! Error handling example for regform-rs
//!
//! This example demonstrates the failure paths: lookup misses, validation
//! errors, a store that is down, and a session that is already finished.

use regform_rs::prelude::*;
use regform_rs::MemoryStore;

struct OfflineStore;

impl RecordStore for OfflineStore {
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== regform-rs Error Handling Example ===\n");

    // Example 1: Loading a dataset that is not there
    println!("--- Example 1: Missing dataset ---");
    match GeographyTree::load_from_path("does/not/exist.json") {
        Ok(_) => println!("unexpected: loaded"),
        Err(e) => println!("✗ {e}"),
    }
    println!();

    let tree = GeographyTree::load()?;
    let selector = Selector::new(tree);

    // Example 2: Misses are not errors
    println!("--- Example 2: Lookup misses ---");
    let picked = selector.select_country(RegistrationRecord::new(), "Atlantis");
    println!("Atlantis has {} states", picked.options.len());
    let picked = selector.select_state(
        selector.select_country(RegistrationRecord::new(), "Germany").record,
        "Kerala",
    );
    println!("Kerala in Germany has {} cities\n", picked.options.len());

    // Example 3: Validation
    println!("--- Example 3: Validation errors ---");
    let mut form = FormSession::new(tree);
    form.apply(FieldChange::FullName("Asha".into()))?;
    form.apply(FieldChange::Email("asha@".into()))?;
    match form.submit(&MemoryStore::new()) {
        Err(FormError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                println!("  {field}: {message}");
            }
        }
        other => println!("unexpected: {other:?}"),
    }
    println!();

    // Example 4: Persistence failure keeps the input
    println!("--- Example 4: Store is down ---");
    let record = RegistrationRecord {
        full_name: "Asha Rao".into(),
        email: "asha@example.com".into(),
        date_of_birth: "2000-06-15".into(),
        gender: Some(Gender::Female),
        address: "158, West street".into(),
        country: "India".into(),
        state: "Tamil Nadu".into(),
        city: "Chennai".into(),
        ..Default::default()
    };
    let form = FormSession::edit(tree, record);
    if let Err(e) = form.submit(&OfflineStore) {
        println!("✗ {e}");
        if let Some(source) = std::error::Error::source(&e) {
            println!("  caused by: {source}");
        }
    }
    println!("  record kept: {} ({})", form.record().full_name, form.phase());
    println!();

    // Example 5: A finished session stays finished
    println!("--- Example 5: Resubmission ---");
    let store = MemoryStore::new();
    let saved = form.submit(&store)?;
    println!("✓ saved as {}", saved.id);
    match form.submit(&store) {
        Err(e @ FormError::Submitted) => println!("✗ {e}"),
        other => println!("unexpected: {other:?}"),
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}

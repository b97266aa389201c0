//! Edit flow example for regform-rs
//!
//! A stored user is handed to a new form session, changed, and saved back
//! in place. Shows how a stale location is reconciled on the way in.

use regform_rs::prelude::*;
use regform_rs::FileStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== regform-rs Edit Flow Example ===\n");

    let tree = GeographyTree::load()?;
    let path = std::env::temp_dir().join("regform-edit-flow.json");
    let _ = std::fs::remove_file(&path);
    let store = FileStore::new(&path);

    // A record as some older client might have stored it: Bavaria is not a
    // state of India.
    let stale = RegistrationRecord {
        full_name: "Ravi Kumar".into(),
        email: "ravi@example.com".into(),
        date_of_birth: "1988-11-02".into(),
        gender: Some(Gender::Male),
        address: "4 Lake View".into(),
        country: "India".into(),
        state: "Bavaria".into(),
        city: "München".into(),
        postal_code: "80331".into(),
        ..Default::default()
    };
    let id = store.create(&stale)?;
    println!("Stored user {id} in {}", path.display());

    // Hand-off
    let stored = store
        .list_all()?
        .into_iter()
        .find(|u| u.id.as_deref() == Some(id.as_str()))
        .ok_or("stored user vanished")?;
    let mut form = FormSession::edit(tree, stored);
    let r = form.record();
    println!(
        "Reconciled: country={:?} state={:?} city={:?} pincode={:?}",
        r.country, r.state, r.city, r.postal_code
    );
    println!("Errors now: {}", form.validate());

    // Fix it up
    form.apply(FieldChange::State("Kerala".into()))?;
    form.apply(FieldChange::City("Kochi".into()))?;
    println!("Phase: {}", form.phase());

    let saved = form.submit(&store)?;
    println!("{} id={}", saved.action.message(), saved.id);

    for user in store.list_all()? {
        println!(
            "  {} | {} | {} | {}",
            user.full_name,
            user.display_date_of_birth(),
            user.display_address(),
            user.postal_code
        );
    }

    std::fs::remove_file(&path)?;
    println!("\n=== Example completed successfully ===");
    Ok(())
}

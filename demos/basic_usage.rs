//! Basic usage example for regform-rs
//!
//! This example demonstrates how to:
//! - Load the embedded geography
//! - Walk the country → state → city cascade
//! - Derive an age from a birth date
//! - Validate and submit a form into an in-memory store

use regform_rs::prelude::*;
use regform_rs::MemoryStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== regform-rs Basic Usage Example ===\n");

    println!("Loading geography...");
    let tree = GeographyTree::load()?;
    let stats = tree.stats();
    println!(
        "✓ {} countries, {} states, {} cities\n",
        stats.countries, stats.states, stats.cities
    );

    // Example 1: The cascade, one level at a time
    println!("--- Example 1: Cascading selection ---");
    let selector = Selector::new(tree);
    let picked = selector.select_country(RegistrationRecord::new(), "India");
    println!("States of India: {}", picked.options.len());
    let picked = selector.select_state(picked.record, "Tamil Nadu");
    for city in picked.options {
        println!("  {} ({})", city.name(), city.postal_code());
    }
    let record = selector.select_city(picked.record, "Madurai");
    println!("Madurai → pincode {}\n", record.postal_code);

    // Example 2: Age follows the birth date
    println!("--- Example 2: Age derivation ---");
    let today = regform_rs::engine::today();
    for dob in ["2000-06-15", "1990-02-29", "not a date"] {
        println!("  {dob:>12} → {:?}", derive_age(dob, today));
    }
    println!();

    // Example 3: A whole session
    println!("--- Example 3: Form session ---");
    let mut form = FormSession::new(tree);
    println!("Phase: {}", form.phase());
    for change in [
        FieldChange::FullName("Asha Rao".into()),
        FieldChange::Email("asha@example.com".into()),
        FieldChange::DateOfBirth("2000-06-15".into()),
        FieldChange::Gender(Some(Gender::Female)),
        FieldChange::Address("158, West street".into()),
        FieldChange::Country("India".into()),
        FieldChange::State("Tamil Nadu".into()),
        FieldChange::City("Chennai".into()),
    ] {
        form.apply(change)?;
    }
    println!("Phase: {}  (age {:?})", form.phase(), form.record().age);

    let store = MemoryStore::new();
    let saved = form.submit(&store)?;
    println!("{} id={}", saved.action.message(), saved.id);
    println!("Phase: {}", form.phase());

    println!("\n=== Example completed successfully ===");
    Ok(())
}

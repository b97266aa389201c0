//! regform: command-line front-end for regform-core
//!
//! Browse the geography the registration form cascades over, and run the
//! form itself against a record store.
//!
//! Usage examples
//! --------------
//!
//! - Show dataset stats
//!   $ regform stats
//!
//! - Walk the cascade
//!   $ regform countries
//!   $ regform states india
//!   $ regform cities india "tamil nadu"
//!
//! - Search cities by substring
//!   $ regform search munch
//!
//! - Register, list, edit, delete
//!   $ regform register --full-name "Asha Rao" --email asha@example.com ...
//!   $ regform users
//!   $ regform edit 1 --city Madurai
//!   $ regform delete 1 --yes
//!
//! Logs go to stderr. `RUST_LOG` wins over `--log-level`.
mod args;

use crate::args::{CliArgs, Commands, FieldArgs};
use anyhow::{bail, Context};
use clap::Parser;
use regform_core::{
    Country, FieldChange, FormError, FormSession, GeographyTree, RecordStore, RegistrationRecord,
    State, StoreConfig,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    // Either the file given with --data, or the embedded dataset.
    let owned;
    let tree: &GeographyTree = match &args.data {
        Some(path) => {
            owned = GeographyTree::load_with_cache(path)
                .with_context(|| format!("loading geography from {}", path.display()))?;
            &owned
        }
        None => embedded()?,
    };

    match args.command {
        Commands::Stats => {
            let stats = tree.stats();
            println!("Geography statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  States: {}", stats.states);
            println!("  Cities: {}", stats.cities);
        }

        Commands::Countries => {
            for c in tree.countries() {
                println!("{} ({} states)", c.name(), c.states().len());
            }
        }

        Commands::States { country } => {
            let c = find_country(tree, &country)?;
            println!("States in {}:", c.name());
            for s in c.states() {
                println!("- {}", s.name());
            }
        }

        Commands::Cities { country, state } => {
            let c = find_country(tree, &country)?;
            let s = find_state(tree, c, &state)?;
            println!("Cities in {}, {}:", s.name(), c.name());
            for city in s.cities() {
                println!("- {} ({})", city.name(), city.postal_code());
            }
        }

        Commands::Search { query } => {
            let matches = tree.find_cities_by_substring(&query);
            if matches.is_empty() {
                println!("No cities found matching: {query}");
            } else {
                for (city, state, country) in matches {
                    println!(
                        "{} ({}) — {}, {}",
                        city.name(),
                        city.postal_code(),
                        state.name(),
                        country.name()
                    );
                }
            }
        }

        Commands::Register { fields } => {
            let store = open_store(&args.store)?;
            let mut session = FormSession::new(tree);
            apply_fields(&mut session, tree, fields)?;
            submit(&session, store.as_ref())?;
        }

        Commands::Users => {
            let store = open_store(&args.store)?;
            let users = store.list_all().context("Failed to fetch users")?;
            print_users(&users);
        }

        Commands::Edit { id, fields } => {
            let store = open_store(&args.store)?;
            let stored = find_user(store.as_ref(), &id)?;
            let mut session = FormSession::edit(tree, stored);
            apply_fields(&mut session, tree, fields)?;
            submit(&session, store.as_ref())?;
        }

        Commands::Delete { id, yes } => {
            let store = open_store(&args.store)?;
            let user = find_user(store.as_ref(), &id)?;
            if !yes && !confirm(&format!("Are you sure you want to delete {}?", user.full_name))? {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete(&id).context("Failed to delete user")?;
            println!("Deleted {}.", user.full_name);
        }
    }

    Ok(())
}

#[cfg(feature = "json")]
fn embedded() -> anyhow::Result<&'static GeographyTree> {
    Ok(GeographyTree::load()?)
}

#[cfg(not(feature = "json"))]
fn embedded() -> anyhow::Result<&'static GeographyTree> {
    bail!("built without the 'json' feature: pass --data <file.bin>")
}

fn find_country<'t>(tree: &'t GeographyTree, query: &str) -> anyhow::Result<&'t Country> {
    tree.resolve_country(query)
        .with_context(|| format!("Country {query} not found"))
}

fn find_state<'t>(
    tree: &'t GeographyTree,
    country: &'t Country,
    query: &str,
) -> anyhow::Result<&'t State> {
    tree.resolve_state(country, query)
        .with_context(|| format!("State {query} not found in {}", country.name()))
}

fn open_store(location: &str) -> anyhow::Result<Box<dyn RecordStore>> {
    let config: StoreConfig = location.parse().with_context(|| format!("--store {location}"))?;
    tracing::debug!(store = %config, "opening record store");
    Ok(config.open()?)
}

fn find_user(store: &dyn RecordStore, id: &str) -> anyhow::Result<RegistrationRecord> {
    store
        .list_all()
        .context("Failed to fetch users")?
        .into_iter()
        .find(|u| u.id.as_deref() == Some(id))
        .with_context(|| format!("No user with id {id}"))
}

/// Feeds the flags to the session as change events, personal details first
/// and then the location top-down. Location names are resolved loosely so
/// `--country india` selects "India".
fn apply_fields(
    session: &mut FormSession<'_>,
    tree: &GeographyTree,
    fields: FieldArgs,
) -> anyhow::Result<()> {
    let FieldArgs {
        full_name,
        email,
        age,
        dob,
        gender,
        address,
        country,
        state,
        city,
    } = fields;

    let personal = [
        full_name.map(FieldChange::FullName),
        email.map(FieldChange::Email),
        age.map(|a| FieldChange::Age(Some(a))),
        dob.map(FieldChange::DateOfBirth),
        gender.map(|g| FieldChange::Gender(Some(g))),
        address.map(FieldChange::Address),
    ];
    for change in personal.into_iter().flatten() {
        session.apply(change)?;
    }

    if let Some(country) = country {
        let name = tree
            .resolve_country(&country)
            .map(|c| c.name().to_owned())
            .unwrap_or(country);
        session.apply(FieldChange::Country(name))?;
    }

    if let Some(state) = state {
        let name = tree
            .resolve_country(&session.record().country)
            .and_then(|c| tree.resolve_state(c, &state))
            .map(|s| s.name().to_owned())
            .unwrap_or(state);
        session.apply(FieldChange::State(name))?;
    }

    if let Some(city) = city {
        let record = session.record();
        let name = tree
            .resolve_country(&record.country)
            .and_then(|c| tree.resolve_state(c, &record.state).map(|s| (c, s)))
            .and_then(|(c, s)| tree.resolve_city(c, s, &city))
            .map(|t| t.name().to_owned())
            .unwrap_or(city);
        session.apply(FieldChange::City(name))?;
    }

    Ok(())
}

fn submit(session: &FormSession<'_>, store: &dyn RecordStore) -> anyhow::Result<()> {
    match session.submit(store) {
        Ok(saved) => {
            println!("{} (id {})", saved.action.message(), saved.id);
            Ok(())
        }
        Err(FormError::Invalid(errors)) => {
            eprintln!("Please fill all fields.");
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
            bail!("{} field(s) need attention", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_users(users: &[RegistrationRecord]) {
    if users.is_empty() {
        println!("No users found.");
        return;
    }

    let header = [
        "S.No", "ID", "Full Name", "Email", "Age", "DOB", "Gender", "Address", "Pincode",
    ]
    .map(String::from);
    let rows: Vec<[String; 9]> = users
        .iter()
        .enumerate()
        .map(|(i, u)| {
            [
                (i + 1).to_string(),
                u.id.clone().unwrap_or_default(),
                u.full_name.clone(),
                u.email.clone(),
                u.age.map(|a| a.to_string()).unwrap_or_default(),
                u.display_date_of_birth(),
                u.gender.map(|g| g.to_string()).unwrap_or_default(),
                u.display_address(),
                u.postal_code.clone(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

// crates/regform-core/src/engine.rs

//! # Selection & Derivation Engine
//!
//! Keeps a [`RegistrationRecord`] consistent with a [`GeographyTree`].
//!
//! Every operation takes the record by value and hands it back, together
//! with the option lists a form needs to render the next level. Nothing is
//! stored in the [`Selector`] besides the borrowed tree.
//!
//! ```rust
//! use regform_core::{GeographyTree, RegistrationRecord, Selector};
//!
//! let tree = GeographyTree::load().unwrap();
//! let selector = Selector::new(tree);
//!
//! let picked = selector.select_country(RegistrationRecord::new(), "India");
//! assert!(!picked.options.is_empty());
//!
//! let picked = selector.select_state(picked.record, "Tamil Nadu");
//! let record = selector.select_city(picked.record, "Chennai");
//! assert_eq!(record.postal_code, "600001");
//! ```

use crate::geo::{City, Country, GeographyTree, State};
use crate::record::{Gender, RegistrationRecord};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Format of `date_of_birth`, as produced by an HTML date input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A record after a selection, plus the options for the level below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'g, T> {
    pub record: RegistrationRecord,
    pub options: &'g [T],
}

/// A record together with both dependent option lists.
///
/// `states` always lists the states of `record.country`, `cities` the cities
/// of `record.state`; either is empty when the level above is unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'g> {
    pub record: RegistrationRecord,
    pub states: &'g [State],
    pub cities: &'g [City],
}

/// One field-change event from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    FullName(String),
    Email(String),
    /// Manual age. Ignored whenever the birth date derives one.
    Age(Option<u32>),
    DateOfBirth(String),
    Gender(Option<Gender>),
    Address(String),
    Country(String),
    State(String),
    City(String),
}

#[derive(Debug, Clone, Copy)]
pub struct Selector<'g> {
    tree: &'g GeographyTree,
}

impl<'g> Selector<'g> {
    pub fn new(tree: &'g GeographyTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &'g GeographyTree {
        self.tree
    }

    /// Options for the top level.
    pub fn countries(&self) -> &'g [Country] {
        self.tree.countries()
    }

    /// Sets `country` and clears everything below it.
    ///
    /// Returns the country's states, or an empty list when the name is not in
    /// the tree.
    pub fn select_country(
        &self,
        mut record: RegistrationRecord,
        name: &str,
    ) -> Selection<'g, State> {
        record.country = name.to_owned();
        record.state.clear();
        record.city.clear();
        record.postal_code.clear();

        let options = self.tree.states_of(name);
        if options.is_empty() && !name.is_empty() {
            debug!(country = name, "country has no states in the tree");
        }
        Selection { record, options }
    }

    /// Sets `state` and clears `city` and `postal_code`.
    ///
    /// Returns the state's cities. The list is empty when no country is
    /// selected or the state does not belong to the selected country.
    pub fn select_state(&self, mut record: RegistrationRecord, name: &str) -> Selection<'g, City> {
        record.state = name.to_owned();
        record.city.clear();
        record.postal_code.clear();

        let options: &'g [City] = if record.country.is_empty() {
            &[]
        } else {
            self.tree.cities_of(&record.country, name)
        };
        if options.is_empty() && !name.is_empty() {
            debug!(country = %record.country, state = name, "state not found under country");
        }
        Selection { record, options }
    }

    /// Sets `city` and derives `postal_code` from the full triple.
    ///
    /// The code is empty when the triple does not resolve, including when no
    /// state is selected.
    pub fn select_city(&self, mut record: RegistrationRecord, name: &str) -> RegistrationRecord {
        record.city = name.to_owned();
        record.postal_code = self.postal_code_for(&record.country, &record.state, name);
        record
    }

    fn postal_code_for(&self, country: &str, state: &str, city: &str) -> String {
        if country.is_empty() || state.is_empty() {
            return String::new();
        }
        match self.tree.city(country, state, city) {
            Some(c) => c.postal_code().to_owned(),
            None => {
                if !city.is_empty() {
                    debug!(country, state, city, "city not found under state");
                }
                String::new()
            }
        }
    }

    /// Option lists matching the record as it stands.
    pub fn snapshot(&self, record: RegistrationRecord) -> Snapshot<'g> {
        let states = self.tree.states_of(&record.country);
        let cities: &'g [City] = if record.country.is_empty() {
            &[]
        } else {
            self.tree.cities_of(&record.country, &record.state)
        };
        Snapshot {
            record,
            states,
            cities,
        }
    }

    /// Bring an externally supplied record in line with the tree.
    ///
    /// Used for the edit hand-off. The deepest consistent prefix of
    /// `(country, state, city)` is kept, the first level that does not
    /// resolve is cleared together with everything below it, and
    /// `postal_code` is recomputed from what remains.
    pub fn reconcile(&self, mut record: RegistrationRecord) -> Snapshot<'g> {
        let country_ok = self.tree.country(&record.country).is_some();
        let state_ok = country_ok && self.tree.state(&record.country, &record.state).is_some();
        let city_ok = state_ok
            && self
                .tree
                .city(&record.country, &record.state, &record.city)
                .is_some();

        if !country_ok && !record.country.is_empty() {
            debug!(country = %record.country, "seeded country not in tree, clearing location");
            record.country.clear();
        }
        if !state_ok {
            record.state.clear();
        }
        if !city_ok {
            record.city.clear();
        }

        record.postal_code = self.postal_code_for(&record.country, &record.state, &record.city);
        self.snapshot(record)
    }

    /// Apply one change event and re-derive dependent fields.
    ///
    /// Location changes cascade through the `select_*` operations. After
    /// every change, a birth date that parses overrides `age`.
    pub fn apply(
        &self,
        record: RegistrationRecord,
        change: FieldChange,
        today: NaiveDate,
    ) -> Snapshot<'g> {
        let mut record = match change {
            FieldChange::Country(name) => self.select_country(record, &name).record,
            FieldChange::State(name) => self.select_state(record, &name).record,
            FieldChange::City(name) => self.select_city(record, &name),
            FieldChange::FullName(full_name) => RegistrationRecord { full_name, ..record },
            FieldChange::Email(email) => RegistrationRecord { email, ..record },
            FieldChange::Age(age) => RegistrationRecord { age, ..record },
            FieldChange::DateOfBirth(date_of_birth) => RegistrationRecord {
                date_of_birth,
                ..record
            },
            FieldChange::Gender(gender) => RegistrationRecord { gender, ..record },
            FieldChange::Address(address) => RegistrationRecord { address, ..record },
        };

        if let Some(age) = derive_age(&record.date_of_birth, today) {
            record.age = Some(age);
        }
        self.snapshot(record)
    }
}

/// Whole years between `date_of_birth` and `reference`.
///
/// One year is subtracted when the reference month/day comes before the
/// birth month/day. `None` for empty or unparsable input, and for birth
/// dates after the reference date.
///
/// ```rust
/// use chrono::NaiveDate;
/// use regform_core::derive_age;
///
/// let day_before = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(derive_age("2000-06-15", day_before), Some(23));
/// assert_eq!(derive_age("2000-06-15", birthday), Some(24));
/// assert_eq!(derive_age("15/06/2000", birthday), None);
/// ```
pub fn derive_age(date_of_birth: &str, reference: NaiveDate) -> Option<u32> {
    let dob = date_of_birth.trim();
    if dob.is_empty() {
        return None;
    }
    let birth = NaiveDate::parse_from_str(dob, DATE_FORMAT).ok()?;
    if birth > reference {
        return None;
    }

    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// The local calendar date, for callers that derive against "now".
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

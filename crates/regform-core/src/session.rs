// crates/regform-core/src/session.rs

//! # Form Session
//!
//! One pass through the registration form, from the first keystroke to a
//! saved record. A session owns the record being edited, the option lists
//! for the location cascade, and the submission guard.
//!
//! A session is terminal once a submission succeeds. Starting over means
//! starting a new session.

use crate::engine::{self, FieldChange, Selector, Snapshot};
use crate::geo::{City, Country, GeographyTree, State};
use crate::record::RegistrationRecord;
use crate::store::{RecordStore, StoreError};
use crate::validate::{self, ValidationErrors};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use thiserror::Error;
use tracing::{info, warn};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormPhase {
    /// Nothing entered yet.
    Empty,
    /// Some input, but validation still reports errors.
    PartiallyFilled,
    /// Would pass validation.
    Valid,
    /// Saved. No further edits are accepted.
    Submitted,
}

impl FormPhase {
    /// Phase of a record that has not been submitted.
    pub fn of(record: &RegistrationRecord) -> Self {
        if is_untouched(record) {
            FormPhase::Empty
        } else if validate::validate(record).is_empty() {
            FormPhase::Valid
        } else {
            FormPhase::PartiallyFilled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormPhase::Empty => "empty",
            FormPhase::PartiallyFilled => "partially-filled",
            FormPhase::Valid => "valid",
            FormPhase::Submitted => "submitted",
        }
    }
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_untouched(record: &RegistrationRecord) -> bool {
    RegistrationRecord {
        id: None,
        ..record.clone()
    } == RegistrationRecord::default()
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("form has errors: {0}")]
    Invalid(ValidationErrors),

    #[error("a submission is already in progress")]
    InFlight,

    #[error("form was already submitted")]
    Submitted,

    #[error("Failed to save data. Please try again.")]
    Persistence(#[source] StoreError),
}

impl FormError {
    /// The per-field messages, when this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            FormError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SaveAction {
    Created,
    Updated,
}

impl SaveAction {
    /// The confirmation a user sees after saving.
    pub fn message(self) -> &'static str {
        match self {
            SaveAction::Created => "Registration successful!",
            SaveAction::Updated => "User updated successfully!",
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Saved {
    pub id: String,
    pub action: SaveAction,
}

const IDLE: u8 = 0;
const IN_FLIGHT: u8 = 1;
const SUBMITTED: u8 = 2;

/// Returns an unfinished submission to `IDLE` however it ends. A submission
/// that reached `SUBMITTED` stays there.
struct InFlightGuard<'a>(&'a AtomicU8);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let _ = self
            .0
            .compare_exchange(IN_FLIGHT, IDLE, Ordering::AcqRel, Ordering::Acquire);
    }
}

/// A registration form being filled in.
///
/// Edits take `&mut self`; [`submit`](FormSession::submit) takes `&self`, so
/// a session shared between threads can be submitted concurrently and only
/// one submission runs at a time.
#[derive(Debug)]
pub struct FormSession<'g> {
    selector: Selector<'g>,
    snapshot: Snapshot<'g>,
    today: NaiveDate,
    state: AtomicU8,
}

impl<'g> FormSession<'g> {
    /// A blank form. Ages are derived against the local date.
    pub fn new(tree: &'g GeographyTree) -> Self {
        Self::with_record(tree, RegistrationRecord::new(), engine::today())
    }

    /// A form seeded from a stored record. Submitting it updates that record.
    ///
    /// The location is reconciled against `tree` first.
    pub fn edit(tree: &'g GeographyTree, record: RegistrationRecord) -> Self {
        Self::with_record(tree, record, engine::today())
    }

    /// Like [`edit`](FormSession::edit) with an explicit reference date.
    pub fn with_record(tree: &'g GeographyTree, record: RegistrationRecord, today: NaiveDate) -> Self {
        let selector = Selector::new(tree);
        let mut snapshot = selector.reconcile(record);
        if let Some(age) = engine::derive_age(&snapshot.record.date_of_birth, today) {
            snapshot.record.age = Some(age);
        }
        Self {
            selector,
            snapshot,
            today,
            state: AtomicU8::new(IDLE),
        }
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.snapshot.record
    }

    pub fn into_record(self) -> RegistrationRecord {
        self.snapshot.record
    }

    pub fn countries(&self) -> &'g [Country] {
        self.selector.countries()
    }

    pub fn states(&self) -> &'g [State] {
        self.snapshot.states
    }

    pub fn cities(&self) -> &'g [City] {
        self.snapshot.cities
    }

    /// `true` when the session was seeded with a stored record.
    pub fn is_edit(&self) -> bool {
        self.snapshot.record.id.is_some()
    }

    pub fn is_submitted(&self) -> bool {
        self.state.load(Ordering::Acquire) == SUBMITTED
    }

    pub fn phase(&self) -> FormPhase {
        if self.is_submitted() {
            FormPhase::Submitted
        } else {
            FormPhase::of(&self.snapshot.record)
        }
    }

    pub fn validate(&self) -> ValidationErrors {
        validate::validate(&self.snapshot.record)
    }

    /// Applies one field change and refreshes the option lists.
    pub fn apply(&mut self, change: FieldChange) -> Result<&Snapshot<'g>, FormError> {
        if self.is_submitted() {
            return Err(FormError::Submitted);
        }
        let record = std::mem::take(&mut self.snapshot.record);
        self.snapshot = self.selector.apply(record, change, self.today);
        Ok(&self.snapshot)
    }

    /// Validates, then saves through `store`.
    ///
    /// A new record is created; a record with an id is updated in place. On
    /// any failure the record is left exactly as it was so the user can fix
    /// it or retry.
    pub fn submit<S>(&self, store: &S) -> Result<Saved, FormError>
    where
        S: RecordStore + ?Sized,
    {
        if self.is_submitted() {
            warn!("submit on a form that was already saved");
            return Err(FormError::Submitted);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        // The claim decides between racing callers; the check above is only
        // the fast path.
        match self
            .state
            .compare_exchange(IDLE, IN_FLIGHT, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {}
            Err(SUBMITTED) => {
                warn!("submit on a form that was already saved");
                return Err(FormError::Submitted);
            }
            Err(_) => {
                warn!("submit while a submission is in flight");
                return Err(FormError::InFlight);
            }
        }
        let _guard = InFlightGuard(&self.state);

        let record = &self.snapshot.record;
        let saved = match record.id.as_deref() {
            Some(id) => store.update(id, record).map(|()| Saved {
                id: id.to_owned(),
                action: SaveAction::Updated,
            }),
            None => store.create(record).map(|id| Saved {
                id,
                action: SaveAction::Created,
            }),
        };

        match saved {
            Ok(saved) => {
                self.state.store(SUBMITTED, Ordering::Release);
                info!(id = %saved.id, action = ?saved.action, "registration saved");
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "registration not saved");
                Err(FormError::Persistence(e))
            }
        }
    }
}

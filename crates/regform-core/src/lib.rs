// crates/regform-core/src/lib.rs

//! # regform-core
//!
//! The engine behind a user registration form: a read-only
//! country → state → city → pincode tree, a record that is kept consistent
//! with it through cascading selection, birth-date → age derivation,
//! whole-record validation, and the stores that persist the result.
//!
//! ```rust
//! use regform_core::prelude::*;
//!
//! let tree = GeographyTree::load().unwrap();
//! let mut form = FormSession::new(tree);
//! form.apply(FieldChange::Country("India".into())).unwrap();
//! form.apply(FieldChange::State("Kerala".into())).unwrap();
//! form.apply(FieldChange::City("Kochi".into())).unwrap();
//! assert_eq!(form.record().postal_code, "682001");
//! assert_eq!(form.phase(), FormPhase::PartiallyFilled);
//! ```

pub mod engine;
pub mod error;
pub mod geo;
pub mod loader;
pub mod prelude;
pub mod record;
pub mod session;
pub mod store;
pub mod text;
pub mod traits;
pub mod validate;

pub use crate::engine::{derive_age, FieldChange, Selection, Selector, Snapshot, DATE_FORMAT};
pub use crate::error::{GeoError, Result};
pub use crate::geo::{City, CityContext, Country, DbStats, GeographyTree, State};
pub use crate::record::{Field, Gender, RegistrationRecord};
pub use crate::session::{FormError, FormPhase, FormSession, SaveAction, Saved};
#[cfg(feature = "http")]
pub use crate::store::HttpStore;
pub use crate::store::{FileStore, MemoryStore, RecordStore, StoreConfig, StoreError};
pub use crate::traits::NameMatch;
pub use crate::validate::{validate, ValidationErrors};

// crates/regform-core/src/prelude.rs

//! Everything a form front-end needs, in one import.

pub use crate::engine::{derive_age, FieldChange, Selector, Snapshot};
pub use crate::geo::{City, Country, GeographyTree, State};
pub use crate::record::{Field, Gender, RegistrationRecord};
pub use crate::session::{FormError, FormPhase, FormSession, SaveAction, Saved};
pub use crate::store::{RecordStore, StoreConfig, StoreError};
pub use crate::traits::NameMatch;
pub use crate::validate::{validate, ValidationErrors};

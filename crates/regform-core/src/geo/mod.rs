// crates/regform-core/src/geo/mod.rs

//! # Geography
//!
//! The static country → state → city tree and its lookups.

pub mod convert;
pub mod model;
pub mod raw;
pub mod search;

pub use model::{City, Country, GeographyTree, State};
pub use search::{CityContext, DbStats};

// crates/regform-core/src/loader/source_json.rs
#![cfg(feature = "json")]

use crate::error::{GeoError, Result};
use crate::geo::convert::from_raw;
use crate::geo::raw::CountriesRaw;
use crate::geo::GeographyTree;
use std::io::Read;

impl GeographyTree {
    /// Parse a tree from source JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: CountriesRaw = serde_json::from_str(json).map_err(GeoError::Json)?;
        from_raw(raw)
    }
}

pub(super) fn load_from_reader(reader: Box<dyn Read>) -> Result<GeographyTree> {
    let raw: CountriesRaw = serde_json::from_reader(reader).map_err(GeoError::Json)?;
    from_raw(raw)
}

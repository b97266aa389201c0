// crates/regform-core/src/geo/convert.rs
use super::model::{City, Country, GeographyTree, State};
use super::raw::CountriesRaw;
use crate::error::Result;

/// **Standard Converter:** Raw -> Tree.
///
/// Names are trimmed; pincodes are normalized to strings. Structural checks
/// happen in [`GeographyTree::new`].
pub fn from_raw(raw_countries: CountriesRaw) -> Result<GeographyTree> {
    let countries = raw_countries
        .into_iter()
        .map(|c_raw| Country {
            name: c_raw.country.trim().to_owned(),
            states: c_raw
                .states
                .into_iter()
                .map(|s_raw| State {
                    name: s_raw.state.trim().to_owned(),
                    cities: s_raw
                        .cities
                        .into_iter()
                        .map(|city_raw| City {
                            name: city_raw.name.trim().to_owned(),
                            postal_code: city_raw.pincode.into_code(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    GeographyTree::new(countries)
}

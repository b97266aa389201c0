// crates/regform-core/src/geo/raw.rs
use serde::{Deserialize, Serialize};

/// Raw city entry as it comes from the source JSON:
/// `{"name": "Chennai", "pincode": "600001"}`.
///
/// Some datasets store the pincode as a number, so both forms are accepted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CityRaw {
    pub name: String,
    #[serde(default, alias = "postalCode", alias = "postal_code")]
    pub pincode: PincodeRaw,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PincodeRaw {
    Text(String),
    Number(u64),
}

impl Default for PincodeRaw {
    fn default() -> Self {
        PincodeRaw::Text(String::new())
    }
}

impl PincodeRaw {
    pub fn into_code(self) -> String {
        match self {
            PincodeRaw::Text(s) => s.trim().to_owned(),
            PincodeRaw::Number(n) => n.to_string(),
        }
    }
}

/// Raw state entry: `{"state": "Tamil Nadu", "cities": [...]}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateRaw {
    #[serde(alias = "name")]
    pub state: String,
    #[serde(default)]
    pub cities: Vec<CityRaw>,
}

/// Raw country entry: `{"country": "India", "states": [...]}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CountryRaw {
    #[serde(alias = "name")]
    pub country: String,
    #[serde(default)]
    pub states: Vec<StateRaw>,
}

pub type CountriesRaw = Vec<CountryRaw>;

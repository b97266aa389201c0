// crates/regform-core/src/geo/model.rs
use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// # The Geography Tree
///
/// **Structure:** `GeographyTree` -> `Vec<Country>` -> `Vec<State>` -> `Vec<City>`
///
/// Order is preserved from the source so option lists come out exactly as the
/// dataset lists them. Name lookups go through [`NameIndex`], built once when
/// the tree is constructed; the tree is never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Country>", into = "Vec<Country>")]
pub struct GeographyTree {
    countries: Vec<Country>,
    index: NameIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub states: Vec<State>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub cities: Vec<City>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub postal_code: String,
}

/// Positions of every name, level by level.
///
/// `states[c]` indexes the states of country `c`, `cities[c][s]` the cities
/// of state `s` inside country `c`.
#[derive(Clone, Debug, Default)]
struct NameIndex {
    countries: HashMap<String, usize>,
    states: Vec<HashMap<String, usize>>,
    cities: Vec<Vec<HashMap<String, usize>>>,
}

impl NameIndex {
    fn build(countries: &[Country]) -> Result<Self> {
        let mut index = NameIndex::default();

        for (ci, country) in countries.iter().enumerate() {
            require_name("country", &country.name)?;
            if index.countries.insert(country.name.clone(), ci).is_some() {
                return Err(GeoError::InvalidData(format!(
                    "duplicate country '{}'",
                    country.name
                )));
            }

            let mut states = HashMap::with_capacity(country.states.len());
            let mut per_state = Vec::with_capacity(country.states.len());

            for (si, state) in country.states.iter().enumerate() {
                require_name("state", &state.name)?;
                if states.insert(state.name.clone(), si).is_some() {
                    return Err(GeoError::InvalidData(format!(
                        "duplicate state '{}' in {}",
                        state.name, country.name
                    )));
                }

                let mut cities = HashMap::with_capacity(state.cities.len());
                for (ti, city) in state.cities.iter().enumerate() {
                    require_name("city", &city.name)?;
                    if city.postal_code.trim().is_empty() {
                        return Err(GeoError::InvalidData(format!(
                            "city '{}' in {}/{} has no pincode",
                            city.name, country.name, state.name
                        )));
                    }
                    if cities.insert(city.name.clone(), ti).is_some() {
                        return Err(GeoError::InvalidData(format!(
                            "duplicate city '{}' in {}/{}",
                            city.name, country.name, state.name
                        )));
                    }
                }
                per_state.push(cities);
            }

            index.states.push(states);
            index.cities.push(per_state);
        }

        Ok(index)
    }
}

fn require_name(level: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GeoError::InvalidData(format!("blank {level} name")));
    }
    Ok(())
}

impl GeographyTree {
    /// Build a tree and its name index. Fails on blank or duplicate names.
    pub fn new(countries: Vec<Country>) -> Result<Self> {
        let index = NameIndex::build(&countries)?;
        Ok(Self { countries, index })
    }

    /// All countries, in source order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    fn country_pos(&self, country: &str) -> Option<usize> {
        self.index.countries.get(country).copied()
    }

    fn state_pos(&self, ci: usize, state: &str) -> Option<usize> {
        self.index.states[ci].get(state).copied()
    }

    pub fn country(&self, name: &str) -> Option<&Country> {
        self.country_pos(name).map(|ci| &self.countries[ci])
    }

    /// The state `state` of `country`, if both exist and the state belongs to it.
    pub fn state(&self, country: &str, state: &str) -> Option<&State> {
        let ci = self.country_pos(country)?;
        let si = self.state_pos(ci, state)?;
        Some(&self.countries[ci].states[si])
    }

    /// The city addressed by the full triple, if the whole lineage is consistent.
    pub fn city(&self, country: &str, state: &str, city: &str) -> Option<&City> {
        let ci = self.country_pos(country)?;
        let si = self.state_pos(ci, state)?;
        let ti = self.index.cities[ci][si].get(city).copied()?;
        Some(&self.countries[ci].states[si].cities[ti])
    }

    /// States of `country`; empty on a miss.
    pub fn states_of(&self, country: &str) -> &[State] {
        self.country(country).map(Country::states).unwrap_or(&[])
    }

    /// Cities of `state` inside `country`; empty on a miss at either level.
    pub fn cities_of(&self, country: &str, state: &str) -> &[City] {
        self.state(country, state).map(State::cities).unwrap_or(&[])
    }
}

impl TryFrom<Vec<Country>> for GeographyTree {
    type Error = GeoError;

    fn try_from(countries: Vec<Country>) -> Result<Self> {
        GeographyTree::new(countries)
    }
}

impl From<GeographyTree> for Vec<Country> {
    fn from(tree: GeographyTree) -> Self {
        tree.countries
    }
}

impl Country {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }
}

impl State {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }
}

impl City {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

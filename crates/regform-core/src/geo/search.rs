// crates/regform-core/src/geo/search.rs
use super::model::{City, Country, GeographyTree, State};
use crate::text::fold_key;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}

/// A grouping of a City with its parent State and Country.
pub type CityContext<'a> = (&'a City, &'a State, &'a Country);

impl GeographyTree {
    pub fn stats(&self) -> DbStats {
        let mut states = 0usize;
        let mut cities = 0usize;

        for country in self.countries() {
            states += country.states.len();
            for state in &country.states {
                cities += state.cities.len();
            }
        }

        DbStats {
            countries: self.countries().len(),
            states,
            cities,
        }
    }

    /// Iterate over all cities together with their state and country.
    pub fn iter_cities(&self) -> impl Iterator<Item = CityContext<'_>> {
        self.countries().iter().flat_map(|country| {
            country
                .states
                .iter()
                .flat_map(move |state| state.cities.iter().map(move |city| (city, state, country)))
        })
    }

    /// Find all cities whose folded name contains the folded query.
    ///
    /// Case-insensitive and accent-insensitive (`"sao"` finds `"São Paulo"`).
    /// An empty query returns nothing.
    pub fn find_cities_by_substring(&self, substr: &str) -> Vec<CityContext<'_>> {
        let q = fold_key(substr);
        if q.is_empty() {
            return Vec::new();
        }

        self.iter_cities()
            .filter(|(city, _, _)| fold_key(city.name()).contains(&q))
            .collect()
    }

    /// Resolve free-typed text to a country: exact name first, then folded.
    ///
    /// Callers outside a dropdown (the CLI, scripts) use this to turn
    /// `"india"` into the canonical `"India"` before selecting it.
    pub fn resolve_country(&self, q: &str) -> Option<&Country> {
        self.country(q)
            .or_else(|| self.countries().iter().find(|c| c.is_named(q)))
    }

    pub fn resolve_state<'a>(&'a self, country: &'a Country, q: &str) -> Option<&'a State> {
        self.state(country.name(), q)
            .or_else(|| country.states().iter().find(|s| s.is_named(q)))
    }

    pub fn resolve_city<'a>(&'a self, country: &Country, state: &'a State, q: &str) -> Option<&'a City> {
        self.city(country.name(), state.name(), q)
            .or_else(|| state.cities().iter().find(|c| c.is_named(q)))
    }
}

#[cfg(test)]
mod tests {
    use crate::geo::{City, Country, GeographyTree, State};

    fn tree() -> GeographyTree {
        GeographyTree::new(vec![Country {
            name: "Brazil".into(),
            states: vec![
                State {
                    name: "São Paulo".into(),
                    cities: vec![
                        City {
                            name: "São Paulo".into(),
                            postal_code: "01000-000".into(),
                        },
                        City {
                            name: "Campinas".into(),
                            postal_code: "13000-000".into(),
                        },
                    ],
                },
                State {
                    name: "Paraná".into(),
                    cities: vec![City {
                        name: "Curitiba".into(),
                        postal_code: "80000-000".into(),
                    }],
                },
            ],
        }])
        .unwrap()
    }

    #[test]
    fn stats_count_every_level() {
        let stats = tree().stats();
        assert_eq!((stats.countries, stats.states, stats.cities), (1, 2, 3));
    }

    #[test]
    fn substring_search_is_folded() {
        let t = tree();
        let hits = t.find_cities_by_substring("sao");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1.name(), "São Paulo");

        assert_eq!(t.find_cities_by_substring("CURIT").len(), 1);
        assert!(t.find_cities_by_substring("  ").is_empty());
    }

    #[test]
    fn resolves_loose_names_to_canonical() {
        let t = tree();
        let country = t.resolve_country("brazil").unwrap();
        let state = t.resolve_state(country, "sao paulo").unwrap();
        assert_eq!(state.name(), "São Paulo");
        let city = t.resolve_city(country, state, "CAMPINAS").unwrap();
        assert_eq!(city.postal_code(), "13000-000");
        assert!(t.resolve_country("Chile").is_none());
    }
}

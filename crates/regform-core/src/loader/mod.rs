// crates/regform-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to
//! specific parsers (Binary vs JSON). The geography tree is loaded once at
//! start-up and shared read-only afterwards.

use crate::error::Result;
use crate::geo::GeographyTree;
#[cfg(feature = "json")]
use once_cell::sync::OnceCell;
use std::path::Path;

mod binary;
pub mod common_io;
#[cfg(feature = "json")]
mod source_json;

pub use common_io::SourceKind;

/// The file extension used for the binary cache next to a JSON source.
#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "bin.gz";

/// The dataset compiled into the crate.
#[cfg(feature = "json")]
pub const EMBEDDED_DATASET: &str = include_str!("../../data/countries.json");

// Single in-process instance so the embedded data is parsed once per process.
#[cfg(feature = "json")]
static DEFAULT_TREE: OnceCell<GeographyTree> = OnceCell::new();

impl GeographyTree {
    /// The embedded dataset, parsed on first use and shared afterwards.
    #[cfg(feature = "json")]
    pub fn load() -> Result<&'static GeographyTree> {
        DEFAULT_TREE.get_or_try_init(|| {
            let tree = Self::from_json_str(EMBEDDED_DATASET)?;
            tracing::info!(countries = tree.country_count(), "embedded geography loaded");
            Ok(tree)
        })
    }

    /// **Standard Loader:** reads `.json`, `.json.gz`, `.bin` or `.bin.gz`.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kind = SourceKind::detect(path)?;
        let reader = common_io::open_stream(path, kind.is_gzip())?;

        let tree = match kind {
            SourceKind::Binary { .. } => binary::load_from_reader(reader)?,
            #[cfg(feature = "json")]
            SourceKind::Json { .. } => source_json::load_from_reader(reader)?,
            #[cfg(not(feature = "json"))]
            SourceKind::Json { .. } => {
                return Err(crate::error::GeoError::InvalidData(
                    "JSON source given but 'json' disabled".into(),
                ))
            }
        };

        let stats = tree.stats();
        tracing::info!(
            path = %path.display(),
            countries = stats.countries,
            states = stats.states,
            cities = stats.cities,
            "geography loaded"
        );
        Ok(tree)
    }

    /// **Smart Load:** uses the binary cache next to a JSON source when it is
    /// fresh, otherwise parses the source and refreshes the cache.
    ///
    /// Cache write failures are logged and ignored.
    pub fn load_with_cache(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let SourceKind::Binary { .. } = SourceKind::detect(path)? {
            return Self::load_from_path(path);
        }

        let cache_path = common_io::get_cache_path(path, CACHE_SUFFIX);
        if common_io::is_cache_fresh(path, &cache_path) {
            match Self::load_from_path(&cache_path) {
                Ok(tree) => return Ok(tree),
                Err(e) => tracing::warn!(error = %e, "stale or corrupt geography cache, rebuilding"),
            }
        }

        let tree = Self::load_from_path(path)?;
        if let Err(e) = tree.save_as(&cache_path) {
            tracing::warn!(error = %e, path = %cache_path.display(), "could not write geography cache");
        }
        Ok(tree)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::error::GeoError;

    #[test]
    fn embedded_dataset_loads_once() {
        let a = GeographyTree::load().unwrap();
        let b = GeographyTree::load().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.country("India").is_some());
    }

    #[test]
    fn cache_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("countries.json");
        std::fs::write(&source, EMBEDDED_DATASET).unwrap();

        let first = GeographyTree::load_with_cache(&source).unwrap();
        let cache = common_io::get_cache_path(&source, CACHE_SUFFIX);
        assert!(cache.exists());

        let second = GeographyTree::load_with_cache(&source).unwrap();
        assert_eq!(first.stats(), second.stats());
        assert_eq!(
            second.city("India", "Kerala", "Kochi").map(|c| c.postal_code()),
            Some("682001")
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = GeographyTree::load_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GeoError::NotFound(_)));
    }
}

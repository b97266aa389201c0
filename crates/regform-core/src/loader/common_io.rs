// crates/regform-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// What a dataset file holds, decided from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Source JSON in the `Countries.json` shape.
    Json { gzip: bool },
    /// A bincode cache written by [`crate::GeographyTree::save_as`].
    Binary { gzip: bool },
}

impl SourceKind {
    pub fn detect(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        let (stem, gzip) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (name.as_str(), false),
        };

        if stem.ends_with(".json") {
            Ok(SourceKind::Json { gzip })
        } else if stem.ends_with(".bin") {
            Ok(SourceKind::Binary { gzip })
        } else {
            Err(GeoError::InvalidData(format!(
                "unrecognized dataset file: {}",
                path.display()
            )))
        }
    }

    pub fn is_gzip(self) -> bool {
        match self {
            SourceKind::Json { gzip } | SourceKind::Binary { gzip } => gzip,
        }
    }
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when asked.
/// The caller doesn't care about the compression afterwards.
pub fn open_stream(path: &Path, gzip: bool) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if !gzip {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GeoError::InvalidData(
            "Gzip input but 'compact' disabled".into(),
        ))
    }
}

/// `countries.json` -> `countries.json.<suffix>`, next to the source.
pub fn get_cache_path(source: &Path, suffix: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_owned());
    source.with_file_name(format!("{filename}.{suffix}"))
}

/// A cache is fresh when it exists and is not older than its source.
pub fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        Err(_) => true,
    }
}

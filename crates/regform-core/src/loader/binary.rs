// crates/regform-core/src/loader/binary.rs
use crate::error::{GeoError, Result};
use super::common_io::SourceKind;
use crate::geo::GeographyTree;
use bincode::Options;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

/// Upper bound on a cache payload; the tree is tiny, anything bigger is junk.
const CACHE_LIMIT: u64 = 64 * 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(CACHE_LIMIT)
        .allow_trailing_bytes()
}

impl GeographyTree {
    /// Reconstructs the tree from the bincode cache format.
    ///
    /// The name index is rebuilt, so a cache with duplicate names is rejected
    /// exactly like a JSON source would be.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        options().deserialize(data).map_err(GeoError::Bincode)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        options().serialize(self).map_err(GeoError::Bincode)
    }

    /// Writes the bincode cache to `path`.
    ///
    /// The file name decides the encoding: `.bin` is plain, `.bin.gz` is
    /// gzipped (needs the `compact` feature).
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let gzip = match SourceKind::detect(path)? {
            SourceKind::Binary { gzip } => gzip,
            SourceKind::Json { .. } => {
                return Err(GeoError::InvalidData(format!(
                    "cache path must end in .bin or .bin.gz: {}",
                    path.display()
                )))
            }
        };

        let file = File::create(path).map_err(GeoError::Io)?;
        let writer = BufWriter::new(file);

        let mut encoder: Box<dyn Write> = if gzip {
            #[cfg(feature = "compact")]
            {
                Box::new(GzEncoder::new(writer, Compression::default()))
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(GeoError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        } else {
            Box::new(writer)
        };

        encoder.write_all(&self.to_bytes()?).map_err(GeoError::Io)?;
        encoder.flush().map_err(GeoError::Io)?;
        tracing::debug!(path = %path.display(), "geography cache written");
        Ok(())
    }
}

pub(super) fn load_from_reader(mut reader: Box<dyn Read>) -> Result<GeographyTree> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(GeoError::Io)?;
    GeographyTree::from_bytes(&data)
}

//! Country selection, dataset loading, and the process-lifetime cache.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::table::DataTable;

/// Countries with a bundled measurement file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Benin,
    SierraLeone,
    Togo,
}

impl Country {
    /// Selector order used by the frontends.
    pub const ALL: [Country; 3] = [Country::Benin, Country::SierraLeone, Country::Togo];

    /// Human-readable selector label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Benin => "Benin",
            Self::SierraLeone => "Sierra Leone",
            Self::Togo => "Togo",
        }
    }

    /// File name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Benin => "benin_clean.csv",
            Self::SierraLeone => "sierra_leone_clean.csv",
            Self::Togo => "togo_clean.csv",
        }
    }

    /// Resolves a selector label against the fixed country map.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownCountry`] for labels outside the map.
    pub fn from_label(label: &str) -> Result<Self, DataError> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .ok_or_else(|| DataError::UnknownCountry(label.to_string()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A loaded, immutable per-country table.
#[derive(Debug)]
pub struct CountryDataset {
    /// Country this table belongs to.
    pub country: Country,
    /// Resolved path of the source file.
    pub source_file: PathBuf,
    /// The parsed table, read-only after load.
    pub table: DataTable,
}

/// Load failure taxonomy.
#[derive(Debug)]
pub enum DataError {
    /// Selection outside the fixed country map.
    UnknownCountry(String),
    /// File missing or unreadable.
    Read {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error description.
        message: String,
    },
    /// File not parseable as delimited tabular data.
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Parser error description.
        message: String,
    },
    /// File parsed but contains no data rows.
    Empty {
        /// Path of the empty file.
        path: PathBuf,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCountry(label) => write!(
                f,
                "unknown country \"{label}\", available: Benin, Sierra Leone, Togo"
            ),
            Self::Read { path, message } => {
                write!(f, "cannot read \"{}\": {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "cannot parse \"{}\": {message}", path.display())
            }
            Self::Empty { path } => write!(f, "\"{}\" contains no data rows", path.display()),
        }
    }
}

/// Process-lifetime dataset cache keyed by resolved file name.
///
/// Owned by the application context rather than hidden in a global, so each
/// frontend (and each test) constructs its own instance. There is no eviction,
/// TTL, or size bound: the key space is the fixed three-country map.
#[derive(Debug)]
pub struct DatasetCache {
    data_dir: PathBuf,
    entries: HashMap<&'static str, Arc<CountryDataset>>,
    loads: usize,
}

impl DatasetCache {
    /// Creates an empty cache reading from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            entries: HashMap::new(),
            loads: 0,
        }
    }

    /// Directory the per-country files are read from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads the dataset for `country`, reading its file at most once.
    ///
    /// Repeated calls with the same country return the identical cached
    /// [`Arc`] without touching storage.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when the file is missing, unreadable, not
    /// parseable as delimited data, or has no data rows. A failure never
    /// evicts previously cached datasets.
    pub fn load(&mut self, country: Country) -> Result<Arc<CountryDataset>, DataError> {
        let key = country.file_name();
        if let Some(dataset) = self.entries.get(key) {
            return Ok(Arc::clone(dataset));
        }
        let path = self.data_dir.join(key);
        let dataset = Arc::new(load_file(country, &path)?);
        self.loads += 1;
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Resolves a selector label and loads its dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownCountry`] for unmapped labels, otherwise
    /// the same errors as [`DatasetCache::load`].
    pub fn load_label(&mut self, label: &str) -> Result<Arc<CountryDataset>, DataError> {
        self.load(Country::from_label(label)?)
    }

    /// Number of file reads performed so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Returns `true` when the country's dataset is already cached.
    pub fn is_cached(&self, country: Country) -> bool {
        self.entries.contains_key(country.file_name())
    }
}

/// Reads and parses one country file, promoting the timestamp column.
fn load_file(country: Country, path: &Path) -> Result<CountryDataset, DataError> {
    let file = File::open(path).map_err(|e| DataError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut table = DataTable::from_reader(file).map_err(|e| DataError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if table.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }
    table
        .promote_timestamp("Timestamp")
        .map_err(|message| DataError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
    Ok(CountryDataset {
        country,
        source_file: path.to_path_buf(),
        table,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::data::table::ColumnData;

    fn write_fixture(dir: &Path, country: Country, content: &str) {
        fs::write(dir.join(country.file_name()), content).expect("fixture write should succeed");
    }

    #[test]
    fn label_resolution_round_trips() {
        for country in Country::ALL {
            assert_eq!(Country::from_label(country.label()).ok(), Some(country));
        }
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = Country::from_label("Ghana");
        assert!(err.is_err());
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("Ghana"));
        assert!(msg.contains("available"));
    }

    #[test]
    fn load_caches_the_identical_dataset() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(dir.path(), Country::Benin, "GHI\n1.0\n2.0\n");

        let mut cache = DatasetCache::new(dir.path());
        let first = cache.load(Country::Benin).expect("first load");
        let second = cache.load(Country::Benin).expect("second load");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cache = DatasetCache::new(dir.path());
        let err = cache.load(Country::Togo);
        assert!(matches!(err, Err(DataError::Read { .. })));
        assert!(!cache.is_cached(Country::Togo));
        assert_eq!(cache.loads(), 0);
    }

    #[test]
    fn header_only_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(dir.path(), Country::Benin, "GHI,DNI\n");
        let mut cache = DatasetCache::new(dir.path());
        assert!(matches!(
            cache.load(Country::Benin),
            Err(DataError::Empty { .. })
        ));
    }

    #[test]
    fn timestamp_column_is_promoted_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(
            dir.path(),
            Country::Togo,
            "Timestamp,GHI\n2021-08-09 10:00:00,1.0\n",
        );
        let mut cache = DatasetCache::new(dir.path());
        let dataset = cache.load(Country::Togo).expect("load");
        assert!(
            dataset
                .table
                .column("Timestamp")
                .and_then(ColumnData::as_timestamps)
                .is_some()
        );
    }

    #[test]
    fn bad_timestamp_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(dir.path(), Country::Togo, "Timestamp,GHI\nbogus,1.0\n");
        let mut cache = DatasetCache::new(dir.path());
        assert!(matches!(
            cache.load(Country::Togo),
            Err(DataError::Parse { .. })
        ));
    }

    #[test]
    fn failure_does_not_evict_cached_datasets() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_fixture(dir.path(), Country::Benin, "GHI\n1.0\n");

        let mut cache = DatasetCache::new(dir.path());
        let benin = cache.load(Country::Benin).expect("benin load");

        // Togo has no file; its failure must leave Benin untouched.
        assert!(cache.load(Country::Togo).is_err());
        assert!(cache.is_cached(Country::Benin));
        let again = cache.load(Country::Benin).expect("benin reload");
        assert!(Arc::ptr_eq(&benin, &again));
        assert_eq!(cache.loads(), 1);
    }
}

//! Dataset loading, caching, and the tabular in-memory structure.

/// Country selection, dataset cache, and load errors.
pub mod loader;
/// Rows-by-named-columns table with per-column type inference.
pub mod table;

// Re-export the main types for convenience
pub use loader::Country;
pub use loader::CountryDataset;
pub use loader::DataError;
pub use loader::DatasetCache;
pub use table::ColumnData;
pub use table::DataTable;

//! Integration tests for the dataset loader and its cache.

mod common;

use std::sync::Arc;

use solar_dash::data::{ColumnData, Country, DataError, DatasetCache};

#[test]
fn every_country_loads_and_caches_by_identity() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_all_countries(dir.path());

    let mut cache = DatasetCache::new(dir.path());
    for country in Country::ALL {
        let first = cache.load(country).expect("first load");
        let second = cache.load(country).expect("second load");
        assert!(
            Arc::ptr_eq(&first, &second),
            "{country} should be cached by identity"
        );
    }
    assert_eq!(cache.loads(), 3, "one read per distinct country");
}

#[test]
fn togo_benin_togo_reads_exactly_two_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_all_countries(dir.path());

    let mut cache = DatasetCache::new(dir.path());
    cache.load(Country::Togo).expect("togo");
    cache.load(Country::Benin).expect("benin");
    cache.load(Country::Togo).expect("togo again");

    assert_eq!(cache.loads(), 2);
}

#[test]
fn load_label_resolves_the_fixed_map() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_all_countries(dir.path());

    let mut cache = DatasetCache::new(dir.path());
    let dataset = cache.load_label("Sierra Leone").expect("label load");
    assert_eq!(dataset.country, Country::SierraLeone);
    assert!(
        dataset
            .source_file
            .to_string_lossy()
            .ends_with("sierra_leone_clean.csv")
    );
}

#[test]
fn unmapped_label_fails_without_touching_storage() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_all_countries(dir.path());

    let mut cache = DatasetCache::new(dir.path());
    let err = cache.load_label("Nigeria");
    assert!(matches!(err, Err(DataError::UnknownCountry(_))));
    assert_eq!(cache.loads(), 0);
}

#[test]
fn loaded_table_keeps_inferred_types() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_all_countries(dir.path());

    let mut cache = DatasetCache::new(dir.path());
    let dataset = cache.load(Country::Benin).expect("load");
    let table = &dataset.table;

    assert_eq!(table.len(), 6);
    assert!(
        table
            .column("Timestamp")
            .and_then(ColumnData::as_timestamps)
            .is_some_and(|ts| ts.iter().all(Option::is_some))
    );
    for name in ["GHI", "DNI", "DHI", "Tamb", "RH", "ModA", "ModB", "Cleaning", "WS"] {
        assert!(
            table.numeric(name).is_some(),
            "column {name} should be numeric"
        );
    }
}

#[test]
fn one_country_failing_leaves_the_others_cached() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_country(dir.path(), Country::Benin, common::FULL_CSV);
    common::write_country(dir.path(), Country::Togo, common::FULL_CSV);

    let mut cache = DatasetCache::new(dir.path());
    let benin = cache.load(Country::Benin).expect("benin");
    let togo = cache.load(Country::Togo).expect("togo");

    // Sierra Leone has no file
    assert!(matches!(
        cache.load(Country::SierraLeone),
        Err(DataError::Read { .. })
    ));

    let benin_again = cache.load(Country::Benin).expect("benin again");
    let togo_again = cache.load(Country::Togo).expect("togo again");
    assert!(Arc::ptr_eq(&benin, &benin_again));
    assert!(Arc::ptr_eq(&togo, &togo_again));
    assert_eq!(cache.loads(), 2);
}

#[test]
fn corrupt_file_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_country(dir.path(), Country::Benin, "GHI,DNI\n1.0,2.0\n3.0\n");

    let mut cache = DatasetCache::new(dir.path());
    assert!(matches!(
        cache.load(Country::Benin),
        Err(DataError::Parse { .. })
    ));
    assert!(!cache.is_cached(Country::Benin));
}

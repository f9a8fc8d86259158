//! Shared CSV fixtures for integration tests.

use std::fs;
use std::path::Path;

use solar_dash::data::Country;

/// Full-schema fixture: every column the chart sections can bind.
pub const FULL_CSV: &str = "\
Timestamp,GHI,DNI,DHI,Tamb,RH,ModA,ModB,Cleaning,WS
2021-08-09 06:00:00,120.3,200.5,40.1,24.8,72.3,110.2,109.5,0,2.2
2021-08-09 08:00:00,310.7,420.9,85.6,27.1,66.0,198.4,196.2,0,2.9
2021-08-09 10:00:00,410.5,520.1,110.0,28.4,61.2,240.1,238.9,0,3.1
2021-08-09 12:00:00,480.2,555.6,130.9,30.0,55.4,260.3,258.1,1,3.4
2021-08-09 14:00:00,470.9,548.2,128.4,30.2,54.9,259.8,257.6,1,4.0
2021-08-09 16:00:00,320.4,430.0,90.2,29.5,58.1,205.7,203.3,1,3.7
";

/// Fixture without a timestamp column (time series must warn and skip).
pub const NO_TIMESTAMP_CSV: &str = "\
GHI,DNI,DHI,Tamb,RH,WS
410.5,520.1,110.0,28.4,61.2,3.1
455.0,540.8,120.3,29.1,58.7,2.8
480.2,555.6,130.9,30.0,55.4,3.4
";

/// Fixture without wind speed (no wind histogram request).
pub const NO_WS_CSV: &str = "\
Timestamp,GHI,DNI,DHI
2021-08-09 10:00:00,410.5,520.1,110.0
2021-08-09 11:00:00,455.0,540.8,120.3
";

/// Writes the same full-schema fixture for every country.
pub fn write_all_countries(dir: &Path) {
    for country in Country::ALL {
        write_country(dir, country, FULL_CSV);
    }
}

/// Writes one country's fixture file.
pub fn write_country(dir: &Path, country: Country, content: &str) {
    fs::write(dir.join(country.file_name()), content).expect("fixture write should succeed");
}

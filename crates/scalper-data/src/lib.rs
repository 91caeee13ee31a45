//! Bar series providers backed by local files.
//!
//! [`CsvBarSource`] stands in for the terminal's rate feed when running on
//! recorded data: each fetch re-reads the file and returns its trailing window,
//! so a file that another process appends to behaves like a live feed.

mod csv_source;

pub use csv_source::CsvBarSource;

//! Core utilities shared by the engine and the CLI
//!
//! - `numeric`: cell coercion (floats, ints, scores, flags, dates)
//! - `row`: the parsed-row type every reader consumes
//! - `source`: CSV loading
//! - `http`: league archive download
//! - `config`: user settings
//! - `cache`: report cache and file helpers

pub mod cache;
pub mod config;
pub mod http;
pub mod numeric;
pub mod row;
pub mod source;

// Re-export commonly used items for convenience
pub use cache::{source_hash, try_read_to_string, write_string, ReportCache, ReportCacheKey};
pub use config::{load_settings, settings_path, Settings};
pub use numeric::{parse_flag, parse_match_date, parse_score, try_float, try_int};
pub use row::{headers_of, Row};
pub use source::{base_key, load_csv, load_optional_csv, parse_csv_str, rows_for_fixture};

//! I/O module
//!
//! Handles reading split requests and writing breakdown reports.
//!
//! # Components
//!
//! - `request` - JSON request records and their conversion to domain types
//! - `csv_format` - CSV report output
//! - `json_format` - JSON report output

pub mod csv_format;
pub mod json_format;
pub mod request;

pub use csv_format::write_breakdown_csv;
pub use json_format::write_breakdown_json;
pub use request::{convert_request, parse_split_request, read_split_request, SplitRequest};

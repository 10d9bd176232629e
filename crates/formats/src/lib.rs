pub mod claims;
pub mod records;
pub mod series;

pub use claims::{ClaimRecord, parse_claims_json};
pub use records::{RecordError, Scalar};
pub use series::{SeriesFrame, SeriesOptions, parse_series_json, series_from_flat, split_frames};

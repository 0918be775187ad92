pub mod date;
pub mod error;
pub mod models;
pub mod store;

pub use date::extract_year;
pub use error::GridError;
pub use models::*;
pub use store::{GridStore, MAX_CELLS, NO_DATA_SENTINEL, SAMPLE_RECORDS};

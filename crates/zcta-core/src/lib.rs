pub mod config;
pub mod logging;

pub mod download;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod staging;

pub use error::{ErrorKind, FetchError};
pub use extract::ExtractReport;
pub use fetcher::{ensure_fetched, FetchOutcome, Fetcher};

pub mod classification;

pub use classification::{classify, FetchFailure, SasTokenError, Tier};

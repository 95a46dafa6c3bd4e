//! Result records for downstream storage.

mod record;

pub use record::*;

pub mod chips;
mod coerce;
pub mod direction;
pub mod entry;
pub mod error;
pub mod format;
pub mod ledger;
pub mod processor;
pub mod summary;
pub mod tips;
pub mod transaction;

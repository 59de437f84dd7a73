pub mod config;
pub mod entry;
pub mod error;

pub use config::AppConfig;
pub use entry::{EntryDraft, FieldError, LogEntry, ValidEntry};
pub use error::TravelogError;

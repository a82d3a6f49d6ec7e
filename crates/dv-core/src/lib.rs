//! Core title model for the Netflix analysis workspace
//! 
//! This crate provides the record types and the field parsers shared by
//! the loader, the cleaner and the views.

pub mod dates;
pub mod duration;
pub mod record;

// Re-export commonly used types
pub use dates::parse_date_added;
pub use duration::{extract_duration, DurationKind, ParsedDuration};
pub use record::{columns, ContentType, RawTitle, TitleRecord};

/// Placeholder written into free-text columns that carry no value
pub const UNKNOWN: &str = "Unknown";

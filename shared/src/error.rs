use thiserror::Error;

/// Reasons a schedule form cannot be submitted or changed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleFormError {
    #[error("Please add at least one schedule entry.")]
    NoEntries,
    #[error("You must have at least one schedule entry.")]
    LastEntry,
    #[error("Schedule entry not found: {0}")]
    EntryNotFound(uuid::Uuid),
    /// `index` is the 1-based position of the offending entry
    #[error("Schedule Entry {index}: End time must be after start time.")]
    EndNotAfterStart { index: usize },
}

/// Failure to read a clock time such as `"09:30"` or `"01:15 PM"`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeParseError {
    #[error("empty time string")]
    Empty,
    #[error("invalid time format: {0}")]
    InvalidFormat(String),
    #[error("time out of range: {0}")]
    OutOfRange(String),
    #[error("invalid time range: {0}")]
    InvalidRange(String),
}

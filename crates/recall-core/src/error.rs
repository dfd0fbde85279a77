//! Error types for recall input validation.

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Malformed or missing input, detected before any store access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A date was not a real calendar date in `YYYY-MM-DD` form.
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    /// A month was not in `YYYY-MM` form.
    #[error("invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),

    /// The score was not a finite number.
    #[error("score must be a finite number")]
    InvalidScore,

    /// A range had its lower bound after its upper bound.
    #[error("\"from\" must be before \"to\" (from={from}, to={to})")]
    InvertedRange {
        /// Lower bound as given.
        from: String,
        /// Upper bound as given.
        to: String,
    },

    /// A range covered more calendar months than a single view may read.
    #[error("range spans {months} months, at most {max} allowed")]
    RangeTooLong {
        /// Months the range touches.
        months: usize,
        /// Largest accepted count.
        max: usize,
    },

    /// A day count was outside the accepted window.
    #[error("days must be between 1 and {max}, got {got}")]
    InvalidDayCount {
        /// Requested count.
        got: u32,
        /// Largest accepted count.
        max: u32,
    },

    /// Email address did not pass the format check.
    #[error("Invalid email format")]
    InvalidEmail,

    /// Password shorter than the minimum length.
    #[error("Password must be at least {min} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },

    /// A required field was absent.
    #[error("{0} is required")]
    Missing(&'static str),
}

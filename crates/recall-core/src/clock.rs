//! Time source used to stamp records and resolve "today".

use chrono::{DateTime, Local, Utc};

use crate::PracticeDate;

/// Supplies the current instant and the current calendar date.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date.
    fn today(&self) -> PracticeDate;
}

/// Wall clock; "today" is the server's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> PracticeDate {
        PracticeDate::from_naive(Local::now().date_naive())
    }
}

/// A clock frozen at one instant. "Today" is that instant's UTC date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn today(&self) -> PracticeDate {
        PracticeDate::from_naive(self.0.date_naive())
    }
}

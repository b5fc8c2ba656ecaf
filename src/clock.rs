//! Date stamps printed in the corner of every note.

use chrono::{Local, NaiveDate};

/// Source of "today" for the print stamp.
pub trait Calendar {
    fn today(&self) -> NaiveDate;
}

/// The local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCalendar;

impl Calendar for LocalCalendar {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar(pub NaiveDate);

impl Calendar for FixedCalendar {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format a date the way it is printed: `YYYY.MM.DD`.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

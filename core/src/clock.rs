//! Simulation calendar: walks the configured date range one day at a time.

use crate::types::Day;
use chrono::{Datelike, Days};

#[derive(Debug, Clone, PartialEq)]
pub struct SimCalendar {
    pub start: Day,
    pub end:   Day,
    next:      Option<Day>,
}

impl SimCalendar {
    /// Inclusive range. An inverted range yields no days.
    pub fn new(start: Day, end: Day) -> Self {
        Self {
            start,
            end,
            next: (start <= end).then_some(start),
        }
    }
}

impl Iterator for SimCalendar {
    type Item = Day;

    fn next(&mut self) -> Option<Day> {
        let today = self.next?;
        self.next = today.checked_add_days(Days::new(1)).filter(|d| *d <= self.end);
        Some(today)
    }
}

/// `day` moved forward by `offset` days, if still in the same calendar month.
pub fn offset_within_month(day: Day, offset: u32) -> Option<Day> {
    let moved = day.checked_add_days(Days::new(offset as u64))?;
    (moved.month() == day.month() && moved.year() == day.year()).then_some(moved)
}

/// `YYYY/MM/DD` partition components for a day.
pub fn partition_parts(day: Day) -> [String; 3] {
    [
        format!("{:04}", day.year()),
        format!("{:02}", day.month()),
        format!("{:02}", day.day()),
    ]
}

use serde::{Deserialize, Serialize};

use crate::types::errors::DayWindowError;

/// Inclusive day-of-month range used to gate reminder matching.
///
/// The range wraps across the month boundary when `start > end`: a window of
/// `28..5` matches days 28 through 31 and 1 through 5, for any month length.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct DayWindow {
    start: u8,
    end: u8,
}

impl DayWindow {
    /// Builds a window, rejecting bounds outside `1..=31`.
    pub fn new(start: u8, end: u8) -> Result<Self, DayWindowError> {
        for day in [start, end] {
            if !(1..=31).contains(&day) {
                return Err(DayWindowError::DayOutOfRange(day));
            }
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    /// Whether the given day-of-month falls inside the window.
    pub fn contains(&self, day: u32) -> bool {
        let start = u32::from(self.start);
        let end = u32::from(self.end);

        if start > end {
            day >= start || day <= end
        } else {
            day >= start && day <= end
        }
    }
}

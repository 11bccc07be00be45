use chrono::{Month, Weekday};

use crate::error::{Error, Result};
use crate::navigation::MonthIndex;
use crate::weekstart::WeekStart;

const DEFAULT_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const DEFAULT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Display names of weekdays (Sunday first) and months (January first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    weekdays: Vec<String>,
    months: Vec<String>,
}

impl Names {
    /// Validates the tables. A weekday table of eight entries whose first entry
    /// is blank is accepted as a 1-indexed table and the blank is dropped.
    pub fn new(mut weekdays: Vec<String>, months: Vec<String>) -> Result<Self> {
        if weekdays.len() == 8 && weekdays[0].trim().is_empty() {
            weekdays.remove(0);
        }

        if weekdays.len() != 7 {
            return Err(Error::invalid_argument(&format!(
                "expected 7 weekday names, got {}",
                weekdays.len()
            )));
        }
        if months.len() != 12 {
            return Err(Error::invalid_argument(&format!(
                "expected 12 month names, got {}",
                months.len()
            )));
        }

        Ok(Names { weekdays, months })
    }

    pub fn weekday(&self, weekday: Weekday) -> &str {
        &self.weekdays[weekday.num_days_from_sunday() as usize]
    }

    pub fn month(&self, month: Month) -> &str {
        &self.months[month.number_from_month() as usize - 1]
    }

    /// Weekday names in column order.
    pub fn header(&self, week_start: WeekStart) -> Vec<&str> {
        week_start
            .weekdays()
            .iter()
            .map(|weekday| self.weekday(*weekday))
            .collect()
    }

    pub fn heading(&self, month: MonthIndex) -> String {
        format!("{} {}", self.month(month.month()), month.year())
    }
}

impl Default for Names {
    fn default() -> Self {
        Names {
            weekdays: DEFAULT_WEEKDAYS.iter().map(|s| s.to_string()).collect(),
            months: DEFAULT_MONTHS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

use chrono::Weekday;
use phf::phf_map;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::datemath::weekday_from_sunday;
use crate::error::{Error, Result};

/// Which weekday occupies the first column of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub enum WeekStart {
    Monday,
    Sunday,
}

static WEEK_START_NAMES: phf::Map<&'static str, WeekStart> = phf_map! {
    "monday" => WeekStart::Monday,
    "mon" => WeekStart::Monday,
    "eu" => WeekStart::Monday,
    "sunday" => WeekStart::Sunday,
    "sun" => WeekStart::Sunday,
    "en" => WeekStart::Sunday,
};

impl WeekStart {
    pub fn first_weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// Weekday number (0 = Sunday) shown in column 1.
    pub fn column_base(&self) -> u32 {
        self.first_weekday().num_days_from_sunday()
    }

    /// Weekday shown in the 1-indexed column `col`.
    pub fn column_weekday(&self, col: usize) -> Result<Weekday> {
        if !(1..=7).contains(&col) {
            return Err(Error::invalid_argument(&format!(
                "column {} is not in 1..=7",
                col
            )));
        }

        Ok(weekday_from_sunday(self.column_base() + col as u32 - 1))
    }

    /// 1-indexed column holding `weekday`.
    pub fn column_of(&self, weekday: Weekday) -> usize {
        ((weekday.num_days_from_sunday() + 7 - self.column_base()) % 7) as usize + 1
    }

    /// All weekdays in column order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let base = self.column_base();
        let mut days = [Weekday::Sun; 7];
        for (i, day) in days.iter_mut().enumerate() {
            *day = weekday_from_sunday(base + i as u32);
        }
        days
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::Sunday
    }
}

impl FromStr for WeekStart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        WEEK_START_NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| {
                Error::invalid_argument(&format!("week start '{}' not recognized", s))
            })
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Monday => write!(f, "monday"),
            WeekStart::Sunday => write!(f, "sunday"),
        }
    }
}

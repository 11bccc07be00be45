use chrono::prelude::*;
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use crate::datemath;
use crate::error::Result;

/// A (month, year) pair. Years are unbounded and wrap at the `i32` limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    /// Builds an index from a zero-based month (0 = January).
    pub fn from_month0(month0: u32, year: i32) -> Result<Self> {
        Ok(MonthIndex::new(datemath::month_from_index(month0)?, year))
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn month0(&self) -> u32 {
        self.index.number_from_month() - 1
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn num_days(&self) -> u32 {
        datemath::days_of_month(&self.index, self.year)
    }

    pub fn next(&self) -> Self {
        MonthIndex {
            index: self.index.succ(),
            year: if self.index == Month::December {
                self.year.wrapping_add(1)
            } else {
                self.year
            },
        }
    }

    pub fn prev(&self) -> Self {
        MonthIndex {
            index: self.index.pred(),
            year: if self.index == Month::January {
                self.year.wrapping_sub(1)
            } else {
                self.year
            },
        }
    }

    fn total_months(&self) -> i64 {
        self.year as i64 * 12 + self.month0() as i64
    }

    fn from_total_months(total: i64) -> Self {
        MonthIndex {
            // rem_euclid keeps this in 0..12, so the lookup cannot fail
            index: Month::from_i64(total.rem_euclid(12) + 1).unwrap_or(Month::January),
            year: total.div_euclid(12) as i32,
        }
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        Local::now().date_naive().into()
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(
            Month::from_u32(m.month()).unwrap_or(Month::January),
            m.year(),
        )
    }
}

impl Add<u32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: u32) -> Self::Output {
        MonthIndex::from_total_months(self.total_months() + rhs as i64)
    }
}

impl Sub<u32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: u32) -> Self::Output {
        MonthIndex::from_total_months(self.total_months() - rhs as i64)
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_months().cmp(&other.total_months())
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.index.number_from_month())
    }
}

/// The currently displayed month and its transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    current: MonthIndex,
}

impl Navigation {
    pub fn new(current: MonthIndex) -> Self {
        Navigation { current }
    }

    pub fn current(&self) -> MonthIndex {
        self.current
    }

    pub fn advance(&mut self) -> MonthIndex {
        self.current = self.current.next();
        log::debug!("current month: {}", self.current);
        self.current
    }

    pub fn retreat(&mut self) -> MonthIndex {
        self.current = self.current.prev();
        log::debug!("current month: {}", self.current);
        self.current
    }

    pub fn jump_to(&mut self, month: MonthIndex) -> MonthIndex {
        self.current = month;
        log::debug!("current month: {}", self.current);
        self.current
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Navigation::new(MonthIndex::default())
    }
}

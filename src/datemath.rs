//! Gregorian calendar arithmetic for whole days.
//!
//! Months are addressed by their zero-based index (0 = January) at the public
//! boundary and by [`chrono::Month`] internally. Weekdays are numbered starting
//! at Sunday (0 = Sunday .. 6 = Saturday).

use chrono::{Month, Weekday};
use num_traits::FromPrimitive;

use crate::error::{Error, Result};

const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Returns true if `year` is a leap year in the proleptic Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Converts a zero-based month index into a [`Month`].
pub fn month_from_index(month0: u32) -> Result<Month> {
    month0
        .checked_add(1)
        .and_then(Month::from_u32)
        .ok_or_else(|| Error::invalid_argument(&format!("month {} is not in 0..=11", month0)))
}

/// Number of days of the zero-based `month0` in `year`.
pub fn days_in_month(month0: u32, year: i32) -> Result<u32> {
    Ok(days_of_month(&month_from_index(month0)?, year))
}

/// Weekday of the first of the zero-based `month0` in `year`, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday(month0: u32, year: i32) -> Result<u32> {
    Ok(first_weekday_of(&month_from_index(month0)?, year).num_days_from_sunday())
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

pub fn first_weekday_of(month: &Month, year: i32) -> Weekday {
    // Sakamoto's method, evaluated in i64 with floor division so that it
    // stays total for every i32 year, including negative ones.
    const MONTH_OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

    let m = month.number_from_month() as usize;
    let y = if m < 3 {
        year as i64 - 1
    } else {
        year as i64
    };

    let dow = (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        + MONTH_OFFSETS[m - 1]
        + 1)
    .rem_euclid(7);

    weekday_from_sunday(dow as u32)
}

/// Maps 0 = Sunday .. 6 = Saturday onto [`Weekday`], wrapping modulo 7.
pub fn weekday_from_sunday(n: u32) -> Weekday {
    WEEKDAYS_FROM_SUNDAY[(n % 7) as usize]
}

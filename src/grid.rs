//! The fixed 6x7 month grid.
//!
//! Rows and columns are 1-indexed at the public boundary: row 1 is the week
//! containing the first of the month, column 1 is the week-start weekday.

use std::fmt;

use crate::datemath;
use crate::error::{Error, Result};
use crate::navigation::MonthIndex;
use crate::weekstart::WeekStart;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Day(u32),
}

impl Cell {
    pub fn day(&self) -> Option<u32> {
        match self {
            Cell::Day(n) => Some(*n),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Day(n) => write!(f, "{}", n),
            Cell::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    month: MonthIndex,
    week_start: WeekStart,
    cells: [[Cell; COLUMNS]; ROWS],
}

/// Computes the grid of the zero-based `month0` in `year`.
pub fn compute_grid(month0: u32, year: i32, week_start: WeekStart) -> Result<Grid> {
    Ok(Grid::for_month(
        MonthIndex::from_month0(month0, year)?,
        week_start,
    ))
}

impl Grid {
    pub fn for_month(month: MonthIndex, week_start: WeekStart) -> Self {
        let first = datemath::first_weekday_of(&month.month(), month.year()).num_days_from_sunday();
        let last = month.num_days();
        let offset = ((first + 7 - week_start.column_base()) % 7) as usize;

        let mut cells = [[Cell::Empty; COLUMNS]; ROWS];
        for (i, day) in (1..=last).enumerate() {
            let pos = offset + i;
            cells[pos / COLUMNS][pos % COLUMNS] = Cell::Day(day);
        }

        log::debug!(
            "grid for {} ({} first): first weekday {}, {} days, offset {}",
            month,
            week_start,
            first,
            last,
            offset
        );

        Grid {
            month,
            week_start,
            cells,
        }
    }

    pub fn month(&self) -> MonthIndex {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Cell at the 1-indexed (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        if !(1..=ROWS).contains(&row) || !(1..=COLUMNS).contains(&col) {
            return Err(Error::invalid_argument(&format!(
                "position ({}, {}) is outside the {}x{} grid",
                row, col, ROWS, COLUMNS
            )));
        }

        Ok(self.cells[row - 1][col - 1])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLUMNS]> {
        self.cells.iter()
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().filter_map(Cell::day)
    }

    /// 1-indexed (row, column) of `day`, if the month has it.
    pub fn position_of(&self, day: u32) -> Option<(usize, usize)> {
        self.iter()
            .position(|cell| cell.day() == Some(day))
            .map(|pos| (pos / COLUMNS + 1, pos % COLUMNS + 1))
    }

    /// Number of rows up to and including the last one holding a day.
    pub fn visible_rows(&self) -> usize {
        self.cells
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |idx| idx + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Cell::{Day, Empty};

    fn row(grid: &Grid, r: usize) -> Vec<Cell> {
        (1..=COLUMNS).map(|c| grid.cell(r, c).unwrap()).collect()
    }

    #[test]
    fn august_2023_sunday_start() {
        let grid = compute_grid(7, 2023, WeekStart::Sunday).unwrap();

        assert_eq!(
            row(&grid, 1),
            vec![Empty, Empty, Day(1), Day(2), Day(3), Day(4), Day(5)]
        );
        assert_eq!(grid.cell(5, 5).unwrap(), Day(31));
        assert_eq!(grid.position_of(31), Some((5, 5)));
        assert!(row(&grid, 6).iter().all(Cell::is_empty));
    }

    #[test]
    fn august_2023_monday_start() {
        let grid = compute_grid(7, 2023, WeekStart::Monday).unwrap();

        assert_eq!(
            row(&grid, 1),
            vec![Empty, Day(1), Day(2), Day(3), Day(4), Day(5), Day(6)]
        );
        assert_eq!(grid.position_of(7), Some((2, 1)));
        assert_eq!(grid.position_of(31), Some((5, 4)));
    }

    #[test]
    fn sunday_first_under_monday_start() {
        // October 2023 starts on a Sunday
        let grid = compute_grid(9, 2023, WeekStart::Monday).unwrap();
        assert_eq!(grid.position_of(1), Some((1, 7)));
        assert_eq!(grid.position_of(2), Some((2, 1)));
        assert_eq!(grid.position_of(31), Some((6, 2)));

        let grid = compute_grid(9, 2023, WeekStart::Sunday).unwrap();
        assert_eq!(grid.position_of(1), Some((1, 1)));
    }

    #[test]
    fn four_week_month_keeps_six_rows() {
        // February 2015 starts on a Sunday and has 28 days
        let grid = compute_grid(1, 2015, WeekStart::Sunday).unwrap();

        assert_eq!(grid.rows().count(), ROWS);
        assert_eq!(grid.cell(1, 1).unwrap(), Day(1));
        assert_eq!(grid.cell(4, 7).unwrap(), Day(28));
        assert_eq!(grid.visible_rows(), 4);
    }

    #[test]
    fn every_month_holds_each_day_once_in_order() {
        for year in (1..=9999).step_by(13).chain(1990..=2030) {
            for month0 in 0..12 {
                for ws in [WeekStart::Monday, WeekStart::Sunday].iter() {
                    let grid = compute_grid(month0, year, *ws).unwrap();
                    let days: Vec<u32> = grid.days().collect();
                    let last = datemath::days_in_month(month0, year).unwrap();

                    assert_eq!(days, (1..=last).collect::<Vec<_>>());
                }
            }
        }
    }

    #[test]
    fn day_columns_match_weekdays() {
        use chrono::{Datelike, NaiveDate};

        for month0 in 0..12 {
            for ws in [WeekStart::Monday, WeekStart::Sunday].iter() {
                let grid = compute_grid(month0, 2024, *ws).unwrap();
                for day in grid.days() {
                    let (_, col) = grid.position_of(day).unwrap();
                    let weekday = NaiveDate::from_ymd_opt(2024, month0 + 1, day)
                        .unwrap()
                        .weekday();
                    assert_eq!(ws.column_weekday(col).unwrap(), weekday);
                }
            }
        }
    }

    #[test]
    fn invalid_arguments() {
        assert!(compute_grid(12, 2023, WeekStart::Monday)
            .unwrap_err()
            .is_invalid_argument());

        let grid = compute_grid(0, 2023, WeekStart::Monday).unwrap();
        assert!(grid.cell(0, 1).is_err());
        assert!(grid.cell(7, 1).is_err());
        assert!(grid.cell(1, 8).is_err());
        assert_eq!(grid.position_of(0), None);
        assert_eq!(grid.position_of(32), None);
    }
}

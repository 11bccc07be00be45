use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use termion::{color, style};

use crate::calendar::Calendar;
use crate::grid::Cell;
use crate::names::Names;
use crate::navigation::MonthIndex;
use crate::weekstart::WeekStart;

/// Plain-text painter for the month on screen.
pub struct MonthView<'a> {
    names: &'a Names,
    today: Option<NaiveDate>,
    item_symbol: Option<char>,
    today_symbol: Option<char>,
    hide_empty_rows: bool,
    colored: bool,
}

impl<'a> MonthView<'a> {
    const CELL_WIDTH: usize = 5;

    pub fn new(names: &'a Names) -> Self {
        MonthView {
            names,
            today: None,
            item_symbol: Some('*'),
            today_symbol: Some('>'),
            hide_empty_rows: false,
            colored: false,
        }
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn item_symbol(mut self, symbol: char) -> Self {
        self.item_symbol = Some(symbol);
        self
    }

    pub fn no_item_symbol(mut self) -> Self {
        self.item_symbol = None;
        self
    }

    pub fn today_symbol(mut self, symbol: char) -> Self {
        self.today_symbol = Some(symbol);
        self
    }

    pub fn no_today_symbol(mut self) -> Self {
        self.today_symbol = None;
        self
    }

    pub fn hide_empty_rows(mut self, hide: bool) -> Self {
        self.hide_empty_rows = hide;
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn today_in(&self, month: MonthIndex) -> Option<u32> {
        self.today
            .filter(|today| MonthIndex::from(*today) == month)
            .map(|today| today.day())
    }

    fn header(&self, week_start: WeekStart) -> String {
        self.names
            .header(week_start)
            .iter()
            .map(|name| {
                let short: String = name.chars().take(Self::CELL_WIDTH - 2).collect();
                format!(" {:>3} ", short)
            })
            .join("")
    }

    fn cell(&self, cell: &Cell, today: Option<u32>, has_items: bool) -> String {
        let day = match cell {
            Cell::Day(day) => *day,
            Cell::Empty => return " ".repeat(Self::CELL_WIDTH),
        };

        let is_today = today == Some(day);
        let today_mark = self.today_symbol.filter(|_| is_today).unwrap_or(' ');
        let item_mark = self.item_symbol.filter(|_| has_items).unwrap_or(' ');
        let number = format!("{:>3}", day);

        if !self.colored {
            return format!("{}{}{}", today_mark, number, item_mark);
        }

        let number = if is_today {
            format!("{}{}{}", color::Fg(color::Yellow), number, color::Fg(color::Reset))
        } else {
            number
        };
        let number = if has_items {
            format!("{}{}{}", style::Bold, number, style::Reset)
        } else {
            number
        };

        format!("{}{}{}", today_mark, number, item_mark)
    }

    pub fn render<T>(&self, calendar: &Calendar<T>) -> String {
        let grid = calendar.grid();
        let today = self.today_in(grid.month());
        let rows = if self.hide_empty_rows {
            grid.visible_rows()
        } else {
            grid.rows().count()
        };

        let mut lines = vec![calendar.heading(self.names), self.header(grid.week_start())];

        lines.extend(grid.rows().take(rows).map(|row| {
            row.iter()
                .map(|cell| {
                    let has_items = cell
                        .day()
                        .map_or(false, |day| calendar.items().has_items(day));
                    self.cell(cell, today, has_items)
                })
                .join("")
        }));

        lines
            .iter()
            .map(|line| line.trim_end())
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn august_2023(week_start: WeekStart) -> Calendar<&'static str> {
        Calendar::new(MonthIndex::from_month0(7, 2023).unwrap(), week_start)
            .with_items(vec![(10, vec!["first task"]), (20, vec!["second task"])])
            .unwrap()
    }

    #[test]
    fn sunday_start() {
        let names = Names::default();
        let out = MonthView::new(&names).render(&august_2023(WeekStart::Sunday));
        let lines: Vec<&str> = out.split('\n').collect();

        assert_eq!(lines[0], "Aug 2023");
        assert_eq!(lines[1], " Sun  Mon  Tue  Wed  Thu  Fri  Sat");
        assert_eq!(lines[2], "             1    2    3    4    5");
        assert_eq!(lines[3], "   6    7    8    9   10*  11   12");
        assert_eq!(lines[6], "  27   28   29   30   31");
        assert_eq!(lines[7], "");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn monday_start_with_today() {
        let names = Names::default();
        let today = NaiveDate::from_ymd_opt(2023, 8, 6).unwrap();
        let out = MonthView::new(&names)
            .today(today)
            .render(&august_2023(WeekStart::Monday));
        let lines: Vec<&str> = out.split('\n').collect();

        assert_eq!(lines[1], " Mon  Tue  Wed  Thu  Fri  Sat  Sun");
        assert_eq!(lines[2], "        1    2    3    4    5 >  6");
    }

    #[test]
    fn today_outside_month_is_not_marked() {
        let names = Names::default();
        let today = NaiveDate::from_ymd_opt(2024, 8, 6).unwrap();
        let out = MonthView::new(&names)
            .today(today)
            .render(&august_2023(WeekStart::Monday));

        assert!(!out.contains('>'));
    }

    #[test]
    fn hidden_trailing_rows() {
        let names = Names::default();
        let cal: Calendar<()> =
            Calendar::new(MonthIndex::from_month0(1, 2015).unwrap(), WeekStart::Sunday);

        let out = MonthView::new(&names).hide_empty_rows(true).render(&cal);
        assert_eq!(out.split('\n').count(), 2 + 4);

        let out = MonthView::new(&names).render(&cal);
        assert_eq!(out.split('\n').count(), 2 + 6);
    }

    #[test]
    fn without_markers() {
        let names = Names::default();
        let out = MonthView::new(&names)
            .no_item_symbol()
            .render(&august_2023(WeekStart::Sunday));

        assert!(!out.contains('*'));
    }
}

//! The calendar engine: one instance per displayed calendar.
//!
//! A [`Calendar`] owns the navigation state, the per-day items and the grid of
//! the month on screen. Hosts hook into it through [`Handlers`]:
//!
//! * `on_day_click` receives every click on a day cell. Without it, the
//!   calendar's [`Notify`] implementation surfaces the click instead.
//! * `on_next_month` / `on_prev_month` are asked for the items of the month
//!   that has just been navigated to. Without them the current items stay.
//!
//! Navigation always updates the month first, then recomputes the grid, then
//! asks the supplier for the new items, so a host painting after any of the
//! navigation calls sees a consistent state.

use derive_more::{Constructor, Display};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::items::DayItems;
use crate::names::Names;
use crate::navigation::{MonthIndex, Navigation};
use crate::notification::{LogNotifier, Notify};
use crate::weekstart::WeekStart;

pub type ItemMapping<T> = BTreeMap<u32, Vec<T>>;
pub type DayClickHandler = Box<dyn FnMut(&DayClick)>;
pub type MonthChangeHandler<T> = Box<dyn FnMut(MonthIndex) -> ItemMapping<T>>;

/// A click on a day cell. `month` is 1-indexed (January = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor, Display)]
#[display(fmt = "{}.{}.{:04}", day, month, year)]
pub struct DayClick {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The cell holds no day.
    Ignored,
    /// The registered day-click handler was called.
    Handled(DayClick),
    /// No handler is registered, the notifier was used.
    Notified(DayClick),
}

pub struct Handlers<T> {
    on_day_click: Option<DayClickHandler>,
    on_next_month: Option<MonthChangeHandler<T>>,
    on_prev_month: Option<MonthChangeHandler<T>>,
}

impl<T> Handlers<T> {
    pub fn new() -> Self {
        Handlers {
            on_day_click: None,
            on_next_month: None,
            on_prev_month: None,
        }
    }

    pub fn on_day_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&DayClick) + 'static,
    {
        self.on_day_click = Some(Box::new(handler));
        self
    }

    pub fn on_next_month<F>(mut self, supplier: F) -> Self
    where
        F: FnMut(MonthIndex) -> ItemMapping<T> + 'static,
    {
        self.on_next_month = Some(Box::new(supplier));
        self
    }

    pub fn on_prev_month<F>(mut self, supplier: F) -> Self
    where
        F: FnMut(MonthIndex) -> ItemMapping<T> + 'static,
    {
        self.on_prev_month = Some(Box::new(supplier));
        self
    }
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Handlers::new()
    }
}

impl<T> fmt::Debug for Handlers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("on_day_click", &self.on_day_click.is_some())
            .field("on_next_month", &self.on_next_month.is_some())
            .field("on_prev_month", &self.on_prev_month.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

pub struct Calendar<T> {
    week_start: WeekStart,
    navigation: Navigation,
    items: DayItems<T>,
    grid: Grid,
    handlers: Handlers<T>,
    notifier: Box<dyn Notify>,
}

impl<T> Calendar<T> {
    pub fn new(month: MonthIndex, week_start: WeekStart) -> Self {
        Calendar {
            week_start,
            navigation: Navigation::new(month),
            items: DayItems::new(),
            grid: Grid::for_month(month, week_start),
            handlers: Handlers::new(),
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_handlers(mut self, handlers: Handlers<T>) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn with_notifier<N: Notify + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_boxed_notifier(mut self, notifier: Box<dyn Notify>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_items<I>(mut self, mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, Vec<T>)>,
    {
        self.items.replace(mapping)?;
        Ok(self)
    }

    pub fn set_on_day_click<F>(&mut self, handler: F)
    where
        F: FnMut(&DayClick) + 'static,
    {
        self.handlers.on_day_click = Some(Box::new(handler));
    }

    pub fn set_on_next_month<F>(&mut self, supplier: F)
    where
        F: FnMut(MonthIndex) -> ItemMapping<T> + 'static,
    {
        self.handlers.on_next_month = Some(Box::new(supplier));
    }

    pub fn set_on_prev_month<F>(&mut self, supplier: F)
    where
        F: FnMut(MonthIndex) -> ItemMapping<T> + 'static,
    {
        self.handlers.on_prev_month = Some(Box::new(supplier));
    }

    pub fn month(&self) -> MonthIndex {
        self.navigation.current()
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn items(&self) -> &DayItems<T> {
        &self.items
    }

    pub fn items_for(&self, day: u32) -> &[T] {
        self.items.items_for(day)
    }

    pub fn replace_items<I>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (u32, Vec<T>)>,
    {
        self.items.replace(mapping)
    }

    pub fn heading(&self, names: &Names) -> String {
        names.heading(self.month())
    }

    pub fn next_month(&mut self) -> Result<MonthIndex> {
        self.navigation.advance();
        self.refresh(Direction::Forward)
    }

    pub fn prev_month(&mut self) -> Result<MonthIndex> {
        self.navigation.retreat();
        self.refresh(Direction::Backward)
    }

    /// Jumps to `month`. The next-month supplier is asked for items when
    /// jumping forward, the previous-month supplier when jumping back.
    pub fn jump_to(&mut self, month: MonthIndex) -> Result<MonthIndex> {
        let current = self.month();
        if month == current {
            return Ok(current);
        }

        self.navigation.jump_to(month);
        self.refresh(if month > current {
            Direction::Forward
        } else {
            Direction::Backward
        })
    }

    pub fn today(&mut self) -> Result<MonthIndex> {
        self.jump_to(MonthIndex::default())
    }

    /// Resolves a click on the 1-indexed (`row`, `col`) cell.
    pub fn click(&mut self, row: usize, col: usize) -> Result<ClickOutcome> {
        let day = match self.grid.cell(row, col)? {
            Cell::Day(day) => day,
            Cell::Empty => return Ok(ClickOutcome::Ignored),
        };

        let month = self.month();
        let click = DayClick::new(day, month.month0() + 1, month.year());

        if let Some(handler) = self.handlers.on_day_click.as_mut() {
            handler(&click);
            Ok(ClickOutcome::Handled(click))
        } else {
            self.notifier.notify(&click);
            Ok(ClickOutcome::Notified(click))
        }
    }

    fn refresh(&mut self, direction: Direction) -> Result<MonthIndex> {
        let month = self.navigation.current();
        self.grid = Grid::for_month(month, self.week_start);

        let supplier = match direction {
            Direction::Forward => self.handlers.on_next_month.as_mut(),
            Direction::Backward => self.handlers.on_prev_month.as_mut(),
        };

        if let Some(supply) = supplier {
            if let Err(e) = self.items.replace(supply(month)) {
                // the old items belong to another month
                self.items.clear();
                return Err(e);
            }
        }

        Ok(month)
    }
}

impl<T: fmt::Debug> fmt::Debug for Calendar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("week_start", &self.week_start)
            .field("navigation", &self.navigation)
            .field("items", &self.items)
            .field("grid", &self.grid)
            .field("handlers", &self.handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingNotifier(Rc<RefCell<Vec<DayClick>>>);

    impl Notify for CountingNotifier {
        fn notify(&self, click: &DayClick) {
            self.0.borrow_mut().push(*click);
        }
    }

    fn august_2023(week_start: WeekStart) -> Calendar<&'static str> {
        Calendar::new(MonthIndex::from_month0(7, 2023).unwrap(), week_start)
    }

    #[test]
    fn click_reports_one_indexed_month() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut cal = august_2023(WeekStart::Sunday);
        cal.set_on_day_click(move |click| sink.borrow_mut().push(*click));

        let outcome = cal.click(1, 3).unwrap();
        assert_eq!(outcome, ClickOutcome::Handled(DayClick::new(1, 8, 2023)));
        assert_eq!(*seen.borrow(), vec![DayClick::new(1, 8, 2023)]);
    }

    #[test]
    fn handler_suppresses_notification() {
        let notified = Rc::new(RefCell::new(Vec::new()));
        let handled = Rc::new(RefCell::new(0));
        let counter = handled.clone();

        let mut cal = august_2023(WeekStart::Sunday)
            .with_notifier(CountingNotifier(notified.clone()))
            .with_handlers(Handlers::new().on_day_click(move |_| *counter.borrow_mut() += 1));

        cal.click(5, 5).unwrap();
        assert_eq!(*handled.borrow(), 1);
        assert!(notified.borrow().is_empty());
    }

    #[test]
    fn notification_without_handler() {
        let notified = Rc::new(RefCell::new(Vec::new()));
        let mut cal = august_2023(WeekStart::Sunday).with_notifier(CountingNotifier(notified.clone()));

        let outcome = cal.click(5, 5).unwrap();
        assert_eq!(outcome, ClickOutcome::Notified(DayClick::new(31, 8, 2023)));
        assert_eq!(*notified.borrow(), vec![DayClick::new(31, 8, 2023)]);
    }

    #[test]
    fn empty_cell_click_is_noop() {
        let notified = Rc::new(RefCell::new(Vec::new()));
        let handled = Rc::new(RefCell::new(0));
        let counter = handled.clone();

        let mut cal = august_2023(WeekStart::Sunday).with_notifier(CountingNotifier(notified.clone()));
        assert_eq!(cal.click(1, 1).unwrap(), ClickOutcome::Ignored);
        assert_eq!(cal.click(6, 7).unwrap(), ClickOutcome::Ignored);
        assert!(notified.borrow().is_empty());

        cal.set_on_day_click(move |_| *counter.borrow_mut() += 1);
        assert_eq!(cal.click(1, 2).unwrap(), ClickOutcome::Ignored);
        assert_eq!(*handled.borrow(), 0);
    }

    #[test]
    fn click_outside_grid_is_rejected() {
        let mut cal = august_2023(WeekStart::Monday);
        assert!(cal.click(0, 1).unwrap_err().is_invalid_argument());
        assert!(cal.click(1, 8).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn navigation_recomputes_grid_and_items() {
        let mut cal = august_2023(WeekStart::Monday)
            .with_items(vec![(10, vec!["first task"]), (20, vec!["second task"])])
            .unwrap()
            .with_handlers(
                Handlers::new()
                    .on_next_month(|month: MonthIndex| {
                        let mut items = ItemMapping::new();
                        items.insert(1, vec![if month.month0() == 8 { "september" } else { "other" }]);
                        items
                    })
                    .on_prev_month(|_| ItemMapping::new()),
            );

        let month = cal.next_month().unwrap();
        assert_eq!((month.month0(), month.year()), (8, 2023));
        assert_eq!(cal.grid().month(), month);
        // September 2023 starts on a Friday
        assert_eq!(cal.grid().position_of(1), Some((1, 5)));
        assert_eq!(cal.items_for(1), &["september"]);
        assert!(cal.items_for(10).is_empty());

        cal.prev_month().unwrap();
        assert_eq!(cal.grid().position_of(1), Some((1, 2)));
        assert!(cal.items().is_empty());
    }

    #[test]
    fn missing_supplier_keeps_items() {
        let mut cal = august_2023(WeekStart::Sunday)
            .with_items(vec![(10, vec!["first task"])])
            .unwrap();

        cal.next_month().unwrap();
        assert_eq!(cal.items_for(10), &["first task"]);
    }

    #[test]
    fn invalid_supplied_items_are_rejected() {
        let mut cal = august_2023(WeekStart::Sunday)
            .with_items(vec![(10, vec!["first task"])])
            .unwrap();
        cal.set_on_next_month(|_| {
            let mut items = ItemMapping::new();
            items.insert(0, vec!["bad"]);
            items
        });

        assert!(cal.next_month().unwrap_err().is_invalid_argument());
        assert_eq!(cal.month().month0(), 8);
        assert_eq!(cal.grid().month().month0(), 8);
        assert!(cal.items().is_empty());
    }

    #[test]
    fn out_of_range_supplied_day_leaves_no_stale_items() {
        let mut cal = august_2023(WeekStart::Sunday)
            .with_items(vec![(10, vec!["august task"])])
            .unwrap();
        cal.set_on_next_month(|_| {
            let mut items = ItemMapping::new();
            items.insert(5, vec!["september task"]);
            items.insert(32, vec!["bad"]);
            items
        });

        assert!(cal.next_month().is_err());
        assert_eq!(cal.month(), MonthIndex::from_month0(8, 2023).unwrap());
        assert_eq!(cal.grid().month(), cal.month());
        assert!(cal.items_for(10).is_empty());
        assert!(cal.items_for(5).is_empty());

        // a later valid supply recovers
        cal.set_on_prev_month(|_| vec![(10, vec!["august task"])].into_iter().collect());
        cal.prev_month().unwrap();
        assert_eq!(cal.items_for(10), &["august task"]);
    }

    #[test]
    fn year_rollover_through_engine() {
        let mut cal: Calendar<()> =
            Calendar::new(MonthIndex::from_month0(11, 2023).unwrap(), WeekStart::Sunday);
        let month = cal.next_month().unwrap();
        assert_eq!((month.month0(), month.year()), (0, 2024));
        let month = cal.prev_month().unwrap();
        assert_eq!((month.month0(), month.year()), (11, 2023));
    }

    #[test]
    fn jump_picks_supplier_by_direction() {
        let mut cal = august_2023(WeekStart::Sunday).with_handlers(
            Handlers::new()
                .on_next_month(|_| {
                    let mut items = ItemMapping::new();
                    items.insert(2, vec!["forward"]);
                    items
                })
                .on_prev_month(|_| {
                    let mut items = ItemMapping::new();
                    items.insert(2, vec!["backward"]);
                    items
                }),
        );

        cal.jump_to(MonthIndex::from_month0(1, 2025).unwrap()).unwrap();
        assert_eq!(cal.items_for(2), &["forward"]);
        cal.jump_to(MonthIndex::from_month0(1, 2020).unwrap()).unwrap();
        assert_eq!(cal.items_for(2), &["backward"]);
        assert_eq!(cal.grid().month().year(), 2020);
    }

    #[test]
    fn day_click_display() {
        assert_eq!(DayClick::new(1, 8, 2023).to_string(), "1.8.2023");
        assert_eq!(DayClick::new(9, 1, 812).to_string(), "9.1.0812");
    }
}

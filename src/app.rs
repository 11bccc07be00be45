use chrono::{Local, NaiveDate};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use crate::agenda::{Agenda, Task};
use crate::calendar::{Calendar, ClickOutcome, DayClick, Handlers};
use crate::cmds::{parse_cmd, Cmd, KeyMap};
use crate::config::Config;
use crate::error::Result;
use crate::names::Names;
use crate::notification::{MessageNotifier, NotificationKind, Notify};
use crate::navigation::MonthIndex;
use crate::render::MonthView;
use crate::weekstart::WeekStart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-oriented host around a [`Calendar`] of tasks.
pub struct App {
    calendar: Calendar<Task>,
    names: Names,
    keys: KeyMap,
    messages: Rc<RefCell<Vec<String>>>,
    today: NaiveDate,
    item_symbol: char,
    today_symbol: char,
    hide_empty_rows: bool,
    colored: bool,
}

fn describe_day(agenda: &Agenda, click: &DayClick) -> String {
    let tasks: Vec<String> = NaiveDate::from_ymd_opt(click.year, click.month, click.day)
        .map(|date| agenda.items_of_day(&date).map(Task::to_string).collect())
        .unwrap_or_default();

    if tasks.is_empty() {
        format!("{}: no tasks", click)
    } else {
        format!("{}:\n  {}", click, tasks.join("\n  "))
    }
}

impl App {
    /// Sets up the calendar for `month`. With an agenda, month changes pull
    /// that month's tasks and day clicks list the tasks of the day; without
    /// one, clicks go to the configured notification.
    pub fn new(
        config: &Config,
        agenda: Option<Agenda>,
        month: MonthIndex,
        week_start: WeekStart,
    ) -> Result<App> {
        let messages = Rc::new(RefCell::new(Vec::new()));
        let notifier: Box<dyn Notify> = match config.notification {
            NotificationKind::Stdout => Box::new(MessageNotifier::new(Rc::clone(&messages))),
            kind => kind.notifier(),
        };
        let mut calendar = Calendar::new(month, week_start).with_boxed_notifier(notifier);

        if let Some(agenda) = agenda {
            let agenda = Rc::new(agenda);
            calendar = calendar.with_items(agenda.items_of_month(month))?;

            let next = Rc::clone(&agenda);
            let prev = Rc::clone(&agenda);
            let sink = Rc::clone(&messages);
            calendar = calendar.with_handlers(
                Handlers::new()
                    .on_next_month(move |month| next.items_of_month(month))
                    .on_prev_month(move |month| prev.items_of_month(month))
                    .on_day_click(move |click| {
                        sink.borrow_mut().push(describe_day(&agenda, click))
                    }),
            );
        }

        Ok(App {
            calendar,
            names: config.names()?,
            keys: config.keys.clone(),
            messages,
            today: Local::now().date_naive(),
            item_symbol: config.item_symbol,
            today_symbol: config.today_symbol,
            hide_empty_rows: config.hide_empty_rows,
            colored: false,
        })
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn calendar(&self) -> &Calendar<Task> {
        &self.calendar
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        let view = MonthView::new(&self.names)
            .today(self.today)
            .item_symbol(self.item_symbol)
            .today_symbol(self.today_symbol)
            .hide_empty_rows(self.hide_empty_rows)
            .colored(self.colored);

        writeln!(out, "{}", view.render(&self.calendar))?;
        Ok(())
    }

    pub fn handle<W: Write>(&mut self, cmd: Cmd, out: &mut W) -> Result<Flow> {
        match cmd {
            Cmd::Noop => {}
            Cmd::NextMonth(n) => {
                let target = self.calendar.month() + n;
                self.calendar.jump_to(target)?;
                self.draw(out)?;
            }
            Cmd::PrevMonth(n) => {
                let target = self.calendar.month() - n;
                self.calendar.jump_to(target)?;
                self.draw(out)?;
            }
            Cmd::Today => {
                self.calendar.jump_to(MonthIndex::from(self.today))?;
                self.draw(out)?;
            }
            Cmd::Click(row, col) => {
                if self.calendar.click(row, col)? != ClickOutcome::Ignored {
                    for message in self.messages.borrow_mut().drain(..) {
                        writeln!(out, "{}", message)?;
                    }
                }
            }
            Cmd::Items(day) => {
                let items = self.calendar.items_for(day);
                if items.is_empty() {
                    writeln!(out, "no items on day {}", day)?;
                }
                for item in items {
                    writeln!(out, "{}", item)?;
                }
            }
            Cmd::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Draws once, then runs commands read from `input` until it ends or a
    /// quit command is read. Bad commands are reported and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.draw(out)?;

        for line in input.lines() {
            let result = parse_cmd(&line?, &self.keys).and_then(|cmd| self.handle(cmd, out));

            match result {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    log::warn!("{}", e);
                    writeln!(out, "error: {}", e)?;
                }
            }
        }

        Ok(())
    }
}

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::calendar::ItemMapping;
use crate::error::{Error, ErrorKind, Result};
use crate::navigation::MonthIndex;

/// Due date of a task, either "YYYY-MM-DD HH:MM" or a bare "YYYY-MM-DD".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, DeserializeFromStr)]
pub struct Due(NaiveDateTime);

impl Due {
    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl FromStr for Due {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
            return Ok(Due(dt));
        }

        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        date.and_hms_opt(0, 0, 0)
            .map(Due)
            .ok_or_else(|| Error::new(ErrorKind::DateParse, s))
    }
}

impl fmt::Display for Due {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub title: String,
    #[serde(default)]
    pub comment: String,
    pub due: Due,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.title, self.due)?;
        if !self.comment.is_empty() {
            write!(f, ": {}", self.comment)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct TaskFile {
    #[serde(default, rename = "task")]
    tasks: Vec<Task>,
}

/// Task source backing the month-change suppliers of the calendar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agenda {
    tasks: Vec<Task>,
}

impl Agenda {
    pub fn new(tasks: Vec<Task>) -> Self {
        Agenda { tasks }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::from(ErrorKind::IOError(e))
                .context(&format!("could not read tasks from {}", path.display()))
        })?;

        let agenda = content.parse::<Agenda>()?;
        log::debug!("loaded {} tasks from {}", agenda.tasks.len(), path.display());
        Ok(agenda)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks of `month` keyed by day, each day ordered by due time.
    pub fn items_of_month(&self, month: MonthIndex) -> ItemMapping<Task> {
        let mut items = ItemMapping::new();

        for task in self
            .tasks
            .iter()
            .filter(|task| MonthIndex::from(task.due.date()) == month)
            .sorted_by_key(|task| task.due)
        {
            items
                .entry(task.due.date().day())
                .or_insert_with(Vec::new)
                .push(task.clone());
        }

        items
    }

    pub fn items_of_day<'a>(&'a self, date: &'a NaiveDate) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks
            .iter()
            .filter(move |task| task.due.date() == *date)
    }
}

impl FromStr for Agenda {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: TaskFile = toml::from_str(s)?;
        Ok(Agenda::new(file.tasks))
    }
}

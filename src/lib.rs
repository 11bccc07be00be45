//! Month-view calendar engine.
//!
//! [`grid::compute_grid`] lays a month out on a fixed 6x7 grid, [`navigation`]
//! moves between months, [`items::DayItems`] holds what is shown on each day and
//! [`calendar::Calendar`] ties them together behind host-supplied handlers.

pub mod agenda;
pub mod app;
pub mod calendar;
pub mod cmds;
pub mod config;
pub mod datemath;
pub mod error;
pub mod grid;
pub mod items;
pub mod names;
pub mod navigation;
pub mod notification;
pub mod render;
pub mod weekstart;

pub use calendar::{Calendar, ClickOutcome, DayClick, Handlers, ItemMapping};
pub use error::{Error, ErrorKind, Result};
pub use grid::{compute_grid, Cell, Grid};
pub use items::DayItems;
pub use navigation::{MonthIndex, Navigation};
pub use weekstart::WeekStart;

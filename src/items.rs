use std::collections::BTreeMap;

use crate::error::{Error, Result};

pub const MAX_DAY: u32 = 31;

/// Per-day lists of display items for the month on screen.
///
/// Items are opaque: they are stored and handed back in insertion order
/// without being inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct DayItems<T> {
    days: BTreeMap<u32, Vec<T>>,
}

impl<T> DayItems<T> {
    pub fn new() -> Self {
        DayItems {
            days: BTreeMap::new(),
        }
    }

    /// Builds a store from a mapping, rejecting any day key outside `1..=31`.
    pub fn from_mapping<I>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, Vec<T>)>,
    {
        let mut days = BTreeMap::new();
        for (day, items) in mapping {
            if !(1..=MAX_DAY).contains(&day) {
                return Err(Error::invalid_argument(&format!(
                    "day {} is not in 1..={}",
                    day, MAX_DAY
                )));
            }
            days.entry(day).or_insert_with(Vec::new).extend(items);
        }

        Ok(DayItems { days })
    }

    /// Replaces the whole mapping. On error the previous mapping is kept.
    pub fn replace<I>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (u32, Vec<T>)>,
    {
        *self = DayItems::from_mapping(mapping)?;
        Ok(())
    }

    /// Items of `day`; empty for absent days and for days outside `1..=31`.
    pub fn items_for(&self, day: u32) -> &[T] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_items(&self, day: u32) -> bool {
        !self.items_for(day).is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = (u32, &[T])> + '_ {
        self.days.iter().map(|(day, items)| (*day, items.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }
}

impl<T> Default for DayItems<T> {
    fn default() -> Self {
        DayItems::new()
    }
}

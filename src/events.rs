//! Calendar event overlay, keyed by the date each event starts on.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::error::EventError;
use crate::types::MAX_EVENTS_PER_DAY;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// RFC 3339 timestamp.
    pub start: String,
    pub end: String,
    pub color: String,
    #[serde(default)]
    pub is_finished: bool,
}

impl CalendarEvent {
    /// Calendar date of `start` in the timestamp's own offset.
    pub fn start_date(&self) -> Result<NaiveDate, EventError> {
        DateTime::parse_from_rfc3339(&self.start)
            .map(|dt| dt.date_naive())
            .map_err(|_| EventError::Timestamp {
                id: self.id.clone(),
                value: self.start.clone(),
            })
    }
}

/// Events of one day, truncated for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEvents<'a> {
    pub visible: &'a [CalendarEvent],
    pub count: usize,
    pub has_more: bool,
}

impl DayEvents<'_> {
    /// Marker column for a grid cell: blank, `*` with events, `+` when some are hidden.
    pub fn marker(&self) -> char {
        if self.has_more {
            '+'
        } else if self.count > 0 {
            '*'
        } else {
            ' '
        }
    }

    /// Events that do not fit the per-day limit.
    pub fn hidden(&self) -> usize {
        self.count - self.visible.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    by_date: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl EventIndex {
    /// Group events by start date, keeping input order within each day.
    pub fn from_events(events: Vec<CalendarEvent>) -> Result<Self, EventError> {
        let mut by_date: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
        for event in events {
            let date = event.start_date()?;
            by_date.entry(date).or_default().push(event);
        }
        Ok(EventIndex { by_date })
    }

    pub fn from_json_str(data: &str) -> Result<Self, EventError> {
        let events: Vec<CalendarEvent> = serde_json::from_str(data)?;
        Self::from_events(events)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EventError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| EventError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let index = Self::from_json_str(&data)?;
        info!(
            path = %path.display(),
            days = index.by_date.len(),
            "loaded calendar events"
        );
        Ok(index)
    }

    pub fn day_events(&self, date: NaiveDate) -> DayEvents<'_> {
        let all = self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        DayEvents {
            visible: &all[..all.len().min(MAX_EVENTS_PER_DAY)],
            count: all.len(),
            has_more: all.len() > MAX_EVENTS_PER_DAY,
        }
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

//! Calendar events — category model, draft validation and the event list.
//!
//! New events start as an [`EventDraft`] filled in by the UI. A draft must
//! have a title, a real category (not [`EventCategory::General`]) and a
//! `YYYY-MM-DD` date before it becomes a [`CalendarEvent`].

use crate::types::Record;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Event category. The theme maps each one to an accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventCategory {
    /// Placeholder selection in a fresh draft; not a valid final category.
    #[default]
    General,
    Meeting,
    Task,
    Deadline,
}

impl EventCategory {
    /// Categories a saved event may carry, in legend order.
    pub const SELECTABLE: [EventCategory; 3] =
        [EventCategory::Meeting, EventCategory::Task, EventCategory::Deadline];

    /// Every category in picker order, starting with the placeholder.
    pub const ALL: [EventCategory; 4] = [
        EventCategory::General,
        EventCategory::Meeting,
        EventCategory::Task,
        EventCategory::Deadline,
    ];

    /// Next category in picker order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous category in picker order, wrapping around.
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::General => write!(f, "General"),
            EventCategory::Meeting => write!(f, "Meeting"),
            EventCategory::Task => write!(f, "Task"),
            EventCategory::Deadline => write!(f, "Deadline"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("please enter a title")]
    MissingTitle,
    #[error("please select a category other than 'General'")]
    GeneralCategory,
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("an event with this title already exists on that date")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// `"<date>-<title>"` for added events. [`Calendar::add`] refuses a
    /// second event with the same date and title.
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub category: EventCategory,
}

impl CalendarEvent {
    /// Date rendered like `Sep 14, 2022`.
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }

    /// Export row with the [`EXPORT_COLUMNS`] fields. Events are whole-day,
    /// so `end` is empty and `allDay` is always `true`.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("title", self.title.as_str())
            .with("start", self.date.format("%Y-%m-%d").to_string())
            .with("end", "")
            .with("allDay", "true")
            .with("category", self.category.to_string())
    }
}

/// Column order of a calendar CSV export.
pub const EXPORT_COLUMNS: [&str; 5] = ["title", "start", "end", "allDay", "category"];

/// An event being composed in the add-event dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub category: EventCategory,
    /// Free text, parsed on validation.
    pub date: String,
}

impl EventDraft {
    pub fn validate(&self) -> Result<CalendarEvent, CalendarError> {
        if self.title.is_empty() {
            return Err(CalendarError::MissingTitle);
        }
        if self.category == EventCategory::General {
            return Err(CalendarError::GeneralCategory);
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| CalendarError::InvalidDate(self.date.clone()))?;
        Ok(CalendarEvent {
            id: format!("{}-{}", date.format("%Y-%m-%d"), self.title),
            title: self.title.clone(),
            date,
            category: self.category,
        })
    }
}

/// Events ordered by date; ties keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
}

impl Calendar {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        let mut cal = Self { events };
        cal.events.sort_by_key(|e| e.date);
        cal
    }

    /// Validate `draft` and insert it. Returns the new event's id.
    pub fn add(&mut self, draft: &EventDraft) -> Result<String, CalendarError> {
        let event = draft.validate()?;
        let id = event.id.clone();
        if self.events.iter().any(|e| e.date == event.date && e.title == event.title) {
            return Err(CalendarError::Duplicate(id));
        }
        let at = self.events.partition_point(|e| e.date <= event.date);
        tracing::info!(id = %id, category = %event.category, "calendar: event added");
        self.events.insert(at, event);
        Ok(id)
    }

    /// Remove the event with `id`. Returns the removed event, if any.
    pub fn remove(&mut self, id: &str) -> Option<CalendarEvent> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        tracing::info!(id = %id, "calendar: event removed");
        Some(self.events.remove(pos))
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every event as an export row, in date order.
    pub fn export_rows(&self) -> Vec<Record> {
        self.events.iter().map(CalendarEvent::to_record).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use chrono::NaiveDateTime;

use crate::metadata::{format_date, Tag};

/// Listing record of one generated page. Lives for a single build run.
#[derive(Debug, Clone)]
pub(super) struct Entry {
    pub title: String,
    pub dates: EntryDates,
    pub tags: Vec<Tag>,
    /// Detail page link as written into the index.
    pub link: String,
    pub images: Option<CurationImages>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct EntryDates {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

/// Image paths of a curation post. Empty strings stand for missing images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct CurationImages {
    pub left: String,
    pub middle: String,
    pub right: String,
}

impl EntryDates {
    pub fn start_label(&self) -> String {
        format_date(&self.start)
    }

    pub fn end_label(&self) -> Option<String> {
        self.end.as_ref().map(format_date)
    }

    /// "13 Nov. 2025", or "13 Nov. 2025 — 02 Dec. 2025" for a range.
    pub fn label(&self) -> String {
        match self.end_label() {
            Some(end) => format!("{} — {end}", self.start_label()),
            None => self.start_label(),
        }
    }

    /// The lower date of a curation listing: the end date when there is one.
    pub fn bottom_label(&self) -> String {
        self.end_label().unwrap_or_else(|| self.start_label())
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest calendar events.
//!
//! Every contest contributes a start event, an end-of-submissions event and,
//! when it has a voting deadline, a voting-end event. Events are instants
//! (start == end) and keep the order of the input contests.

use crate::models::Contest;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEventKind {
    Start,
    End,
    VotingEnd,
}

impl CalendarEventKind {
    /// Background color used when rendering the event.
    pub fn color(&self) -> &'static str {
        match self {
            CalendarEventKind::Start => "#10b981",
            CalendarEventKind::End => "#ef4444",
            CalendarEventKind::VotingEnd => "#3b82f6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalendarEventKind::Start => "starts",
            CalendarEventKind::End => "submissions close",
            CalendarEventKind::VotingEnd => "voting ends",
        }
    }
}

impl fmt::Display for CalendarEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: CalendarEventKind,
    pub contest_slug: String,
    /// Site-relative link to the contest page
    pub link: String,
}

impl CalendarEvent {
    fn new(contest: &Contest, kind: CalendarEventKind, at: DateTime<Utc>) -> Self {
        Self {
            title: format!("{} ({})", contest.title, kind.label()),
            start: at,
            end: at,
            kind,
            contest_slug: contest.slug.clone(),
            link: contest.link(),
        }
    }

    pub fn color(&self) -> &'static str {
        self.kind.color()
    }
}

/// Calendar events for `contests`, in input order.
pub fn derive_events(contests: &[Contest]) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(contests.len() * 3);

    for contest in contests {
        events.push(CalendarEvent::new(
            contest,
            CalendarEventKind::Start,
            contest.start_at,
        ));
        events.push(CalendarEvent::new(
            contest,
            CalendarEventKind::End,
            contest.end_at,
        ));
        if let Some(voting_end) = contest.voting_end_at {
            events.push(CalendarEvent::new(
                contest,
                CalendarEventKind::VotingEnd,
                voting_end,
            ));
        }
    }

    events
}

/// Events falling in `[from, to)`, sorted by time. Ties keep input order.
pub fn events_between(
    events: &[CalendarEvent],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    let mut selected: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| event.start >= from && event.start < to)
        .cloned()
        .collect();
    selected.sort_by_key(|event| event.start);
    selected
}

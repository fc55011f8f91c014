//! Month-grid calendar logic.
//!
//! Weeks start on Sunday. A grid has at most six weeks; trailing weeks
//! that would be entirely empty are not produced.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::holidays::HolidayMap;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const MAX_WEEKS: usize = 6;

/// Number of days in `month` of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = CalendarView::new(year, month).next();
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next.year, next.month, 1),
    ) {
        (Some(first), Some(following)) => following.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Weekday of the 1st (0 = Sunday, 1 = Monday, etc.)
pub fn first_day_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// The month currently shown by a calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
}

impl CalendarView {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// e.g. "October 2026"
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|first| first.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    /// Path of the monthly holiday endpoint for this month
    pub fn holidays_path(&self) -> String {
        format!("/api/holidays/{}/{}/", self.year, self.month)
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalendarCell {
    /// Day of month; `None` for leading/trailing blanks
    pub day: Option<u32>,
    pub iso_date: Option<String>,
    pub is_holiday: bool,
    pub is_today: bool,
}

impl CalendarCell {
    pub fn blank() -> Self {
        Self::default()
    }
}

pub type CalendarWeek = [CalendarCell; 7];

/// Lay out the month as weeks of seven cells.
///
/// In-month cells are flagged as holidays when present in `holidays`, and
/// as today when they match `today`.
pub fn build_month_grid(view: CalendarView, today: NaiveDate, holidays: &HolidayMap) -> Vec<CalendarWeek> {
    let first_weekday = first_day_of_month(view.year, view.month) as usize;
    let last_day = days_in_month(view.year, view.month);

    let mut weeks = Vec::with_capacity(MAX_WEEKS);
    let mut current_day = 1;

    for week_index in 0..MAX_WEEKS {
        let week: CalendarWeek = std::array::from_fn(|weekday| {
            if (week_index == 0 && weekday < first_weekday) || current_day > last_day {
                return CalendarCell::blank();
            }
            let day = current_day;
            current_day += 1;

            let iso = iso_date(view.year, view.month, day);
            CalendarCell {
                day: Some(day),
                is_holiday: holidays.contains(&iso),
                is_today: today.year() == view.year && today.month() == view.month && today.day() == day,
                iso_date: Some(iso),
            }
        });
        weeks.push(week);

        if current_day > last_day {
            break;
        }
    }

    weeks
}

/// Axis-aligned box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Top-left corner for a tooltip of the given size, horizontally centred
/// over `target` and `offset` units above it
pub fn tooltip_position(target: Rect, tooltip_width: f64, tooltip_height: f64, offset: f64) -> (f64, f64) {
    let top = target.top - tooltip_height - offset;
    let left = target.left + target.width / 2.0 - tooltip_width / 2.0;
    (top, left)
}

/// Hands out increasing tokens so that only the newest of several
/// overlapping requests gets applied.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for a request that is about to be sent
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a response for `token` is still wanted
    pub fn is_current(&self, token: u64) -> bool {
        token == self.latest
    }
}

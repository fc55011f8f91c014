//! Multi-facet filtering of the professor schedule table.
//!
//! Four independent facets (department, hour buckets, days, free text) are
//! combined with logical AND. An empty time or day selection means "all".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clock::{self, MINUTES_PER_HOUR};
use crate::schedule_entry::{Department, Weekday};
use crate::ScheduleRecord;

/// Column of the rendered table that holds the `"start - end"` range
pub const TIME_COLUMN: usize = 2;

/// Column headings of the schedule table, in display order
pub const COLUMN_HEADINGS: [&str; 8] = [
    "Professor",
    "Department",
    "Time",
    "Day",
    "Subject",
    "Section",
    "Room",
    "Status",
];

const FIRST_SELECTABLE_HOUR: u32 = 7;
const LAST_SELECTABLE_HOUR: u32 = 20;

/// One-hour slice of the day identified by its starting hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeBucket(pub u32);

impl TimeBucket {
    /// Half-open minute interval `[hour*60, (hour+1)*60)`
    pub fn minutes(&self) -> (u32, u32) {
        (self.0 * MINUTES_PER_HOUR, (self.0 + 1) * MINUTES_PER_HOUR)
    }

    /// Whether `[start, end)` shares any minute with this bucket
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        let (sel_start, sel_end) = self.minutes();
        sel_start < end && sel_end > start
    }

    /// e.g. `"09:00 AM - 10:00 AM"`
    pub fn label(&self) -> String {
        format!("{} - {}", clock::format_hour_12(self.0), clock::format_hour_12(self.0 + 1))
    }

    /// Buckets offered by the time facet, 7 AM through 8 PM
    pub fn selectable() -> Vec<TimeBucket> {
        (FIRST_SELECTABLE_HOUR..=LAST_SELECTABLE_HOUR).map(TimeBucket).collect()
    }

    /// Parse a `data-time` value. `"all"` is not a bucket.
    pub fn from_attr(value: &str) -> Option<TimeBucket> {
        value.trim().parse::<u32>().ok().filter(|h| *h < 24).map(TimeBucket)
    }
}

/// Selection state of a checkbox facet with an exclusive "All" option.
///
/// "All" is checked exactly when no specific option is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelection<T: Ord> {
    selected: BTreeSet<T>,
}

impl<T: Ord + Clone> FacetSelection<T> {
    pub fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.selected.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.selected.iter()
    }

    /// The "All" box changed. Checking it clears every specific option;
    /// unchecking it is ignored since an empty selection means "all".
    pub fn set_all(&mut self, checked: bool) {
        if checked {
            self.selected.clear();
        }
    }

    /// A specific box changed
    pub fn set(&mut self, value: T, checked: bool) {
        if checked {
            self.selected.insert(value);
        } else {
            self.selected.remove(&value);
        }
    }

    /// Single selected value, if exactly one is selected
    pub fn single(&self) -> Option<&T> {
        if self.selected.len() == 1 {
            self.selected.iter().next()
        } else {
            None
        }
    }
}

impl<T: Ord + Clone> Default for FacetSelection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view over one table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Absent for rows built from API records, which carry no professor id
    pub professor_id: Option<String>,
    pub department: String,
    pub day: String,
    /// Lower-cased searchable text
    pub search_text: String,
    /// Displayed `"start - end"` range
    pub time_range: String,
    /// Displayed cell texts, in column order
    pub cells: Vec<String>,
    interval: Option<(u32, u32)>,
}

impl ScheduleRow {
    pub fn new(
        professor_id: Option<String>,
        department: impl Into<String>,
        day: impl Into<String>,
        search_text: &str,
        cells: Vec<String>,
    ) -> Self {
        let time_range = cells.get(TIME_COLUMN).map(|c| c.trim().to_string()).unwrap_or_default();
        let interval = clock::parse_range(&time_range).ok();
        Self {
            professor_id,
            department: department.into(),
            day: day.into(),
            search_text: search_text.to_lowercase(),
            time_range,
            cells,
            interval,
        }
    }

    /// Build a row from an API record, deriving the searchable text from its fields
    pub fn from_record(record: &ScheduleRecord) -> Self {
        let department = Department::from_code_or_label(&record.department)
            .map(|d| d.code().to_string())
            .unwrap_or_else(|| record.department.clone());
        let time_range = format!("{} - {}", record.start_time, record.end_time);
        let room = record.room.clone().unwrap_or_default();
        let search_text = [
            record.professor.as_str(),
            record.department.as_str(),
            record.subject_code.as_str(),
            record.subject_name.as_str(),
            record.section.as_str(),
            room.as_str(),
            record.day.as_str(),
            record.status.as_str(),
        ]
        .join(" ");

        let cells = vec![
            record.professor.clone(),
            record.department.clone(),
            time_range,
            record.day.clone(),
            format!("{} - {}", record.subject_code, record.subject_name),
            record.section.clone(),
            room,
            record.status.clone(),
        ];

        Self::new(None, department, record.day.clone(), &search_text, cells)
    }

    /// Minute interval of the displayed range, if it could be parsed
    pub fn interval(&self) -> Option<(u32, u32)> {
        self.interval
    }
}

/// Everything the user has chosen in the filter bar
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected department code; `None` is "All"
    pub department: Option<String>,
    pub times: FacetSelection<TimeBucket>,
    pub days: FacetSelection<Weekday>,
    pub query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the department from a button's `data-department` value
    pub fn select_department(&mut self, code: &str) {
        let code = code.trim();
        self.department = if code.is_empty() || code.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(code.to_string())
        };
    }

    pub fn department_matches(&self, row: &ScheduleRow) -> bool {
        match &self.department {
            None => true,
            Some(code) => row.department == *code,
        }
    }

    pub fn time_matches(&self, row: &ScheduleRow) -> bool {
        if self.times.is_all() {
            return true;
        }
        match row.interval() {
            Some((start, end)) => self.times.iter().any(|bucket| bucket.overlaps(start, end)),
            None => false,
        }
    }

    pub fn day_matches(&self, row: &ScheduleRow) -> bool {
        if self.days.is_all() {
            return true;
        }
        Weekday::from_name(&row.day)
            .map(|day| self.days.contains(&day))
            .unwrap_or(false)
    }

    pub fn search_matches(&self, row: &ScheduleRow) -> bool {
        row.search_text.contains(&self.query.to_lowercase())
    }

    /// A row is visible iff every facet accepts it
    pub fn matches(&self, row: &ScheduleRow) -> bool {
        self.department_matches(row) && self.time_matches(row) && self.day_matches(row) && self.search_matches(row)
    }

    /// Visibility flag for each row, in order
    pub fn visibility(&self, rows: &[ScheduleRow]) -> Vec<bool> {
        rows.iter().map(|row| self.matches(row)).collect()
    }

    /// Caption of the time facet button
    pub fn time_caption(&self) -> String {
        match (self.times.len(), self.times.single()) {
            (0, _) => "All Times".to_string(),
            (_, Some(bucket)) => bucket.label(),
            (n, None) => format!("{} times selected", n),
        }
    }

    /// Caption of the day facet button
    pub fn day_caption(&self) -> String {
        match (self.days.len(), self.days.single()) {
            (0, _) => "All Days".to_string(),
            (_, Some(day)) => day.name().to_string(),
            (n, None) => format!("{} days selected", n),
        }
    }

    /// Caption of the department facet button
    pub fn department_caption(&self) -> String {
        match &self.department {
            None => "All Departments".to_string(),
            Some(code) => Department::from_code(code)
                .map(|d| d.label().to_string())
                .unwrap_or_else(|| code.clone()),
        }
    }
}

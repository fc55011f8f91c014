use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod holidays;
pub mod schedule_entry;
pub mod schedule_filter;
pub mod status;
pub mod user_filter;

pub use calendar::{CalendarCell, CalendarView, CalendarWeek, Rect, RequestSequencer};
pub use config::WidgetConfig;
pub use error::{ScheduleFormError, TimeParseError};
pub use holidays::{HolidayMap, HolidayRecord, UpcomingHoliday};
pub use schedule_entry::{Department, EntryField, EntryStatus, ScheduleEntry, ScheduleEntryForm, Weekday, YearLevel};
pub use schedule_filter::{FacetSelection, FilterState, ScheduleRow, TimeBucket};
pub use status::{StatusSelectorState, UpdateStatusRequest, UserStatus};
pub use user_filter::{UserFilter, UserFilterTab};

/// A scheduled class as returned by `GET /api/schedules/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: u64,
    /// Professor's first name
    pub professor: String,
    /// Department code or display name, depending on the endpoint
    pub department: String,
    pub day: String,
    /// 12-hour clock, e.g. "09:00 AM"
    pub start_time: String,
    pub end_time: String,
    pub subject_code: String,
    pub subject_name: String,
    pub section: String,
    #[serde(default)]
    pub room: Option<String>,
    pub status: String,
}

/// Response envelope of `GET /api/schedules/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleListResponse {
    pub schedules: Vec<ScheduleRecord>,
}

/// Server-side narrowing of `GET /api/schedules/`. Unset fields are omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub professor: Option<String>,
    pub department: Option<String>,
    pub day: Option<String>,
    /// Exact start time, "HH:MM:SS"
    pub timeslot: Option<String>,
}

impl ScheduleQuery {
    /// Encoded query string including the leading `?`, or empty
    pub fn to_query_string(&self) -> String {
        let params: Vec<String> = [
            ("professor", &self.professor),
            ("department", &self.department),
            ("day", &self.day),
            ("timeslot", &self.timeslot),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Path of the per-professor schedule page a table row links to
pub fn professor_schedule_path(professor_id: &str) -> String {
    format!("/professor/{}/schedule/", professor_id)
}

//! Holiday records as served by the holiday endpoints.
//!
//! The monthly endpoint is backed by several upstream tables that do not
//! agree on what the name column is called, so a record may carry its name
//! under any of a handful of keys.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One record from `GET /api/holidays/{year}/{month}/`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl HolidayRecord {
    /// First non-empty name among the known aliases, in priority order
    pub fn display_name(&self) -> String {
        [&self.holiday_name, &self.name, &self.holiday, &self.title]
            .into_iter()
            .flatten()
            .find(|n| !n.is_empty())
            .cloned()
            .unwrap_or_default()
    }

    /// Date part of the record as `YYYY-MM-DD`
    pub fn iso_date(&self) -> &str {
        let date = self.date.trim();
        date.split('T').next().unwrap_or(date)
    }
}

/// Holidays of the displayed month keyed by ISO date
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HolidayMap {
    by_date: BTreeMap<String, String>,
}

impl HolidayMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce records into a date → name mapping. A later record for the
    /// same date replaces an earlier one.
    pub fn from_records(records: &[HolidayRecord]) -> Self {
        let by_date = records
            .iter()
            .map(|r| (r.iso_date().to_string(), r.display_name()))
            .collect();
        Self { by_date }
    }

    pub fn get(&self, iso_date: &str) -> Option<&str> {
        self.by_date.get(iso_date).map(String::as_str)
    }

    pub fn contains(&self, iso_date: &str) -> bool {
        self.by_date.contains_key(iso_date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Tooltip text for a holiday cell, `None` when the date is not a holiday
    pub fn tooltip_text(&self, iso_date: &str) -> Option<String> {
        self.get(iso_date).map(|name| {
            if name.is_empty() {
                iso_date.to_string()
            } else {
                format!("{} — {}", iso_date, name)
            }
        })
    }
}

/// One record from `GET /api/holidays/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingHoliday {
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl UpcomingHoliday {
    /// Date formatted as "December 25, 2026"; shown verbatim if unparseable
    pub fn formatted_date(&self) -> String {
        format_long_date(&self.date)
    }
}

/// Format an ISO date (optionally with a time part) as "Month D, YYYY"
pub fn format_long_date(date: &str) -> String {
    let date_part = date.trim().split('T').next().unwrap_or_default();
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_aliases() {
        let records: Vec<HolidayRecord> = serde_json::from_str(
            r#"[
                {"date": "2026-12-25", "holiday_name": "Christmas Day"},
                {"date": "2026-12-30", "name": "Rizal Day"},
                {"date": "2026-12-08", "holiday": "Immaculate Conception"},
                {"date": "2026-12-24", "title": "Christmas Eve", "id": 7},
                {"date": "2026-12-31"}
            ]"#,
        )
        .unwrap();

        let names: Vec<String> = records.iter().map(HolidayRecord::display_name).collect();
        assert_eq!(
            names,
            vec!["Christmas Day", "Rizal Day", "Immaculate Conception", "Christmas Eve", ""]
        );
    }

    #[test]
    fn test_alias_priority_skips_empty_values() {
        let record = HolidayRecord {
            date: "2026-11-01".to_string(),
            holiday_name: Some(String::new()),
            name: Some("All Saints' Day".to_string()),
            title: Some("Undas".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_name(), "All Saints' Day");
    }

    #[test]
    fn test_map_keyed_by_iso_date() {
        let records = vec![
            HolidayRecord {
                date: "2026-06-12T00:00:00".to_string(),
                name: Some("Independence Day".to_string()),
                ..Default::default()
            },
            HolidayRecord {
                date: "2026-06-19".to_string(),
                title: Some("Rizal's Birthday".to_string()),
                ..Default::default()
            },
        ];
        let map = HolidayMap::from_records(&records);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("2026-06-12"), Some("Independence Day"));
        assert!(!map.contains("2026-06-13"));
        assert_eq!(
            map.tooltip_text("2026-06-19").as_deref(),
            Some("2026-06-19 — Rizal's Birthday")
        );
        assert_eq!(map.tooltip_text("2026-06-20"), None);
    }

    #[test]
    fn test_upcoming_holiday_date_format() {
        let holiday = UpcomingHoliday {
            date: "2026-12-25".to_string(),
            description: "Christmas Day".to_string(),
        };
        assert_eq!(holiday.formatted_date(), "December 25, 2026");
        assert_eq!(format_long_date("2027-01-01T00:00:00Z"), "January 1, 2027");
        assert_eq!(format_long_date("soon"), "soon");
    }
}

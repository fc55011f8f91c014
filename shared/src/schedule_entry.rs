//! Repeatable schedule-entry blocks of the "add schedule" form.
//!
//! The form always starts with one entry. Entries are identified by a
//! UUID so the UI can key them across removals; their visible number is
//! derived from position, which makes renumbering implicit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock;
use crate::error::ScheduleFormError;

/// Academic department a class belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "CCS")]
    Ccs,
    #[serde(rename = "CMBA")]
    Cmba,
    #[serde(rename = "CCJ")]
    Ccj,
    #[serde(rename = "CNAHS")]
    Cnahs,
    #[serde(rename = "CEA")]
    Cea,
    #[serde(rename = "CASE")]
    Case,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Ccs,
        Department::Cmba,
        Department::Ccj,
        Department::Cnahs,
        Department::Cea,
        Department::Case,
    ];

    /// Short code used in form values and `data-department`
    pub fn code(&self) -> &'static str {
        match self {
            Department::Ccs => "CCS",
            Department::Cmba => "CMBA",
            Department::Ccj => "CCJ",
            Department::Cnahs => "CNAHS",
            Department::Cea => "CEA",
            Department::Case => "CASE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::Ccs => "College of Computer Studies",
            Department::Cmba => "College of Management, Business, and Accountancy",
            Department::Ccj => "College of Criminal Justice",
            Department::Cnahs => "College of Nursing and Allied Health Sciences",
            Department::Cea => "College of Engineering and Architecture",
            Department::Case => "College of Arts, Sciences and Education",
        }
    }

    pub fn from_code(code: &str) -> Option<Department> {
        Self::ALL.into_iter().find(|d| d.code().eq_ignore_ascii_case(code))
    }

    pub fn from_label(label: &str) -> Option<Department> {
        let label = label.trim();
        Self::ALL.into_iter().find(|d| d.label().eq_ignore_ascii_case(label))
    }

    /// API payloads carry either the short code or the display name
    pub fn from_code_or_label(value: &str) -> Option<Department> {
        Self::from_code(value.trim()).or_else(|| Self::from_label(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearLevel {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "5th")]
    Fifth,
}

impl YearLevel {
    pub const ALL: [YearLevel; 5] = [
        YearLevel::First,
        YearLevel::Second,
        YearLevel::Third,
        YearLevel::Fourth,
        YearLevel::Fifth,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            YearLevel::First => "1st",
            YearLevel::Second => "2nd",
            YearLevel::Third => "3rd",
            YearLevel::Fourth => "4th",
            YearLevel::Fifth => "5th",
        }
    }

    pub fn label(&self) -> String {
        format!("{} Year", self.value())
    }
}

/// Day of the week, Monday first as the schedule form lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn from_name(name: &str) -> Option<Weekday> {
        Self::ALL.into_iter().find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// What the professor is doing during a scheduled slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    Class,
    #[serde(rename = "Out of work")]
    OutOfWork,
    Available,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 3] = [EntryStatus::Class, EntryStatus::OutOfWork, EntryStatus::Available];

    pub fn value(&self) -> &'static str {
        match self {
            EntryStatus::Class => "Class",
            EntryStatus::OutOfWork => "Out of work",
            EntryStatus::Available => "Available",
        }
    }
}

/// One input of an entry block, named the way the server expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Department,
    SubjectCode,
    SubjectName,
    Section,
    Room,
    YearLevel,
    Day,
    TimeFrom,
    TimeTo,
    Status,
}

impl EntryField {
    /// Array-style form field name
    pub fn form_name(&self) -> &'static str {
        match self {
            EntryField::Department => "department[]",
            EntryField::SubjectCode => "subject_code[]",
            EntryField::SubjectName => "subject_name[]",
            EntryField::Section => "section[]",
            EntryField::Room => "room[]",
            EntryField::YearLevel => "year_level[]",
            EntryField::Day => "day[]",
            EntryField::TimeFrom => "time_from[]",
            EntryField::TimeTo => "time_to[]",
            EntryField::Status => "status[]",
        }
    }
}

/// Raw values of one entry block. Empty strings mean "not filled in".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub department: String,
    pub subject_code: String,
    pub subject_name: String,
    pub section: String,
    pub room: String,
    pub year_level: String,
    pub day: String,
    pub time_from: String,
    pub time_to: String,
    pub status: String,
    /// Set while the entry is fading out before removal
    #[serde(skip)]
    pub removing: bool,
}

impl ScheduleEntry {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            department: String::new(),
            subject_code: String::new(),
            subject_name: String::new(),
            section: String::new(),
            room: String::new(),
            year_level: String::new(),
            day: String::new(),
            time_from: String::new(),
            time_to: String::new(),
            status: String::new(),
            removing: false,
        }
    }

    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Department => &self.department,
            EntryField::SubjectCode => &self.subject_code,
            EntryField::SubjectName => &self.subject_name,
            EntryField::Section => &self.section,
            EntryField::Room => &self.room,
            EntryField::YearLevel => &self.year_level,
            EntryField::Day => &self.day,
            EntryField::TimeFrom => &self.time_from,
            EntryField::TimeTo => &self.time_to,
            EntryField::Status => &self.status,
        }
    }

    pub fn set_field(&mut self, field: EntryField, value: String) {
        let slot = match field {
            EntryField::Department => &mut self.department,
            EntryField::SubjectCode => &mut self.subject_code,
            EntryField::SubjectName => &mut self.subject_name,
            EntryField::Section => &mut self.section,
            EntryField::Room => &mut self.room,
            EntryField::YearLevel => &mut self.year_level,
            EntryField::Day => &mut self.day,
            EntryField::TimeFrom => &mut self.time_from,
            EntryField::TimeTo => &mut self.time_to,
            EntryField::Status => &mut self.status,
        };
        *slot = value;
    }

    /// False only when both times are filled in and end is not after start
    pub fn has_valid_time_order(&self) -> bool {
        let (from, to) = (self.time_from.trim(), self.time_to.trim());
        if from.is_empty() || to.is_empty() {
            return true;
        }
        match (clock::parse_minutes(from), clock::parse_minutes(to)) {
            (Ok(start), Ok(end)) => start < end,
            // Unparseable input is compared as text, like the browser would
            _ => from < to,
        }
    }
}

impl Default for ScheduleEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading of the entry at `index` (0-based). The first entry carries no number.
pub fn entry_label(index: usize) -> String {
    if index == 0 {
        "Schedule Entry".to_string()
    } else {
        format!("Schedule Entry {}", index + 1)
    }
}

/// Ordered list of entry blocks owned by one form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntryForm {
    entries: Vec<ScheduleEntry>,
}

impl ScheduleEntryForm {
    /// A form with its single initial entry
    pub fn new() -> Self {
        Self {
            entries: vec![ScheduleEntry::new()],
        }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Append a blank entry and return its id
    pub fn add_entry(&mut self) -> Uuid {
        let entry = ScheduleEntry::new();
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Entries that are not already on their way out
    pub fn remaining(&self) -> usize {
        self.entries.iter().filter(|e| !e.removing).count()
    }

    /// Mark an entry for removal. Refused when it would leave no entry behind.
    pub fn begin_remove(&mut self, id: Uuid) -> Result<(), ScheduleFormError> {
        if self.remaining() <= 1 {
            return Err(ScheduleFormError::LastEntry);
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ScheduleFormError::EntryNotFound(id))?;
        entry.removing = true;
        Ok(())
    }

    /// Drop an entry previously marked by [`begin_remove`](Self::begin_remove).
    /// Returns whether anything was removed.
    pub fn finish_remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !(e.id == id && e.removing));
        self.entries.len() != before
    }

    pub fn update_field(&mut self, id: Uuid, field: EntryField, value: String) -> Result<(), ScheduleFormError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ScheduleFormError::EntryNotFound(id))?;
        entry.set_field(field, value);
        Ok(())
    }

    /// Headings of all entries in display order
    pub fn labels(&self) -> Vec<String> {
        (0..self.entries.len()).map(entry_label).collect()
    }

    /// Check the form before submission.
    ///
    /// Every entry whose end time is not after its start time yields its own
    /// error, in display order. Entries fading out are not submitted and are
    /// skipped, but keep their place in the numbering.
    pub fn validate(&self) -> Result<(), Vec<ScheduleFormError>> {
        if self.entries.is_empty() {
            return Err(vec![ScheduleFormError::NoEntries]);
        }

        let errors: Vec<ScheduleFormError> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.removing && !entry.has_valid_time_order())
            .map(|(index, _)| ScheduleFormError::EndNotAfterStart { index: index + 1 })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for ScheduleEntryForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(form: &mut ScheduleEntryForm, index: usize, from: &str, to: &str) {
        let id = form.entries()[index].id;
        form.update_field(id, EntryField::TimeFrom, from.to_string()).unwrap();
        form.update_field(id, EntryField::TimeTo, to.to_string()).unwrap();
    }

    #[test]
    fn test_new_form_has_one_entry() {
        let form = ScheduleEntryForm::new();
        assert_eq!(form.len(), 1);
        assert_eq!(form.labels(), vec!["Schedule Entry"]);
    }

    #[test]
    fn test_add_entry_numbers_sequentially() {
        let mut form = ScheduleEntryForm::new();
        let second = form.add_entry();
        form.add_entry();

        assert_eq!(form.len(), 3);
        assert_eq!(form.position(second), Some(1));
        assert_eq!(form.labels(), vec!["Schedule Entry", "Schedule Entry 2", "Schedule Entry 3"]);
    }

    #[test]
    fn test_cannot_remove_last_entry() {
        let mut form = ScheduleEntryForm::new();
        let only = form.entries()[0].id;

        assert_eq!(form.begin_remove(only), Err(ScheduleFormError::LastEntry));
        assert!(!form.finish_remove(only));
        assert_eq!(form.len(), 1);
        assert_eq!(
            ScheduleFormError::LastEntry.to_string(),
            "You must have at least one schedule entry."
        );
    }

    #[test]
    fn test_remove_middle_entry_renumbers() {
        let mut form = ScheduleEntryForm::new();
        let first = form.entries()[0].id;
        let second = form.add_entry();
        let third = form.add_entry();

        form.begin_remove(second).unwrap();
        assert!(form.finish_remove(second));

        assert_eq!(form.len(), 2);
        assert_eq!(form.entries()[0].id, first);
        assert_eq!(form.entries()[1].id, third);
        assert_eq!(form.labels(), vec!["Schedule Entry", "Schedule Entry 2"]);
    }

    #[test]
    fn test_fading_entries_count_towards_guard() {
        let mut form = ScheduleEntryForm::new();
        let first = form.entries()[0].id;
        let second = form.add_entry();

        form.begin_remove(second).unwrap();
        // Still two blocks on screen, but only one that is staying
        assert_eq!(form.len(), 2);
        assert_eq!(form.begin_remove(first), Err(ScheduleFormError::LastEntry));

        assert!(form.finish_remove(second));
        assert!(!form.finish_remove(second));
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn test_finish_remove_ignores_unmarked_entries() {
        let mut form = ScheduleEntryForm::new();
        let second = form.add_entry();
        assert!(!form.finish_remove(second));
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn test_unknown_entry() {
        let mut form = ScheduleEntryForm::new();
        form.add_entry();
        let stranger = Uuid::new_v4();
        assert_eq!(form.begin_remove(stranger), Err(ScheduleFormError::EntryNotFound(stranger)));
        assert!(form.update_field(stranger, EntryField::Room, "RTL223".to_string()).is_err());
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let mut form = ScheduleEntryForm::new();
        form.add_entry();
        timed(&mut form, 0, "08:00", "09:00");
        timed(&mut form, 1, "10:00", "09:00");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![ScheduleFormError::EndNotAfterStart { index: 2 }]);
        assert_eq!(errors[0].to_string(), "Schedule Entry 2: End time must be after start time.");
    }

    #[test]
    fn test_validate_reports_every_invalid_entry() {
        let mut form = ScheduleEntryForm::new();
        form.add_entry();
        form.add_entry();
        timed(&mut form, 0, "10:00", "10:00");
        timed(&mut form, 1, "07:30", "09:00");
        timed(&mut form, 2, "15:00", "13:00");

        assert_eq!(
            form.validate(),
            Err(vec![
                ScheduleFormError::EndNotAfterStart { index: 1 },
                ScheduleFormError::EndNotAfterStart { index: 3 },
            ])
        );
    }

    #[test]
    fn test_validate_ignores_missing_times() {
        let mut form = ScheduleEntryForm::new();
        timed(&mut form, 0, "10:00", "");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_validate_empty_form() {
        let form = ScheduleEntryForm { entries: Vec::new() };
        assert_eq!(form.validate(), Err(vec![ScheduleFormError::NoEntries]));
    }

    #[test]
    fn test_validate_skips_fading_entries() {
        let mut form = ScheduleEntryForm::new();
        let second = form.add_entry();
        form.add_entry();
        timed(&mut form, 0, "08:00", "09:00");
        timed(&mut form, 1, "11:00", "10:00");
        timed(&mut form, 2, "14:00", "13:00");

        form.begin_remove(second).unwrap();
        assert_eq!(form.validate(), Err(vec![ScheduleFormError::EndNotAfterStart { index: 3 }]));

        assert!(form.finish_remove(second));
        assert_eq!(form.validate(), Err(vec![ScheduleFormError::EndNotAfterStart { index: 2 }]));
    }

    #[test]
    fn test_form_names_use_array_syntax() {
        assert_eq!(EntryField::Department.form_name(), "department[]");
        assert_eq!(EntryField::Day.form_name(), "day[]");
        assert_eq!(EntryField::TimeTo.form_name(), "time_to[]");

        let mut entry = ScheduleEntry::new();
        entry.set_field(EntryField::Section, "G7-AP4".to_string());
        assert_eq!(entry.field(EntryField::Section), "G7-AP4");
    }

    #[test]
    fn test_catalogues() {
        assert_eq!(Department::from_code("cnahs"), Some(Department::Cnahs));
        assert_eq!(Department::from_code("All"), None);
        assert_eq!(
            Department::from_label("College of Computer Studies"),
            Some(Department::Ccs)
        );
        assert_eq!(Department::from_code_or_label("ccj"), Some(Department::Ccj));
        assert_eq!(
            Department::from_code_or_label(" College of Engineering and Architecture "),
            Some(Department::Cea)
        );
        assert_eq!(Department::from_code_or_label("Registrar"), None);
        assert_eq!(Department::Ccs.label(), "College of Computer Studies");
        assert_eq!(YearLevel::Third.label(), "3rd Year");
        assert_eq!(Weekday::from_name("friday"), Some(Weekday::Friday));
        assert_eq!(EntryStatus::OutOfWork.value(), "Out of work");
        assert_eq!(
            serde_json::to_string(&EntryStatus::OutOfWork).unwrap(),
            "\"Out of work\""
        );
    }
}

pub mod holiday_calendar;
pub mod holiday_list;
pub mod schedule_builder;
pub mod schedule_table;
pub mod status_selector;
pub mod toast;
pub mod user_filter;

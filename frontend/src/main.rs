mod components;
mod hooks;
mod services;

use anyhow::Result;
use shared::{UserFilterTab, UserStatus};
use yew::AttrValue;

use components::holiday_calendar::{HolidayCalendar, HolidayCalendarProps};
use components::holiday_list::{HolidayList, HolidayListProps};
use components::schedule_builder::{ScheduleBuilder, ScheduleBuilderProps};
use components::schedule_table::{ScheduleTable, ScheduleTableProps};
use components::status_selector::{StatusSelector, StatusSelectorProps};
use components::user_filter::{UserFilterTabs, UserFilterTabsProps};
use services::api::ApiClient;
use services::dom;
use services::logging::Logger;

const SCHEDULE_BUILDER_ROOT: &str = "scheduleBuilderRoot";
const CALENDAR_ROOT: &str = "calendarRoot";
const HOLIDAY_LIST_ROOT: &str = "holidayListRoot";
const STATUS_SELECTOR_ROOT: &str = "statusSelectorRoot";
const SCHEDULE_TABLE_ROOT: &str = "scheduleTableRoot";
const USER_FILTER_ROOT: &str = "userFilterRoot";

/// Mount every widget whose root element is present on the page.
///
/// Anything a widget needs from the server-rendered markup is read before
/// mounting, since rendering replaces the root's children.
fn mount_widgets() -> Result<Vec<&'static str>> {
    let config = dom::read_config();
    let api_client = ApiClient::from_config(&config);
    let mut mounted = Vec::new();

    if let Some(root) = dom::element_by_id(SCHEDULE_BUILDER_ROOT) {
        let props = ScheduleBuilderProps {
            config: config.clone(),
            action: root.get_attribute("data-action").unwrap_or_default().into(),
            csrf_token: dom::cookie(&config.csrf_cookie_name).map(AttrValue::from),
        };
        yew::Renderer::<ScheduleBuilder>::with_root_and_props(root, props).render();
        mounted.push(SCHEDULE_BUILDER_ROOT);
    }

    if let Some(root) = dom::element_by_id(CALENDAR_ROOT) {
        let props = HolidayCalendarProps {
            api_client: api_client.clone(),
            config: config.clone(),
        };
        yew::Renderer::<HolidayCalendar>::with_root_and_props(root, props).render();
        mounted.push(CALENDAR_ROOT);
    }

    if let Some(root) = dom::element_by_id(HOLIDAY_LIST_ROOT) {
        let props = HolidayListProps {
            api_client: api_client.clone(),
        };
        yew::Renderer::<HolidayList>::with_root_and_props(root, props).render();
        mounted.push(HOLIDAY_LIST_ROOT);
    }

    if let Some(root) = dom::element_by_id(STATUS_SELECTOR_ROOT) {
        let initial_status = root
            .get_attribute("data-status")
            .and_then(|value| UserStatus::from_value(&value))
            .unwrap_or_default();
        let props = StatusSelectorProps {
            api_client: api_client.clone(),
            config: config.clone(),
            initial_status,
        };
        yew::Renderer::<StatusSelector>::with_root_and_props(root, props).render();
        mounted.push(STATUS_SELECTOR_ROOT);
    }

    if let Some(root) = dom::element_by_id(SCHEDULE_TABLE_ROOT) {
        let rows = dom::read_schedule_rows(&root)?;
        let query = dom::read_schedule_query(&root);
        let props = ScheduleTableProps {
            api_client: api_client.clone(),
            config: config.clone(),
            rows,
            query,
        };
        yew::Renderer::<ScheduleTable>::with_root_and_props(root, props).render();
        mounted.push(SCHEDULE_TABLE_ROOT);
    }

    if let Some(root) = dom::element_by_id(USER_FILTER_ROOT) {
        let mut tabs = dom::read_filter_tabs(&root)?;
        if tabs.is_empty() {
            tabs = UserFilterTab::defaults();
        }
        yew::Renderer::<UserFilterTabs>::with_root_and_props(root, UserFilterTabsProps { tabs }).render();
        mounted.push(USER_FILTER_ROOT);
    }

    Ok(mounted)
}

fn main() {
    match mount_widgets() {
        Ok(mounted) => Logger::info_with_component("main", &format!("Mounted widgets: {:?}", mounted)),
        Err(e) => Logger::error_with_component("main", &format!("Failed to mount widgets: {:#}", e)),
    }
}

use shared::calendar::{build_month_grid, tooltip_position, WEEKDAY_HEADERS};
use shared::{CalendarCell, Rect, WidgetConfig};
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use crate::hooks::use_calendar::use_calendar;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::dom;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct HolidayCalendarProps {
    pub api_client: ApiClient,
    pub config: WidgetConfig,
}

/// The holiday cell under the pointer, if any
fn hovered_holiday(event: &MouseEvent) -> Option<(String, Element)> {
    let target: Element = event.target_dyn_into()?;
    let cell = target.closest("td.holiday").ok()??;
    let date = cell.get_attribute("data-date")?;
    Some((date, cell))
}

fn render_cell(cell: &CalendarCell) -> Html {
    let class = classes!(
        cell.is_holiday.then_some("holiday"),
        cell.is_today.then_some("current-day")
    );
    let date = if cell.is_holiday { cell.iso_date.clone() } else { None };

    html! {
        <td {class} data-date={date}>
            { cell.day.map(|d| d.to_string()).unwrap_or_default() }
        </td>
    }
}

#[function_component(HolidayCalendar)]
pub fn holiday_calendar(props: &HolidayCalendarProps) -> Html {
    let today = *use_memo((), |_| date_utils::today());
    let calendar = use_calendar(&props.api_client, today);
    let tooltip = use_state_eq(|| Option::<(String, Rect)>::None);
    let tooltip_ref = use_node_ref();

    // Measure the tooltip once its text is in place, then move it above the cell
    {
        let tooltip_ref = tooltip_ref.clone();
        let offset = props.config.tooltip_offset_px;
        use_effect_with((*tooltip).clone(), move |shown| {
            if let (Some((_, target)), Some(element)) = (shown, tooltip_ref.cast::<Element>()) {
                let own = dom::bounding_rect(&element);
                let (top, left) = tooltip_position(*target, own.width, own.height, offset);
                if let Err(e) = dom::set_position(&element, top, left) {
                    Logger::warn_with_component("calendar", &e.to_string());
                }
            }
            || ()
        });
    }

    let on_mouse_move = {
        let tooltip = tooltip.clone();
        let holidays = calendar.state.holidays.clone();
        Callback::from(move |event: MouseEvent| {
            let shown = hovered_holiday(&event).and_then(|(date, cell)| {
                let text = holidays.tooltip_text(&date)?;
                Some((text, dom::bounding_rect(&cell)))
            });
            tooltip.set(shown);
        })
    };

    let on_mouse_leave = {
        let tooltip = tooltip.clone();
        Callback::from(move |_: MouseEvent| tooltip.set(None))
    };

    let state = &calendar.state;
    let weeks = build_month_grid(state.view, state.today, &state.holidays);
    let tooltip_text = tooltip.as_ref().map(|(text, _)| text.clone()).unwrap_or_default();

    html! {
        <div class="calendar">
            <div class="calendar-header">
                <button type="button" id="prevMonth" class="calendar-nav" onclick={calendar.actions.prev_month.clone()}>
                    { "‹" }
                </button>
                <h3 id="monthYear">{ state.view.title() }</h3>
                <button type="button" id="nextMonth" class="calendar-nav" onclick={calendar.actions.next_month.clone()}>
                    { "›" }
                </button>
            </div>
            <table class="calendar-table">
                <thead>
                    <tr>
                        { for WEEKDAY_HEADERS.iter().map(|day| html! { <th>{ *day }</th> }) }
                    </tr>
                </thead>
                <tbody id="calendarBody" onmousemove={on_mouse_move} onmouseleave={on_mouse_leave}>
                    { for weeks.iter().map(|week| html! {
                        <tr>{ for week.iter().map(render_cell) }</tr>
                    }) }
                </tbody>
            </table>
            <div
                id="holidayTooltip"
                class={classes!("holiday-tooltip", tooltip.is_some().then_some("visible"))}
                ref={tooltip_ref}
            >
                { tooltip_text }
            </div>
        </div>
    }
}

use chrono::NaiveDate;
use shared::{CalendarView, HolidayMap, RequestSequencer};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub view: CalendarView,
    pub today: NaiveDate,
    /// Holidays of the displayed month
    pub holidays: HolidayMap,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
}

/// Displayed month plus its holidays, re-fetched on every navigation.
///
/// Overlapping fetches are sequenced: only the response to the most recent
/// request is applied. A failed fetch shows the month without holidays.
#[hook]
pub fn use_calendar(api_client: &ApiClient, today: NaiveDate) -> UseCalendarResult {
    let view = use_state_eq(|| CalendarView::containing(today));
    let holidays = use_state_eq(HolidayMap::new);
    let sequencer = use_mut_ref(RequestSequencer::new);

    {
        let api_client = api_client.clone();
        let holidays = holidays.clone();
        let sequencer = sequencer.clone();

        use_effect_with(*view, move |view| {
            let view = *view;
            let token = sequencer.borrow_mut().issue();

            spawn_local(async move {
                let loaded = match api_client.get_month_holidays(view).await {
                    Ok(records) => HolidayMap::from_records(&records),
                    Err(e) => {
                        Logger::warn_with_component(
                            "calendar",
                            &format!("Failed to load holidays for {}: {}", view.title(), e),
                        );
                        HolidayMap::new()
                    }
                };

                if sequencer.borrow().is_current(token) {
                    holidays.set(loaded);
                } else {
                    Logger::debug_with_component(
                        "calendar",
                        &format!("Discarding stale holidays for {}", view.title()),
                    );
                }
            });

            || ()
        });
    }

    let prev_month = {
        let view = view.clone();
        use_callback(*view, move |_: MouseEvent, current| {
            view.set(current.previous());
        })
    };

    let next_month = {
        let view = view.clone();
        use_callback(*view, move |_: MouseEvent, current| {
            view.set(current.next());
        })
    };

    let state = CalendarState {
        view: *view,
        today,
        holidays: (*holidays).clone(),
    };

    let actions = UseCalendarActions {
        prev_month,
        next_month,
    };

    UseCalendarResult { state, actions }
}

use shared::UpcomingHoliday;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
enum ListState {
    Loading,
    Loaded(Vec<UpcomingHoliday>),
    Failed,
}

#[derive(Properties, PartialEq)]
pub struct HolidayListProps {
    pub api_client: ApiClient,
}

/// Upcoming holidays, fetched once when the widget mounts
#[function_component(HolidayList)]
pub fn holiday_list(props: &HolidayListProps) -> Html {
    let list_state = use_state(|| ListState::Loading);

    {
        let api_client = props.api_client.clone();
        let list_state = list_state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.get_upcoming_holidays().await {
                    Ok(holidays) => list_state.set(ListState::Loaded(holidays)),
                    Err(e) => {
                        Logger::error_with_component("holiday_list", &format!("Error loading holidays: {}", e));
                        list_state.set(ListState::Failed);
                    }
                }
            });
            || ()
        });
    }

    render_list(&list_state)
}

fn render_list(state: &ListState) -> Html {
    match state {
        ListState::Loading => html! { <p class="loading">{ "Loading holidays..." }</p> },
        ListState::Failed => html! { <p class="error">{ "Error loading holidays" }</p> },
        ListState::Loaded(holidays) if holidays.is_empty() => html! { <p>{ "No upcoming holidays" }</p> },
        ListState::Loaded(holidays) => html! {
            <ul class="holiday-items">
                { for holidays.iter().map(|holiday| html! {
                    <li class="holiday-item">
                        <span class="holiday-date">{ holiday.formatted_date() }</span>
                        <span class="holiday-desc">{ holiday.description.clone() }</span>
                    </li>
                }) }
            </ul>
        },
    }
}

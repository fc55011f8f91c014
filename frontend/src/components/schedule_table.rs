//! Professor schedule table with its department, time, day and search facets.

use std::rc::Rc;

use gloo::events::EventListener;
use gloo::utils::document;
use shared::schedule_filter::COLUMN_HEADINGS;
use shared::{
    professor_schedule_path, Department, FilterState, ScheduleQuery, ScheduleRow, TimeBucket, Weekday, WidgetConfig,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::hooks::use_timeout::use_timeout;
use crate::services::api::ApiClient;
use crate::services::dom;
use crate::services::logging::Logger;

const COMPONENT: &str = "schedule_table";
const ALL_DEPARTMENTS: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facet {
    Department,
    Time,
    Day,
}

enum TableAction {
    ToggleMenu(Facet),
    CloseMenus,
    /// A click anywhere on the page
    PageClick { inside_dropdown: bool },
    Department(String),
    AllTimes(bool),
    Time(TimeBucket, bool),
    AllDays(bool),
    Day(Weekday, bool),
    Search(String),
}

#[derive(Clone, PartialEq, Default)]
struct TableModel {
    filter: FilterState,
    open_menu: Option<Facet>,
}

impl Reducible for TableModel {
    type Action = TableAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TableAction::ToggleMenu(facet) => {
                next.open_menu = if next.open_menu == Some(facet) { None } else { Some(facet) };
            }
            TableAction::CloseMenus => next.open_menu = None,
            TableAction::PageClick { inside_dropdown } => {
                if next.open_menu.is_none() || inside_dropdown {
                    return self;
                }
                next.open_menu = None;
            }
            TableAction::Department(code) => next.filter.select_department(&code),
            TableAction::AllTimes(checked) => {
                next.filter.times.set_all(checked);
                // The "All" box snaps back to checked when unchecked, which needs a render
                return Rc::new(next);
            }
            TableAction::Time(bucket, checked) => next.filter.times.set(bucket, checked),
            TableAction::AllDays(checked) => {
                next.filter.days.set_all(checked);
                return Rc::new(next);
            }
            TableAction::Day(day, checked) => next.filter.days.set(day, checked),
            TableAction::Search(query) => next.filter.query = query,
        }
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

fn checkbox_checked(event: &Event) -> bool {
    event.target_unchecked_into::<HtmlInputElement>().checked()
}

#[derive(Properties, PartialEq)]
pub struct ScheduleTableProps {
    pub api_client: ApiClient,
    pub config: WidgetConfig,
    /// Rows rendered by the server; fetched from the API when empty
    #[prop_or_default]
    pub rows: Vec<ScheduleRow>,
    /// Server-side narrowing for the API fallback
    #[prop_or_default]
    pub query: ScheduleQuery,
}

#[function_component(ScheduleTable)]
pub fn schedule_table(props: &ScheduleTableProps) -> Html {
    let rows = use_state(|| props.rows.clone());
    let model = use_reducer(TableModel::default);
    let department_choice = use_state_eq(|| Option::<String>::None);
    let department_timer = use_timeout();

    {
        let rows = rows.clone();
        let api_client = props.api_client.clone();
        let needs_fetch = props.rows.is_empty();
        let query = props.query.clone();
        use_effect_with((), move |_| {
            if needs_fetch {
                spawn_local(async move {
                    match api_client.get_schedules(&query).await {
                        Ok(response) => {
                            Logger::info_with_component(
                                COMPONENT,
                                &format!("Loaded {} schedules", response.schedules.len()),
                            );
                            rows.set(response.schedules.iter().map(ScheduleRow::from_record).collect());
                        }
                        Err(e) => Logger::error_with_component(COMPONENT, &format!("Failed to load schedules: {}", e)),
                    }
                });
            }
            || ()
        });
    }

    {
        let dispatcher = model.dispatcher();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&document(), "click", move |event| {
                let inside_dropdown = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|element| element.closest(".filter-dropdown").ok().flatten())
                    .is_some();
                dispatcher.dispatch(TableAction::PageClick { inside_dropdown });
            });
            move || drop(listener)
        });
    }

    let toggle_menu = |facet: Facet| {
        let dispatcher = model.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(TableAction::ToggleMenu(facet)))
    };

    let choose_department = |code: &str| {
        let dispatcher = model.dispatcher();
        let department_choice = department_choice.clone();
        let department_timer = department_timer.clone();
        let delay = props.config.filter_delay_ms;
        let code = code.to_string();
        Callback::from(move |_: MouseEvent| {
            dispatcher.dispatch(TableAction::CloseMenus);
            let mut caption = FilterState::new();
            caption.select_department(&code);
            department_choice.set(caption.department);

            let dispatcher = dispatcher.clone();
            let code = code.clone();
            department_timer.schedule(delay, move || dispatcher.dispatch(TableAction::Department(code)));
        })
    };

    let on_search = {
        let dispatcher = model.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(TableAction::Search(input.value()));
        })
    };

    let filter = &model.filter;
    let department_caption = {
        let mut pending = filter.clone();
        pending.department = (*department_choice).clone();
        pending.department_caption()
    };
    let is_open = |facet: Facet| model.open_menu == Some(facet);
    let visibility = filter.visibility(&rows);
    let visible_count = visibility.iter().filter(|v| **v).count();

    let department_menu = html! {
        <div class="filter-dropdown">
            <button type="button" id="departmentDropdownButton" class="dropdown-button" onclick={toggle_menu(Facet::Department)}>
                <span id="selectedDepartment">{ department_caption }</span>
            </button>
            <div id="departmentDropdownMenu" class={classes!("dropdown-menu", is_open(Facet::Department).then_some("show"))}>
                <button type="button" data-department={ALL_DEPARTMENTS} onclick={choose_department(ALL_DEPARTMENTS)}>
                    { "All Departments" }
                </button>
                { for Department::ALL.iter().map(|department| html! {
                    <button type="button" data-department={department.code()} onclick={choose_department(department.code())}>
                        { department.label() }
                    </button>
                }) }
            </div>
        </div>
    };

    let time_menu = {
        let on_all = {
            let dispatcher = model.dispatcher();
            Callback::from(move |e: Event| dispatcher.dispatch(TableAction::AllTimes(checkbox_checked(&e))))
        };
        html! {
            <div class="filter-dropdown">
                <button type="button" id="timeDropdownButton" class="dropdown-button" onclick={toggle_menu(Facet::Time)}>
                    <span id="selectedTime">{ filter.time_caption() }</span>
                </button>
                <div id="timeDropdownMenu" class={classes!("dropdown-menu", is_open(Facet::Time).then_some("show"))}>
                    <label>
                        <input type="checkbox" id="allTimesCheckbox" class="time-checkbox" data-time="all"
                            checked={filter.times.is_all()} onchange={on_all} />
                        { "All Times" }
                    </label>
                    { for TimeBucket::selectable().into_iter().map(|bucket| {
                        let dispatcher = model.dispatcher();
                        let onchange = Callback::from(move |e: Event| {
                            dispatcher.dispatch(TableAction::Time(bucket, checkbox_checked(&e)))
                        });
                        html! {
                            <label>
                                <input type="checkbox" class="time-checkbox" data-time={bucket.0.to_string()}
                                    checked={filter.times.contains(&bucket)} {onchange} />
                                { bucket.label() }
                            </label>
                        }
                    }) }
                </div>
            </div>
        }
    };

    let day_menu = {
        let on_all = {
            let dispatcher = model.dispatcher();
            Callback::from(move |e: Event| dispatcher.dispatch(TableAction::AllDays(checkbox_checked(&e))))
        };
        html! {
            <div class="filter-dropdown">
                <button type="button" id="daysDropdownButton" class="dropdown-button" onclick={toggle_menu(Facet::Day)}>
                    <span id="selectedDays">{ filter.day_caption() }</span>
                </button>
                <div id="daysDropdownMenu" class={classes!("dropdown-menu", is_open(Facet::Day).then_some("show"))}>
                    <label>
                        <input type="checkbox" id="allDaysCheckbox" class="day-checkbox" data-day="all"
                            checked={filter.days.is_all()} onchange={on_all} />
                        { "All Days" }
                    </label>
                    { for Weekday::ALL.into_iter().map(|day| {
                        let dispatcher = model.dispatcher();
                        let onchange = Callback::from(move |e: Event| {
                            dispatcher.dispatch(TableAction::Day(day, checkbox_checked(&e)))
                        });
                        html! {
                            <label>
                                <input type="checkbox" class="day-checkbox" data-day={day.name()}
                                    checked={filter.days.contains(&day)} {onchange} />
                                { day.name() }
                            </label>
                        }
                    }) }
                </div>
            </div>
        }
    };

    html! {
        <div class="schedule-table-widget">
            <div class="filter-bar">
                { department_menu }
                { time_menu }
                { day_menu }
                <input type="text" id="searchInput" class="search-input" placeholder="Search schedules..."
                    value={filter.query.clone()} oninput={on_search} />
            </div>
            <table class="schedule-table">
                <thead>
                    <tr>
                        { for COLUMN_HEADINGS.iter().map(|heading| html! { <th>{ *heading }</th> }) }
                    </tr>
                </thead>
                <tbody id="scheduleTableBody">
                    { for rows.iter().zip(visibility.iter()).map(|(row, visible)| {
                        let onclick = row.professor_id.clone().map(|professor_id| {
                            Callback::from(move |_: MouseEvent| {
                                let path = professor_schedule_path(&professor_id);
                                Logger::info_with_component(COMPONENT, &format!("Opening {}", path));
                                if let Err(e) = dom::navigate(&path) {
                                    Logger::error_with_component(COMPONENT, &e.to_string());
                                }
                            })
                        });
                        html! {
                            <tr
                                class={classes!("schedule-row", onclick.is_some().then_some("clickable"))}
                                data-professor-id={row.professor_id.clone()}
                                data-department={row.department.clone()}
                                data-day={row.day.clone()}
                                data-search={row.search_text.clone()}
                                style={(!*visible).then_some("display: none")}
                                {onclick}
                            >
                                { for row.cells.iter().map(|cell| html! { <td>{ cell.clone() }</td> }) }
                            </tr>
                        }
                    }) }
                    if visible_count == 0 {
                        <tr class="empty-row">
                            <td colspan={COLUMN_HEADINGS.len().to_string()}>{ "No schedules found." }</td>
                        </tr>
                    }
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn apply(model: TableModel, actions: Vec<TableAction>) -> TableModel {
        let mut current = Rc::new(model);
        for action in actions {
            current = current.reduce(action);
        }
        (*current).clone()
    }

    #[wasm_bindgen_test]
    fn test_opening_one_menu_closes_the_others() {
        let model = apply(
            TableModel::default(),
            vec![TableAction::ToggleMenu(Facet::Department), TableAction::ToggleMenu(Facet::Day)],
        );
        assert_eq!(model.open_menu, Some(Facet::Day));

        let model = apply(model, vec![TableAction::ToggleMenu(Facet::Day)]);
        assert_eq!(model.open_menu, None);
    }

    #[wasm_bindgen_test]
    fn test_page_click_outside_closes_menu() {
        let model = apply(TableModel::default(), vec![TableAction::ToggleMenu(Facet::Time)]);
        let model = apply(model, vec![TableAction::PageClick { inside_dropdown: true }]);
        assert_eq!(model.open_menu, Some(Facet::Time));
        let model = apply(model, vec![TableAction::PageClick { inside_dropdown: false }]);
        assert_eq!(model.open_menu, None);
    }

    #[wasm_bindgen_test]
    fn test_all_checkbox_clears_specific_times() {
        let model = apply(
            TableModel::default(),
            vec![
                TableAction::Time(TimeBucket(9), true),
                TableAction::Time(TimeBucket(10), true),
            ],
        );
        assert_eq!(model.filter.time_caption(), "2 times selected");

        let model = apply(model, vec![TableAction::AllTimes(true)]);
        assert!(model.filter.times.is_all());
        assert_eq!(model.filter.time_caption(), "All Times");
    }

    #[wasm_bindgen_test]
    fn test_department_and_search_actions() {
        let model = apply(
            TableModel::default(),
            vec![
                TableAction::Department("CCS".to_string()),
                TableAction::Search("Santos".to_string()),
                TableAction::Day(Weekday::Monday, true),
            ],
        );
        assert_eq!(model.filter.department.as_deref(), Some("CCS"));
        assert_eq!(model.filter.query, "Santos");
        assert_eq!(model.filter.day_caption(), "Monday");

        let model = apply(model, vec![TableAction::Department(ALL_DEPARTMENTS.to_string())]);
        assert_eq!(model.filter.department, None);
    }

    #[wasm_bindgen_test]
    fn test_unchecking_all_still_renders() {
        let before = Rc::new(TableModel::default());
        let after = before.clone().reduce(TableAction::AllTimes(false));
        assert!(!Rc::ptr_eq(&before, &after));
        assert!(after.filter.times.is_all());

        let after = before.clone().reduce(TableAction::AllDays(false));
        assert!(!Rc::ptr_eq(&before, &after));
        assert!(after.filter.days.is_all());

        let closed = before.clone().reduce(TableAction::CloseMenus);
        assert!(Rc::ptr_eq(&before, &closed));
    }

    #[wasm_bindgen_test]
    async fn test_rows_without_professor_id_are_not_links() {
        let root = document().create_element("div").unwrap();
        document().body().unwrap().append_child(&root).unwrap();
        let linked = ScheduleRow::new(
            Some("7".to_string()),
            "CCS",
            "Monday",
            "Santos CSIT104",
            vec!["Santos".into(), "CCS".into(), "09:00 AM - 10:30 AM".into(), "Monday".into()],
        );
        let unlinked = ScheduleRow::new(
            None,
            "CEA",
            "Friday",
            "Lim CE101",
            vec!["Lim".into(), "CEA".into(), "07:30 AM - 09:00 AM".into(), "Friday".into()],
        );
        let props = ScheduleTableProps {
            api_client: ApiClient::from_config(&WidgetConfig::default()),
            config: WidgetConfig::default(),
            rows: vec![linked, unlinked],
            query: ScheduleQuery::default(),
        };
        yew::Renderer::<ScheduleTable>::with_root_and_props(root.clone(), props).render();
        gloo::timers::future::TimeoutFuture::new(0).await;

        let rows = root.query_selector_all("tr.schedule-row").unwrap();
        assert_eq!(rows.length(), 2);
        let first = rows.item(0).unwrap().dyn_into::<Element>().unwrap();
        let second = rows.item(1).unwrap().dyn_into::<Element>().unwrap();
        assert_eq!(first.get_attribute("data-professor-id").as_deref(), Some("7"));
        assert_eq!(first.get_attribute("data-search").as_deref(), Some("santos csit104"));
        assert!(first.class_list().contains("clickable"));
        assert_eq!(second.get_attribute("data-professor-id"), None);
        assert!(!second.class_list().contains("clickable"));
        root.remove();
    }
}

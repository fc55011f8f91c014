//! Repeatable schedule-entry blocks submitted as one native form.

use std::rc::Rc;

use gloo::dialogs::alert;
use shared::schedule_entry::entry_label;
use shared::{Department, EntryField, EntryStatus, ScheduleEntry, ScheduleEntryForm, Weekday, WidgetConfig, YearLevel};
use uuid::Uuid;
use web_sys::{
    Element, HtmlInputElement, HtmlSelectElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::hooks::use_timeout::{use_keyed_timeouts, use_timeout};
use crate::services::logging::Logger;

const COMPONENT: &str = "schedule_builder";

const FADE_OUT_KEYFRAMES: &str = "@keyframes fadeOut {
    from { opacity: 1; transform: translateY(0); }
    to { opacity: 0; transform: translateY(-10px); }
}";

enum BuilderAction {
    Add,
    BeginRemove(Uuid),
    FinishRemove(Uuid),
    Update(Uuid, EntryField, String),
}

#[derive(Clone, PartialEq)]
struct BuilderModel(ScheduleEntryForm);

impl Reducible for BuilderModel {
    type Action = BuilderAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut form = self.0.clone();
        let changed = match action {
            BuilderAction::Add => {
                form.add_entry();
                true
            }
            BuilderAction::BeginRemove(id) => form.begin_remove(id).is_ok(),
            BuilderAction::FinishRemove(id) => form.finish_remove(id),
            BuilderAction::Update(id, field, value) => form.update_field(id, field, value).is_ok(),
        };
        if changed {
            Rc::new(BuilderModel(form))
        } else {
            self
        }
    }
}

type FieldChange = (Uuid, EntryField, String);

fn text_input(entry: &ScheduleEntry, field: EntryField, input_type: &'static str, placeholder: Option<&'static str>, on_field: &Callback<FieldChange>) -> Html {
    let id = entry.id;
    let oninput = on_field.reform(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        (id, field, input.value())
    });

    html! {
        <input
            type={input_type}
            name={field.form_name()}
            placeholder={placeholder}
            value={entry.field(field).to_string()}
            required={true}
            disabled={entry.removing}
            {oninput}
        />
    }
}

fn select_input(
    entry: &ScheduleEntry,
    field: EntryField,
    placeholder: &'static str,
    options: Vec<(String, String)>,
    on_field: &Callback<FieldChange>,
) -> Html {
    let id = entry.id;
    let onchange = on_field.reform(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        (id, field, select.value())
    });
    let current = entry.field(field).to_string();

    html! {
        <select name={field.form_name()} required={true} disabled={entry.removing} {onchange}>
            <option value="" selected={current.is_empty()}>{ placeholder }</option>
            { for options.into_iter().map(|(value, label)| html! {
                <option selected={current == value} value={value.clone()}>{ label }</option>
            }) }
        </select>
    }
}

fn department_options() -> Vec<(String, String)> {
    Department::ALL
        .iter()
        .map(|d| (d.code().to_string(), d.label().to_string()))
        .collect()
}

fn year_level_options() -> Vec<(String, String)> {
    YearLevel::ALL.iter().map(|y| (y.value().to_string(), y.label())).collect()
}

fn day_options() -> Vec<(String, String)> {
    Weekday::ALL
        .iter()
        .map(|d| (d.name().to_string(), d.name().to_string()))
        .collect()
}

fn status_options() -> Vec<(String, String)> {
    EntryStatus::ALL
        .iter()
        .map(|s| (s.value().to_string(), s.value().to_string()))
        .collect()
}

fn render_entry(
    entry: &ScheduleEntry,
    index: usize,
    fade_out_ms: u32,
    on_field: &Callback<FieldChange>,
    on_remove: &Callback<Uuid>,
) -> Html {
    let id = entry.id;
    let onclick = on_remove.reform(move |_: MouseEvent| id);
    let style = entry
        .removing
        .then(|| format!("animation: fadeOut {}ms ease-out forwards", fade_out_ms));

    html! {
        <div key={id.to_string()} class="schedule-entry" {style}>
            <div class="entry-header">
                <h3>{ entry_label(index) }</h3>
                <button type="button" class="remove-btn" disabled={entry.removing} {onclick}>
                    <svg viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
                        <path d="M18 6L6 18M6 6L18 18" stroke="currentColor" stroke-width="2" stroke-linecap="round"/>
                    </svg>
                </button>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>{ "Department" }</label>
                    { select_input(entry, EntryField::Department, "Select Department", department_options(), on_field) }
                </div>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>{ "Subject Code" }</label>
                    { text_input(entry, EntryField::SubjectCode, "text", Some("e.g. CSIT104"), on_field) }
                </div>
                <div class="form-group">
                    <label>{ "Subject Name" }</label>
                    { text_input(entry, EntryField::SubjectName, "text", Some("e.g. Programming Fundamentals"), on_field) }
                </div>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>{ "Section" }</label>
                    { text_input(entry, EntryField::Section, "text", Some("e.g. G7-AP4"), on_field) }
                </div>
                <div class="form-group">
                    <label>{ "Room" }</label>
                    { text_input(entry, EntryField::Room, "text", Some("e.g. RTL223"), on_field) }
                </div>
                <div class="form-group">
                    <label>{ "Year Level" }</label>
                    { select_input(entry, EntryField::YearLevel, "Select Year Level", year_level_options(), on_field) }
                </div>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>{ "Day" }</label>
                    { select_input(entry, EntryField::Day, "Select Day", day_options(), on_field) }
                </div>
                <div class="form-group">
                    <label>{ "Time Slot" }</label>
                    <div class="time-slot-group">
                        { text_input(entry, EntryField::TimeFrom, "time", None, on_field) }
                        <span class="time-separator">{ "to" }</span>
                        { text_input(entry, EntryField::TimeTo, "time", None, on_field) }
                    </div>
                </div>
                <div class="form-group">
                    <label>{ "Status" }</label>
                    { select_input(entry, EntryField::Status, "Select Status", status_options(), on_field) }
                </div>
            </div>
        </div>
    }
}

fn scroll_into_center(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[derive(Properties, PartialEq)]
pub struct ScheduleBuilderProps {
    pub config: WidgetConfig,
    /// Where the form posts to; empty posts back to the page
    #[prop_or_default]
    pub action: AttrValue,
    #[prop_or_default]
    pub csrf_token: Option<AttrValue>,
}

#[function_component(ScheduleBuilder)]
pub fn schedule_builder(props: &ScheduleBuilderProps) -> Html {
    let model = use_reducer(|| BuilderModel(ScheduleEntryForm::new()));
    let entries_ref = use_node_ref();
    let fade_timers = use_keyed_timeouts::<Uuid>();
    let scroll_timer = use_timeout();

    // Timers of entries that are gone have already fired
    {
        let fade_timers = fade_timers.clone();
        let ids: Vec<Uuid> = model.0.entries().iter().map(|e| e.id).collect();
        use_effect_with(ids, move |ids| {
            fade_timers.retain(|id| ids.contains(id));
            || ()
        });
    }

    let on_field = {
        let dispatcher = model.dispatcher();
        Callback::from(move |(id, field, value): FieldChange| {
            dispatcher.dispatch(BuilderAction::Update(id, field, value));
        })
    };

    let on_add = {
        let dispatcher = model.dispatcher();
        let entries_ref = entries_ref.clone();
        let scroll_timer = scroll_timer.clone();
        let delay = props.config.scroll_delay_ms;
        Callback::from(move |_: MouseEvent| {
            dispatcher.dispatch(BuilderAction::Add);
            let entries_ref = entries_ref.clone();
            scroll_timer.schedule(delay, move || {
                if let Some(last) = entries_ref.cast::<Element>().and_then(|c| c.last_element_child()) {
                    scroll_into_center(&last);
                }
            });
        })
    };

    let on_remove = {
        let dispatcher = model.dispatcher();
        let form = model.0.clone();
        let fade_timers = fade_timers.clone();
        let fade_out_ms = props.config.fade_out_ms;
        Callback::from(move |id: Uuid| {
            let mut trial = form.clone();
            if let Err(e) = trial.begin_remove(id) {
                alert(&e.to_string());
                return;
            }
            dispatcher.dispatch(BuilderAction::BeginRemove(id));
            let dispatcher = dispatcher.clone();
            fade_timers.schedule(id, fade_out_ms, move || {
                dispatcher.dispatch(BuilderAction::FinishRemove(id));
            });
        })
    };

    let on_submit = {
        let form = model.0.clone();
        Callback::from(move |e: SubmitEvent| match form.validate() {
            Ok(()) => Logger::info_with_component(
                COMPONENT,
                &format!("Submitting {} schedule entries", form.len()),
            ),
            Err(errors) => {
                e.prevent_default();
                for error in &errors {
                    alert(&error.to_string());
                }
            }
        })
    };

    let fade_out_ms = props.config.fade_out_ms;

    html! {
        <form id="scheduleForm" method="post" action={props.action.clone()} onsubmit={on_submit}>
            <style>{ FADE_OUT_KEYFRAMES }</style>
            if let Some(token) = props.csrf_token.clone() {
                <input type="hidden" name="csrfmiddlewaretoken" value={token} />
            }
            <div id="scheduleEntries" ref={entries_ref}>
                { for model.0.entries().iter().enumerate().map(|(index, entry)| {
                    render_entry(entry, index, fade_out_ms, &on_field, &on_remove)
                }) }
            </div>
            <div class="form-actions">
                <button type="button" class="add-btn" onclick={on_add}>{ "Add Another Schedule" }</button>
                <button type="submit" class="submit-btn">{ "Save Schedule" }</button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn apply(model: BuilderModel, action: BuilderAction) -> BuilderModel {
        (*Rc::new(model).reduce(action)).clone()
    }

    #[wasm_bindgen_test]
    fn test_remove_goes_through_fade_out() {
        let model = apply(BuilderModel(ScheduleEntryForm::new()), BuilderAction::Add);
        let second = model.0.entries()[1].id;

        let model = apply(model, BuilderAction::BeginRemove(second));
        assert_eq!(model.0.len(), 2);
        assert!(model.0.entries()[1].removing);

        let model = apply(model, BuilderAction::FinishRemove(second));
        assert_eq!(model.0.len(), 1);
        assert_eq!(model.0.labels(), vec!["Schedule Entry"]);
    }

    #[wasm_bindgen_test]
    fn test_last_entry_is_kept() {
        let model = BuilderModel(ScheduleEntryForm::new());
        let only = model.0.entries()[0].id;
        let model = apply(model, BuilderAction::BeginRemove(only));
        let model = apply(model, BuilderAction::FinishRemove(only));
        assert_eq!(model.0.len(), 1);
    }

    #[wasm_bindgen_test]
    async fn test_fading_entry_inputs_are_disabled() {
        let root = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();
        let props = ScheduleBuilderProps {
            config: WidgetConfig::default(),
            action: AttrValue::default(),
            csrf_token: None,
        };
        yew::Renderer::<ScheduleBuilder>::with_root_and_props(root.clone(), props).render();
        gloo::timers::future::TimeoutFuture::new(0).await;

        let add = root.query_selector(".add-btn").unwrap().unwrap();
        add.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
        gloo::timers::future::TimeoutFuture::new(0).await;
        let removes = root.query_selector_all(".remove-btn").unwrap();
        assert_eq!(removes.length(), 2);
        removes.item(1).unwrap().dyn_into::<web_sys::HtmlElement>().unwrap().click();
        gloo::timers::future::TimeoutFuture::new(0).await;

        let entries = root.query_selector_all(".schedule-entry").unwrap();
        assert_eq!(entries.length(), 2);
        let fading = entries.item(1).unwrap().dyn_into::<Element>().unwrap();
        let disabled = fading.query_selector_all("input:disabled, select:disabled").unwrap();
        assert_eq!(disabled.length(), 10);
        let kept = entries.item(0).unwrap().dyn_into::<Element>().unwrap();
        assert_eq!(kept.query_selector_all("input:disabled, select:disabled").unwrap().length(), 0);

        gloo::timers::future::TimeoutFuture::new(WidgetConfig::default().fade_out_ms + 50).await;
        assert_eq!(root.query_selector_all(".schedule-entry").unwrap().length(), 1);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_update_field() {
        let model = BuilderModel(ScheduleEntryForm::new());
        let id = model.0.entries()[0].id;
        let model = apply(model, BuilderAction::Update(id, EntryField::Room, "RTL223".to_string()));
        assert_eq!(model.0.entries()[0].room, "RTL223");
    }
}

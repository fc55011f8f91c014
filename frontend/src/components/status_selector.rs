use std::rc::Rc;

use gloo::events::EventListener;
use gloo::utils::document;
use shared::{StatusSelectorState, UpdateStatusRequest, UserStatus, WidgetConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent, Node};
use yew::prelude::*;

use crate::components::toast::Toast;
use crate::hooks::use_timeout::use_timeout;
use crate::services::api::ApiClient;
use crate::services::dom;
use crate::services::logging::Logger;

const COMPONENT: &str = "status_selector";

enum SelectorAction {
    Toggle,
    /// A click somewhere on the page; `inside` is whether it hit the selector
    PageClick { inside: bool },
    Select(UserStatus),
}

#[derive(Clone, PartialEq)]
struct SelectorModel(StatusSelectorState);

impl Reducible for SelectorModel {
    type Action = SelectorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            SelectorAction::Toggle => state.toggle(),
            SelectorAction::PageClick { inside } => {
                if !state.outside_click(inside) {
                    return self;
                }
            }
            SelectorAction::Select(status) => {
                state.select(status);
            }
        }
        Rc::new(SelectorModel(state))
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusSelectorProps {
    pub api_client: ApiClient,
    pub config: WidgetConfig,
    #[prop_or_default]
    pub initial_status: UserStatus,
}

/// Dropdown for the signed-in professor's availability.
///
/// A selection is shown immediately and then persisted; if persisting fails
/// only the toast reports it.
#[function_component(StatusSelector)]
pub fn status_selector(props: &StatusSelectorProps) -> Html {
    let model = use_reducer(|| SelectorModel(StatusSelectorState::new(props.initial_status)));
    let selector_ref = use_node_ref();
    let toast_message = use_state(String::new);
    let toast_visible = use_state(|| false);
    let toast_timer = use_timeout();

    // One listener for the lifetime of the widget; the reducer decides
    // whether a click closes the menu.
    {
        let dispatcher = model.dispatcher();
        let selector_ref = selector_ref.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&document(), "click", move |event| {
                let inside = match (selector_ref.cast::<Element>(), event.target()) {
                    (Some(selector), Some(target)) => selector.contains(target.dyn_ref::<Node>()),
                    _ => false,
                };
                dispatcher.dispatch(SelectorAction::PageClick { inside });
            });
            move || drop(listener)
        });
    }

    let toggle = {
        let dispatcher = model.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(SelectorAction::Toggle))
    };

    let show_toast = {
        let toast_message = toast_message.clone();
        let toast_visible = toast_visible.clone();
        let toast_timer = toast_timer.clone();
        let duration = props.config.toast_duration_ms;
        Callback::from(move |message: String| {
            toast_message.set(message);
            toast_visible.set(true);
            let toast_visible = toast_visible.clone();
            toast_timer.schedule(duration, move || toast_visible.set(false));
        })
    };

    let select = {
        let model = model.clone();
        let dispatcher = model.dispatcher();
        let api_client = props.api_client.clone();
        let config = props.config.clone();
        let show_toast = show_toast.clone();
        Callback::from(move |status: UserStatus| {
            dispatcher.dispatch(SelectorAction::Select(status));
            show_toast.emit(status.updated_message());

            let api_client = api_client.clone();
            let header = config.csrf_header_name.clone();
            let token = dom::cookie(&config.csrf_cookie_name);
            let show_toast = show_toast.clone();
            let failure_text = model.0.update_failed();
            spawn_local(async move {
                let request = UpdateStatusRequest::from(status);
                if let Err(e) = api_client.update_status(&request, &header, token.as_deref()).await {
                    Logger::error_with_component(COMPONENT, &format!("Status update failed: {}", e));
                    show_toast.emit(failure_text.to_string());
                }
            });
        })
    };

    let state = &model.0;

    html! {
        <>
            <div
                id="statusSelector"
                class={classes!("status-selector", state.is_open.then_some("active"))}
                ref={selector_ref}
            >
                <button type="button" class="current-status" onclick={toggle}>
                    <span class={state.current.dot_class()}></span>
                    <span class="status-text">{ state.current.label() }</span>
                </button>
                <div class="status-dropdown">
                    { for UserStatus::ALL.iter().map(|status| {
                        let status = *status;
                        let onclick = {
                            let select = select.clone();
                            Callback::from(move |_: MouseEvent| select.emit(status))
                        };
                        html! {
                            <div class="status-option" data-status={status.value()} {onclick}>
                                <span class={status.dot_class()}></span>
                                <span>{ status.label() }</span>
                            </div>
                        }
                    }) }
                </div>
            </div>
            <Toast message={(*toast_message).clone()} visible={*toast_visible} />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn reduce(model: SelectorModel, action: SelectorAction) -> SelectorModel {
        (*Rc::new(model).reduce(action)).clone()
    }

    #[wasm_bindgen_test]
    fn test_reducer_selects_and_closes() {
        let model = SelectorModel(StatusSelectorState::new(UserStatus::Available));
        let model = reduce(model, SelectorAction::Toggle);
        assert!(model.0.is_open);

        let model = reduce(model, SelectorAction::PageClick { inside: true });
        assert!(model.0.is_open);

        let model = reduce(model, SelectorAction::Select(UserStatus::Class));
        assert_eq!(model.0.current, UserStatus::Class);
        assert!(!model.0.is_open);
    }

    #[wasm_bindgen_test]
    fn test_reducer_page_click_closes_open_menu() {
        let model = SelectorModel(StatusSelectorState::new(UserStatus::OutOfWork));
        let model = reduce(model, SelectorAction::Toggle);
        let model = reduce(model, SelectorAction::PageClick { inside: false });
        assert!(!model.0.is_open);
        assert_eq!(model.0.current, UserStatus::OutOfWork);
    }

    #[wasm_bindgen_test]
    async fn test_rejected_update_keeps_status_and_shows_failure_toast() {
        let root = document().create_element("div").unwrap();
        document().body().unwrap().append_child(&root).unwrap();
        // Nothing listens on the discard port, so the POST fails
        let config = WidgetConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..WidgetConfig::default()
        };
        let props = StatusSelectorProps {
            api_client: ApiClient::from_config(&config),
            config,
            initial_status: UserStatus::Available,
        };
        yew::Renderer::<StatusSelector>::with_root_and_props(root.clone(), props).render();
        gloo::timers::future::TimeoutFuture::new(0).await;

        let option = root.query_selector(r#".status-option[data-status="class"]"#).unwrap().unwrap();
        option.dyn_into::<web_sys::HtmlElement>().unwrap().click();

        let toast_text = || {
            root.query_selector(".toast-message")
                .unwrap()
                .and_then(|toast| toast.text_content())
                .unwrap_or_default()
        };
        let mut waited = 0;
        while toast_text() != StatusSelectorState::default().update_failed() && waited < 2000 {
            gloo::timers::future::TimeoutFuture::new(50).await;
            waited += 50;
        }

        assert_eq!(toast_text(), "Failed to update status. Please try again.");
        let text = root.query_selector(".status-text").unwrap().unwrap().text_content();
        assert_eq!(text.as_deref(), Some("Class"));
        let dot = root.query_selector(".current-status .status-dot").unwrap().unwrap();
        assert_eq!(dot.class_name(), "status-dot status-class");
        root.remove();
    }
}

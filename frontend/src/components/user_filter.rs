use shared::{UserFilter, UserFilterTab};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::dom;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct UserFilterTabsProps {
    pub tabs: Vec<UserFilterTab>,
}

/// Account-status tabs of the admin user list.
///
/// The user rows are rendered by the server, so the selected filter is
/// applied to them in place rather than re-rendered.
#[function_component(UserFilterTabs)]
pub fn user_filter_tabs(props: &UserFilterTabsProps) -> Html {
    let filter = use_state_eq(UserFilter::new);

    use_effect_with((*filter).clone(), |filter| {
        match dom::apply_user_filter(filter) {
            Ok(shown) => Logger::debug_with_component(
                "user_filter",
                &format!("Filter '{}' shows {} rows", filter.active(), shown),
            ),
            Err(e) => Logger::error_with_component("user_filter", &e.to_string()),
        }
        || ()
    });

    html! {
        <div class="filter-tabs">
            { for props.tabs.iter().map(|tab| {
                let onclick = {
                    let filter = filter.clone();
                    let value = tab.filter.clone();
                    Callback::from(move |_: MouseEvent| {
                        let mut next = (*filter).clone();
                        next.select(&value);
                        filter.set(next);
                    })
                };
                html! {
                    <button
                        type="button"
                        class={classes!("tab", filter.is_active_tab(tab).then_some("active"))}
                        data-filter={tab.filter.clone()}
                        {onclick}
                    >
                        { tab.label.clone() }
                    </button>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::utils::document;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_tabs_use_page_tab_classes() {
        let root = document().create_element("div").unwrap();
        document().body().unwrap().append_child(&root).unwrap();
        let props = UserFilterTabsProps {
            tabs: UserFilterTab::defaults(),
        };
        yew::Renderer::<UserFilterTabs>::with_root_and_props(root.clone(), props).render();
        gloo::timers::future::TimeoutFuture::new(0).await;

        let tabs = root.query_selector_all(".filter-tabs .tab").unwrap();
        assert_eq!(tabs.length() as usize, UserFilterTab::defaults().len());
        assert_eq!(root.query_selector_all(".filter-tabs .tab.active").unwrap().length(), 1);

        let last = tabs.item(tabs.length() - 1).unwrap().dyn_into::<web_sys::HtmlElement>().unwrap();
        last.click();
        gloo::timers::future::TimeoutFuture::new(0).await;
        assert!(last.class_list().contains("active"));
        assert_eq!(root.query_selector_all(".filter-tabs .tab.active").unwrap().length(), 1);
        root.remove();
    }
}

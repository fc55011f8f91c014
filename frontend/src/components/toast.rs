use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: AttrValue,
    pub visible: bool,
}

/// Transient notification; shown while `visible` is set
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    html! {
        <div id="statusToast" class={classes!("toast", props.visible.then_some("show"))}>
            <span class="toast-message">{ props.message.clone() }</span>
        </div>
    }
}

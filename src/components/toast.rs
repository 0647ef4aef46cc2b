use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::state::toast::{Toast, TOAST_EXIT_MS};

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
    pub on_close: Callback<u32>,
}

#[function_component(ToastItem)]
pub fn toast_item(props: &ToastItemProps) -> Html {
    let closing = use_state(|| false);

    {
        let closing = closing.clone();
        use_effect_with(props.toast.duration_ms, move |duration| {
            let timer = Timeout::new(*duration, move || closing.set(true));
            move || drop(timer)
        });
    }

    // Removal waits for the slide-out transition.
    {
        let on_close = props.on_close.clone();
        let id = props.toast.id;
        use_effect_with(*closing, move |closing| {
            let timer = closing.then(|| Timeout::new(TOAST_EXIT_MS, move || on_close.emit(id)));
            move || drop(timer)
        });
    }

    let close = {
        let closing = closing.clone();
        Callback::from(move |_: MouseEvent| closing.set(true))
    };

    html! {
        <div class={classes!("toast", props.toast.kind.css_class(), (*closing).then_some("closing"))}>
            <span class="toast-icon">{ props.toast.kind.icon() }</span>
            <span class="toast-message">{ &props.toast.message }</span>
            <button class="toast-close" onclick={close} title="Close">{ "×" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastContainerProps {
    pub toasts: Vec<Toast>,
    pub on_close: Callback<u32>,
}

#[function_component(ToastContainer)]
pub fn toast_container(props: &ToastContainerProps) -> Html {
    let css = r#"
        .toast-stack { position: fixed; top: 16px; right: 16px; z-index: 60; max-width: 360px; display: flex; flex-direction: column; gap: 10px; }
        .toast { display: flex; align-items: center; gap: 10px; padding: 12px; border-radius: 6px; border-left: 4px solid; color: white; box-shadow: 0 10px 20px rgba(0,0,0,0.2); transition: transform 0.3s, opacity 0.3s; }
        .toast.closing { transform: translateX(110%); opacity: 0; }
        .toast-success { background: #16a34a; border-color: #15803d; }
        .toast-error { background: #dc2626; border-color: #b91c1c; }
        .toast-warning { background: #eab308; border-color: #ca8a04; }
        .toast-info { background: #2563eb; border-color: #1d4ed8; }
        .toast-icon { font-weight: 700; width: 18px; text-align: center; }
        .toast-message { flex-grow: 1; font-size: 0.9rem; }
        .toast-close { background: transparent; border: none; color: inherit; cursor: pointer; font-size: 1.1rem; border-radius: 50%; padding: 0 6px; }
        .toast-close:hover { background: rgba(0,0,0,0.1); }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="toast-stack">
                { for props.toasts.iter().map(|toast| html! {
                    <ToastItem key={toast.id} toast={toast.clone()} on_close={props.on_close.clone()} />
                }) }
            </div>
        </>
    }
}

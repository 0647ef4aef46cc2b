use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};
use yew::prelude::*;

/// Closes a dropdown when the user presses the mouse anywhere outside `container`.
#[hook]
pub fn use_outside_click(container: NodeRef, on_outside: Callback<()>) {
    use_effect_with(container, move |container| {
        let container = container.clone();
        let document = web_sys::window().and_then(|w| w.document());
        let listener = Closure::<dyn Fn(MouseEvent)>::new(move |e: MouseEvent| {
            let Some(root) = container.cast::<Node>() else {
                return;
            };
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            if !root.contains(target.as_ref()) {
                on_outside.emit(());
            }
        });
        if let Some(doc) = &document {
            let _ = doc.add_event_listener_with_callback("mousedown", listener.as_ref().unchecked_ref());
        }
        move || {
            if let Some(doc) = document {
                let _ = doc.remove_event_listener_with_callback(
                    "mousedown",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    });
}

/// Viewport space below and above the element, in pixels.
pub fn space_around(node: &NodeRef) -> Option<(f64, f64)> {
    let el = node.cast::<Element>()?;
    let viewport = web_sys::window()?.inner_height().ok()?.as_f64()?;
    let rect = el.get_bounding_client_rect();
    Some((viewport - rect.bottom(), rect.top()))
}

pub const CHEVRON: &str = "M19 9l-7 7-7-7";

pub fn chevron(open: bool) -> Html {
    html! {
        <svg class={classes!("chevron", open.then_some("open"))} width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={CHEVRON}></path>
        </svg>
    }
}

pub const DROPDOWN_CSS: &str = r#"
    .dropdown { position: relative; }
    .dropdown-trigger { display: flex; align-items: center; gap: 6px; padding: 4px 10px; border-radius: 6px; background: transparent; border: none; color: #e5e7eb; cursor: pointer; font-size: 0.85rem; }
    .dropdown-trigger:hover { background: #1f2937; }
    .dropdown-menu { position: absolute; z-index: 50; background: #1f2937; border: 1px solid #374151; border-radius: 8px; box-shadow: 0 8px 24px rgba(0,0,0,0.4); overflow-y: auto; }
    .dropdown-menu.drop-down { top: 100%; margin-top: 6px; }
    .dropdown-menu.drop-up { bottom: 100%; margin-bottom: 6px; }
    .chevron { transition: transform 0.2s; }
    .chevron.open { transform: rotate(180deg); }
    .dot-icon { width: 22px; height: 22px; border-radius: 50%; display: flex; align-items: center; justify-content: center; color: white; font-size: 0.7rem; font-weight: 600; }
"#;

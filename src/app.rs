use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;

use crate::components::chat_widget::ChatWidget;
use crate::components::models_page::ModelsPage;
use crate::components::navigation::Navigation;
use crate::components::plugins_page::PluginsPage;
use crate::components::toast::ToastContainer;
use crate::config::AppConfig;
use crate::services::http::ApiClient;
use crate::services::resources::Backend;
use crate::state::route::Route;
use crate::state::toast::{ToastQueue, Toaster};

const GLOBAL_STYLES: &str = r#"
    :root {
        --bg-app: #f3f4f6;
        --border-color: #e5e7eb;
        --text-primary: #111827;
        --text-secondary: #6b7280;
        --accent-color: #3b82f6;
        --accent-hover: #2563eb;
        --danger-color: #dc2626;
    }

    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; color: var(--text-primary); }

    .app-container { min-height: 100vh; background: var(--bg-app); }
    .main-content { max-width: 1280px; margin: 0 auto; padding: 24px 16px; }

    .btn { cursor: pointer; border: 1px solid #d1d5db; background: white; padding: 8px 16px; border-radius: 6px; font-size: 0.9rem; transition: all 0.2s; color: #374151; }
    .btn:hover { background: #f9fafb; }
    .btn-primary { background: var(--accent-color); color: white; border-color: transparent; }
    .btn-primary:hover { background: var(--accent-hover); }

    .page-status { text-align: center; padding: 24px 0; }
    .page-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
    .page-header h1 { margin: 0; font-size: 1.5rem; }
    .error-banner { background: #fee2e2; border: 1px solid #f87171; color: #b91c1c; padding: 12px 16px; border-radius: 6px; margin-bottom: 16px; }
    .card { background: white; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); overflow: hidden; }

    .data-table { width: 100%; border-collapse: collapse; }
    .data-table th { background: #f9fafb; text-align: left; padding: 12px 24px; font-size: 0.75rem; font-weight: 500; color: var(--text-secondary); text-transform: uppercase; letter-spacing: 0.05em; }
    .data-table td { padding: 16px 24px; border-top: 1px solid var(--border-color); font-size: 0.9rem; }
    .data-table .nowrap { white-space: nowrap; }
    .data-table .empty-row { text-align: center; color: var(--text-secondary); }
    .badge { display: inline-flex; padding: 2px 10px; border-radius: 999px; font-size: 0.75rem; font-weight: 600; border: none; }
    .badge-on { background: #dcfce7; color: #166534; }
    .badge-off { background: #fee2e2; color: #991b1b; }
    .badge.clickable { cursor: pointer; }
    .badge-on.clickable:hover { background: #bbf7d0; }
    .badge-off.clickable:hover { background: #fecaca; }
    .link-btn { background: none; border: none; cursor: pointer; color: #4f46e5; font-weight: 500; margin-right: 16px; padding: 0; }
    .link-btn:hover { color: #312e81; }
    .link-btn.danger { color: var(--danger-color); }
    .link-btn.danger:hover { color: #7f1d1d; }

    .form-card { padding: 24px; }
    .form-card h2 { margin: 0 0 16px; font-size: 1.25rem; font-weight: 600; }
    .form-row { margin-bottom: 16px; }
    .form-row label { display: block; font-size: 0.85rem; font-weight: 500; color: #374151; margin-bottom: 4px; }
    .form-row.inline { display: flex; align-items: center; gap: 8px; }
    .form-row.inline label { margin: 0; }
    .form-input { width: 100%; padding: 8px 12px; border: 1px solid #d1d5db; border-radius: 6px; font-family: inherit; font-size: 0.9rem; }
    .form-input:focus { outline: none; box-shadow: 0 0 0 1px var(--accent-color); }
    .form-input.invalid { border-color: #ef4444; }
    .field-error { margin: 4px 0 0; font-size: 0.85rem; color: #ef4444; }
    .form-actions { display: flex; justify-content: flex-end; gap: 12px; }

    .markdown-body { line-height: 1.6; }
    .markdown-body pre { background: #0b1220; color: #e5e7eb; padding: 12px; border-radius: 6px; overflow-x: auto; }
    .markdown-body code { background: rgba(255,255,255,0.08); padding: 2px 4px; border-radius: 4px; font-family: monospace; font-size: 0.9em; }
    .markdown-body pre code { background: transparent; color: inherit; }
    .markdown-body p { margin: 0 0 0.6em; }
    .markdown-body p:last-child { margin-bottom: 0; }
"#;

fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Chat)
}

fn push_history(route: Route) {
    let pushed = web_sys::window()
        .and_then(|w| w.history().ok())
        .map(|h| h.push_state_with_url(&JsValue::NULL, "", Some(route.path())));
    if !matches!(pushed, Some(Ok(()))) {
        tracing::warn!(path = route.path(), "could not push history entry");
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let route = use_state(current_route);
    let new_chat = use_state(|| 0u32);
    let toasts = use_reducer(ToastQueue::default);

    let backend = use_memo(props.config.api_base_url.clone(), |url| {
        Backend::new(ApiClient::with_reqwest(url))
    });
    let toaster = {
        let dispatcher = toasts.dispatcher();
        use_memo((), move |_| Toaster::new(Callback::from(move |action| dispatcher.dispatch(action))))
    };

    // Back/forward buttons.
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let listener = Closure::<dyn Fn()>::new(move || route.set(current_route()));
            if let Some(w) = &window {
                let _ = w.add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
            }
            move || {
                if let Some(w) = window {
                    let _ = w.remove_event_listener_with_callback(
                        "popstate",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            if *route != next {
                tracing::debug!(path = next.path(), "navigate");
                push_history(next);
                route.set(next);
            }
        })
    };

    let on_new_chat = {
        let new_chat = new_chat.clone();
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: ()| {
            new_chat.set(*new_chat + 1);
            on_navigate.emit(Route::Chat);
        })
    };

    let on_toast_close = {
        let toaster = toaster.clone();
        Callback::from(move |id: u32| toaster.dismiss(id))
    };

    let page = match *route {
        Route::Chat => html! { <ChatWidget reset={*new_chat} /> },
        Route::Models => html! { <ModelsPage /> },
        Route::Plugins => html! { <PluginsPage /> },
    };

    html! {
        <ContextProvider<Backend> context={(*backend).clone()}>
            <ContextProvider<Toaster> context={(*toaster).clone()}>
                <style>{ GLOBAL_STYLES }</style>
                <div class="app-container">
                    <Navigation active={*route} on_navigate={on_navigate} on_new_chat={on_new_chat} />
                    <main class="main-content">{ page }</main>
                </div>
                <ToastContainer toasts={toasts.toasts.clone()} on_close={on_toast_close} />
            </ContextProvider<Toaster>>
        </ContextProvider<Backend>>
    }
}

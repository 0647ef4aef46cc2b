use std::rc::Rc;

use futures_util::future::join;
use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::chat_area::ChatArea;
use crate::components::model_selector::ModelSelector;
use crate::components::plugin_selector::PluginSelector;
use crate::components::use_backend;
use crate::models::{Model, Plugin};
use crate::services::chat::{ChatSender, ChatService, SendRequest};
use crate::state::conversation::{ConversationController, ConversationSnapshot};
use crate::state::selection::{default_model, PluginSelection};
use crate::state::widget::PanelHeight;

#[derive(Clone, Copy, PartialEq)]
enum LoadState {
    Loading,
    Failed,
    Ready,
}

#[derive(Properties, PartialEq)]
pub struct ChatWidgetProps {
    /// Bumped by the navigation bar's "New Chat" button.
    #[prop_or_default]
    pub reset: u32,
}

#[function_component(ChatWidget)]
pub fn chat_widget(props: &ChatWidgetProps) -> Html {
    let backend = use_backend();

    let models = use_state(Vec::<Model>::new);
    let plugins = use_state(Vec::<Plugin>::new);
    let load = use_state(|| LoadState::Loading);
    let initialized = use_state(|| false);
    let selected_model = use_state(|| None::<Model>);
    let selection = use_state(PluginSelection::default);
    let input = use_state(String::new);
    let minimized = use_state(|| false);
    let input_ref = use_node_ref();

    let snapshot = use_state(ConversationSnapshot::default);
    let controller = {
        let setter = snapshot.setter();
        let backend = backend.clone();
        use_memo((), move |_| {
            let sender: Rc<dyn ChatSender> = Rc::new(ChatService::new(&backend));
            ConversationController::new(
                sender,
                Rc::new(move |next: ConversationSnapshot| setter.set(next)),
            )
        })
    };

    // Load the catalogue once.
    {
        let models = models.clone();
        let plugins = plugins.clone();
        let load = load.clone();
        let initialized = initialized.clone();
        let selected_model = selected_model.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let (model_list, plugin_list) =
                    join(backend.models.list(), backend.plugins.list()).await;
                match (model_list, plugin_list) {
                    (Ok(model_list), Ok(plugin_list)) => {
                        tracing::info!(
                            models = model_list.len(),
                            plugins = plugin_list.len(),
                            "chat catalogue loaded"
                        );
                        selected_model.set(default_model(&model_list));
                        models.set(model_list);
                        plugins.set(plugin_list);
                        load.set(LoadState::Ready);
                        Timeout::new(100, move || initialized.set(true)).forget();
                    }
                    (Err(err), _) | (_, Err(err)) => {
                        tracing::error!(error = %err, "failed to load models and plugins");
                        load.set(LoadState::Failed);
                    }
                }
            });
        });
    }

    {
        let controller = controller.clone();
        use_effect_with(props.reset, move |_| {
            if !controller.is_empty() {
                controller.clear();
            }
        });
    }

    // '/' focuses the message input from anywhere on the page.
    {
        let input_ref = input_ref.clone();
        use_effect_with((), move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let listener = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                if e.key() != "/" {
                    return;
                }
                let Some(field) = input_ref.cast::<HtmlInputElement>() else {
                    return;
                };
                let node: &web_sys::Node = field.as_ref();
                let focused = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.active_element())
                    .map(|active| active.is_same_node(Some(node)))
                    .unwrap_or(false);
                if !focused {
                    e.prevent_default();
                    let _ = field.focus();
                }
            });
            if let Some(doc) = &document {
                let _ = doc.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
            move || {
                if let Some(doc) = document {
                    let _ = doc.remove_event_listener_with_callback(
                        "keydown",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_select_model = {
        let selected_model = selected_model.clone();
        Callback::from(move |model: Model| selected_model.set(Some(model)))
    };

    let on_toggle_plugin = {
        let selection = selection.clone();
        Callback::from(move |plugin: Plugin| {
            let mut next = (*selection).clone();
            if next.toggle(&plugin) {
                selection.set(next);
            }
        })
    };

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let field: HtmlInputElement = e.target_unchecked_into();
            input.set(field.value());
        })
    };

    let on_submit = {
        let input = input.clone();
        let controller = controller.clone();
        let selected_model = selected_model.clone();
        let selection = selection.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if input.trim().is_empty() {
                return;
            }
            let Some(model) = (*selected_model).clone() else {
                return;
            };
            let request = SendRequest::new((*input).clone(), model.id, selection.ids());
            input.set(String::new());

            let controller = controller.clone();
            spawn_local(async move {
                controller.send(request).await;
            });
        })
    };

    let on_height = {
        let controller = controller.clone();
        Callback::from(move |height: i32| controller.record_content_height(height))
    };

    let toggle_minimize = {
        let minimized = minimized.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let restoring = *minimized;
            minimized.set(!restoring);
            if restoring {
                let input_ref = input_ref.clone();
                Timeout::new(100, move || {
                    if let Some(field) = input_ref.cast::<HtmlInputElement>() {
                        let _ = field.focus();
                    }
                })
                .forget();
            }
        })
    };

    let css = r#"
        .chat-widget { position: fixed; bottom: 20px; left: 50%; transform: translateX(-50%); width: 95%; max-width: 896px; background: #111827; color: white; border: 1px solid #1f2937; box-shadow: 0 25px 50px rgba(0,0,0,0.35); z-index: 40; border-radius: 10px; overflow: hidden; display: flex; flex-direction: column; }
        .chat-widget.animated { transition: height 0.3s ease; }
        .chat-widget .status { display: flex; align-items: center; justify-content: center; height: 100%; font-size: 1.25rem; }
        .chat-widget .status.error { color: #ef4444; }
        .widget-header { display: flex; align-items: center; justify-content: space-between; padding: 8px 12px; border-bottom: 1px solid #1f2937; background: #0f172a; }
        .widget-header .right { display: flex; align-items: center; gap: 6px; }
        .widget-title { display: flex; align-items: center; gap: 8px; font-size: 0.9rem; font-weight: 500; }
        .widget-title small { color: #9ca3af; font-size: 0.75rem; }
        .widget-title .dot-icon { width: 26px; height: 26px; border-radius: 50%; display: flex; align-items: center; justify-content: center; }
        .icon-btn { background: transparent; border: none; color: #e5e7eb; padding: 6px; border-radius: 6px; cursor: pointer; display: flex; }
        .icon-btn:hover { background: #374151; }
        .icon-btn:disabled { opacity: 0.5; cursor: not-allowed; }
        .widget-body { overflow: auto; background: #131b2e; }
        .widget-body.animated { transition: height 0.3s ease; }
        .widget-hint { padding: 32px; text-align: center; color: #9ca3af; }
        .widget-input { border-top: 1px solid #1f2937; padding: 8px 10px; background: #0f172a; }
        .widget-input form { display: flex; align-items: center; }
        .widget-input input { flex: 1; background: transparent; border: none; outline: none; color: white; padding: 8px; font-size: 0.9rem; }
        .widget-input input::placeholder { color: #6b7280; }
    "#;

    let height = PanelHeight::for_state(*minimized, !snapshot.is_empty());
    let animated = (*initialized).then_some("animated");

    let status = match *load {
        LoadState::Loading => Some(html! { <div class="status">{ "Loading..." }</div> }),
        LoadState::Failed => Some(html! {
            <div class="status error">{ "Failed to load data. Please try again later." }</div>
        }),
        LoadState::Ready => None,
    };
    if let Some(status) = status {
        return html! {
            <>
                <style>{ css }</style>
                <div class={classes!("chat-widget", animated)} style={height.panel_css()}>{ status }</div>
            </>
        };
    }

    let header = if *minimized {
        let count = snapshot.messages.len();
        html! {
            <div class="widget-header">
                <div class="widget-title">
                    <span class="dot-icon" style="background: #7c3aed;">{ "◔" }</span>
                    <span>{ (*selected_model).as_ref().map(|m| m.name.clone()).unwrap_or_else(|| "AI Chat".to_string()) }</span>
                    if count > 0 {
                        <small>{ format!("{} messages", count) }</small>
                    }
                </div>
                <div class="right">
                    <button class="icon-btn" onclick={toggle_minimize} title="Maximize">
                        <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round"><path d="M12 6v12"></path><path d="M6 12h12"></path></svg>
                    </button>
                </div>
            </div>
        }
    } else {
        html! {
            <div class="widget-header">
                <ModelSelector
                    models={(*models).clone()}
                    selected={(*selected_model).clone()}
                    on_select={on_select_model}
                />
                <div class="right">
                    <PluginSelector
                        plugins={(*plugins).clone()}
                        selection={(*selection).clone()}
                        on_toggle={on_toggle_plugin}
                    />
                    <button class="icon-btn" onclick={toggle_minimize} title="Minimize">
                        <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round"><path d="M18 12H6"></path></svg>
                    </button>
                </div>
            </div>
        }
    };

    let active_plugins: Vec<Plugin> = selection.selected(&plugins).into_iter().cloned().collect();
    let can_send = !input.trim().is_empty() && !snapshot.is_sending();

    html! {
        <>
            <style>{ css }</style>
            <div class={classes!("chat-widget", animated)} style={height.panel_css()}>
                { header }

                if !*minimized {
                    <div class={classes!("widget-body", animated)} style={height.body_css()}>
                        if let Some(model) = (*selected_model).clone() {
                            <ChatArea
                                snapshot={(*snapshot).clone()}
                                model_name={model.name}
                                plugins={active_plugins}
                                on_height={on_height}
                            />
                        } else {
                            <div class="widget-hint">{ "Please select a model to start chatting" }</div>
                        }
                    </div>

                    <div class="widget-input">
                        <form onsubmit={on_submit}>
                            <input
                                type="text"
                                ref={input_ref}
                                value={(*input).clone()}
                                oninput={on_input}
                                placeholder="Type your message... (Press '/' to focus)"
                            />
                            <button type="submit" class="icon-btn" disabled={!can_send} title="Send message">
                                <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round"><path d="M13 5l7 7-7 7M5 5l7 7-7 7"></path></svg>
                            </button>
                        </form>
                    </div>
                }
            </div>
        </>
    }
}

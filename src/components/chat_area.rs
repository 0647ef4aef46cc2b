use web_sys::{Element, HtmlElement, ScrollIntoViewOptions};
use yew::prelude::*;

use crate::models::{ChatMessage, Plugin};
use crate::state::conversation::{ConversationSnapshot, ScrollBehavior};
use crate::utils::{format_time, render_markdown};

#[derive(Properties, PartialEq)]
pub struct ChatAreaProps {
    pub snapshot: ConversationSnapshot,
    pub model_name: AttrValue,
    pub plugins: Vec<Plugin>,
    /// Measured height of the message list after each idle render.
    pub on_height: Callback<i32>,
}

#[function_component(ChatArea)]
pub fn chat_area(props: &ChatAreaProps) -> Html {
    let content_ref = use_node_ref();
    let end_ref = use_node_ref();

    // Scroll once per request from the controller.
    {
        let end_ref = end_ref.clone();
        use_effect_with(props.snapshot.scroll, move |scroll| {
            if scroll.seq == 0 {
                return;
            }
            if let Some(anchor) = end_ref.cast::<Element>() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(match scroll.behavior {
                    ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
                    ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
                });
                anchor.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
    }

    {
        let content_ref = content_ref.clone();
        let on_height = props.on_height.clone();
        let deps = (props.snapshot.messages.len(), props.snapshot.is_sending());
        use_effect_with(deps, move |(count, sending)| {
            if *count > 0 && !*sending {
                if let Some(el) = content_ref.cast::<HtmlElement>() {
                    on_height.emit(el.offset_height());
                }
            }
        });
    }

    let css = r#"
        .chat-messages { display: flex; flex-direction: column; gap: 14px; padding: 16px; }
        .chat-empty { display: flex; flex-direction: column; align-items: center; justify-content: center; height: 100%; color: #9ca3af; text-align: center; gap: 8px; padding: 12px; }
        .chat-empty h3 { margin: 0; color: #e5e7eb; font-size: 1rem; font-weight: 600; }
        .chat-empty p { margin: 0; font-size: 0.85rem; }
        .plugin-chips { display: flex; flex-wrap: wrap; gap: 6px; justify-content: center; }
        .plugin-chip { background: rgba(59, 130, 246, 0.15); color: #93c5fd; border-radius: 999px; padding: 2px 10px; font-size: 0.75rem; }

        .msg-row { display: flex; width: 100%; }
        .msg-row.user { justify-content: flex-end; }
        .msg-row.assistant { justify-content: flex-start; }
        .msg-group { display: flex; gap: 8px; max-width: 85%; align-items: flex-end; }
        .msg-row.user .msg-group { flex-direction: row-reverse; }

        .msg-avatar { width: 28px; height: 28px; border-radius: 50%; display: flex; align-items: center; justify-content: center; flex-shrink: 0; font-size: 0.75rem; font-weight: 600; }
        .msg-avatar.user { background: #3b82f6; color: white; }
        .msg-avatar.assistant { background: #10b981; color: white; }

        .msg-meta { display: flex; gap: 8px; font-size: 0.7rem; color: #9ca3af; margin-bottom: 4px; }
        .msg-row.user .msg-meta { justify-content: flex-end; }
        .msg-bubble { padding: 10px 14px; border-radius: 12px; font-size: 0.9rem; line-height: 1.5; overflow-wrap: anywhere; word-break: break-word; }
        .msg-row.user .msg-bubble { background: #2563eb; color: white; border-bottom-right-radius: 2px; white-space: pre-wrap; }
        .msg-row.assistant .msg-bubble { background: #1f2937; color: #e5e7eb; border-bottom-left-radius: 2px; }

        .typing { display: inline-flex; gap: 4px; padding: 4px 0; }
        .typing span { width: 6px; height: 6px; border-radius: 50%; background: #9ca3af; animation: typing-bounce 1.2s infinite ease-in-out; }
        .typing span:nth-child(2) { animation-delay: 0.15s; }
        .typing span:nth-child(3) { animation-delay: 0.3s; }
        @keyframes typing-bounce { 0%, 80%, 100% { transform: translateY(0); opacity: 0.5; } 40% { transform: translateY(-4px); opacity: 1; } }
    "#;

    let initial = props.model_name.chars().next().unwrap_or('A').to_string();

    let message_view = |msg: &ChatMessage| {
        let (row_cls, author, avatar) = if msg.is_user() {
            ("user", "You".to_string(), "Y".to_string())
        } else {
            ("assistant", props.model_name.to_string(), initial.clone())
        };
        let body = if msg.is_user() {
            html! { { &msg.content } }
        } else {
            render_markdown(&msg.content)
        };

        html! {
            <div key={msg.id.clone()} class={classes!("msg-row", row_cls)}>
                <div class="msg-group">
                    <div class={classes!("msg-avatar", row_cls)}>{ avatar }</div>
                    <div>
                        <div class="msg-meta">
                            <span>{ author }</span>
                            <span>{ format_time(&msg.timestamp) }</span>
                        </div>
                        <div class="msg-bubble">{ body }</div>
                    </div>
                </div>
            </div>
        }
    };

    if props.snapshot.is_empty() {
        return html! {
            <>
                <style>{ css }</style>
                <div class="chat-empty">
                    <h3>{ format!("Start a conversation with {}", props.model_name) }</h3>
                    <p>{ "Ask anything. Press / to jump to the input." }</p>
                    if !props.plugins.is_empty() {
                        <div class="plugin-chips">
                            { for props.plugins.iter().map(|p| html! {
                                <span key={p.id.clone()} class="plugin-chip">{ &p.name }</span>
                            }) }
                        </div>
                    }
                </div>
            </>
        };
    }

    // Keeps the panel from collapsing while the pending reply re-renders.
    let min_height = props
        .snapshot
        .pinned_height
        .map(|h| format!("min-height: {}px;", h))
        .unwrap_or_default();

    html! {
        <>
            <style>{ css }</style>
            <div class="chat-messages" ref={content_ref} style={min_height}>
                { for props.snapshot.messages.iter().map(message_view) }

                if props.snapshot.is_sending() {
                    <div class="msg-row assistant">
                        <div class="msg-group">
                            <div class="msg-avatar assistant">{ initial.clone() }</div>
                            <div class="msg-bubble">
                                <div class="typing"><span></span><span></span><span></span></div>
                            </div>
                        </div>
                    </div>
                }
                // Below the typing dots so a pending reply stays in view.
                <div ref={end_ref}></div>
            </div>
        </>
    }
}

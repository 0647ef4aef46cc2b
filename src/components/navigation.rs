use yew::prelude::*;

use crate::state::route::Route;

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub active: Route,
    pub on_navigate: Callback<Route>,
    pub on_new_chat: Callback<()>,
}

fn icon(route: Route) -> Html {
    let path = match route {
        Route::Chat => "M8 10h.01M12 10h.01M16 10h.01M9 16H5a2 2 0 01-2-2V6a2 2 0 012-2h14a2 2 0 012 2v8a2 2 0 01-2 2h-5l-5 5v-5z",
        Route::Models => "M9 3v2m6-2v2M9 19v2m6-2v2M5 9H3m2 6H3m18-6h-2m2 6h-2M7 19h10a2 2 0 002-2V7a2 2 0 00-2-2H7a2 2 0 00-2 2v10a2 2 0 002 2zM9 9h6v6H9V9z",
        Route::Plugins => "M13 10V3L4 14h7v7l9-11h-7z",
    };
    html! {
        <svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let css = r#"
        .nav-bar { background: linear-gradient(90deg, #1e3a8a, #4c1d95, #581c87); box-shadow: 0 4px 12px rgba(0,0,0,0.15); }
        .nav-inner { max-width: 1280px; margin: 0 auto; padding: 0 16px; height: 64px; display: flex; justify-content: space-between; align-items: center; }
        .nav-left { display: flex; align-items: center; gap: 32px; height: 100%; }
        .nav-brand { display: flex; align-items: center; gap: 8px; color: white; font-size: 1.2rem; font-weight: 700; }
        .nav-brand .logo { width: 32px; height: 32px; border-radius: 50%; background: white; color: #2563eb; display: flex; align-items: center; justify-content: center; }
        .nav-links { display: flex; gap: 24px; height: 100%; }
        .nav-link { display: inline-flex; align-items: center; gap: 4px; padding: 0 12px; border-bottom: 2px solid transparent; color: #dbeafe; text-decoration: none; font-size: 0.9rem; font-weight: 500; transition: color 0.2s, border-color 0.2s; }
        .nav-link:hover { color: white; border-color: #bfdbfe; }
        .nav-link.active { color: white; border-color: white; }
        .new-chat { display: flex; align-items: center; gap: 4px; padding: 6px 12px; border: none; border-radius: 6px; background: rgba(255,255,255,0.2); color: white; cursor: pointer; }
        .new-chat:hover { background: rgba(255,255,255,0.3); }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <nav class="nav-bar">
                <div class="nav-inner">
                    <div class="nav-left">
                        <div class="nav-brand">
                            <span class="logo">{ "✦" }</span>
                            <span>{ "ModelPluginChat" }</span>
                        </div>
                        <div class="nav-links">
                            { for Route::ALL.iter().map(|&route| {
                                let on_navigate = props.on_navigate.clone();
                                let onclick = Callback::from(move |e: MouseEvent| {
                                    // Plain clicks stay in the page; modified clicks keep browser behaviour.
                                    if e.ctrl_key() || e.meta_key() || e.shift_key() {
                                        return;
                                    }
                                    e.prevent_default();
                                    on_navigate.emit(route);
                                });
                                html! {
                                    <a
                                        key={route.path()}
                                        href={route.path()}
                                        class={classes!("nav-link", (route == props.active).then_some("active"))}
                                        {onclick}
                                    >
                                        { icon(route) }
                                        { route.label() }
                                    </a>
                                }
                            }) }
                        </div>
                    </div>
                    <button class="new-chat" onclick={props.on_new_chat.reform(|_| ())}>
                        <span>{ "+" }</span>
                        <span>{ "New Chat" }</span>
                    </button>
                </div>
            </nav>
        </>
    }
}

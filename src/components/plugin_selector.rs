use yew::prelude::*;

use crate::components::dropdown::{chevron, space_around, use_outside_click, DROPDOWN_CSS};
use crate::models::Plugin;
use crate::state::selection::PluginSelection;
use crate::state::widget::{menu_style, plugin_dropdown_direction, DropDirection, PLUGIN_MENU_MAX_PX};

#[derive(Properties, PartialEq)]
pub struct PluginSelectorProps {
    pub plugins: Vec<Plugin>,
    pub selection: PluginSelection,
    pub on_toggle: Callback<Plugin>,
}

#[function_component(PluginSelector)]
pub fn plugin_selector(props: &PluginSelectorProps) -> Html {
    let is_open = use_state(|| false);
    let direction = use_state(|| DropDirection::Down);
    let container_ref = use_node_ref();
    let button_ref = use_node_ref();

    {
        let is_open = is_open.clone();
        use_outside_click(container_ref.clone(), Callback::from(move |_| is_open.set(false)));
    }

    {
        let direction = direction.clone();
        let button_ref = button_ref.clone();
        use_effect_with((*is_open, props.plugins.len()), move |(open, count)| {
            if *open {
                if let Some((below, above)) = space_around(&button_ref) {
                    direction.set(plugin_dropdown_direction(below, above, *count));
                }
            }
        });
    }

    let toggle_open = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let active = props.selection.len();

    html! {
        <div class="dropdown" ref={container_ref}>
            <style>{ DROPDOWN_CSS }</style>
            <style>{ r#"
                .plugin-menu { right: 0; width: 288px; padding: 12px; }
                .plugin-menu-head { display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; }
                .plugin-menu-head h4 { margin: 0; font-size: 0.85rem; color: #d1d5db; font-weight: 500; }
                .plugin-menu-head span, .plugin-none { font-size: 0.75rem; color: #9ca3af; }
                .plugin-row { display: flex; align-items: center; justify-content: space-between; gap: 8px; padding: 8px; border-radius: 6px; }
                .plugin-row:hover { background: #374151; }
                .plugin-row small { display: block; color: #9ca3af; font-size: 0.72rem; }
                .count-badge { background: #3b82f6; color: white; border-radius: 999px; min-width: 18px; height: 18px; font-size: 0.7rem; display: inline-flex; align-items: center; justify-content: center; }
                .switch { position: relative; width: 40px; height: 20px; border-radius: 999px; border: none; background: #4b5563; cursor: pointer; flex-shrink: 0; transition: background 0.2s; }
                .switch.on { background: #3b82f6; }
                .switch:disabled { opacity: 0.5; cursor: not-allowed; }
                .switch .knob { position: absolute; top: 2px; left: 2px; width: 16px; height: 16px; border-radius: 50%; background: white; transition: transform 0.2s; }
                .switch.on .knob { transform: translateX(20px); }
            "# }</style>

            <button class="dropdown-trigger" ref={button_ref} onclick={toggle_open} title="Plugins">
                <span class="dot-icon" style="background: #2563eb;">{ "⚡" }</span>
                <span>{ "Plugins" }</span>
                if active > 0 {
                    <span class="count-badge">{ active.to_string() }</span>
                }
                { chevron(*is_open) }
            </button>

            if *is_open {
                <div class={classes!("dropdown-menu", "plugin-menu", direction.css_class())} style={menu_style(PLUGIN_MENU_MAX_PX)}>
                    <div class="plugin-menu-head">
                        <h4>{ "Available Plugins" }</h4>
                        <span>{ format!("{} active", active) }</span>
                    </div>
                    if props.plugins.is_empty() {
                        <div class="plugin-none">{ "No plugins available" }</div>
                    } else {
                        { for props.plugins.iter().map(|plugin| {
                            let selected = props.selection.contains(&plugin.id);
                            let on_toggle = props.on_toggle.clone();
                            let target = plugin.clone();
                            html! {
                                <div key={plugin.id.clone()} class="plugin-row">
                                    <div>
                                        { &plugin.name }
                                        if !plugin.description.is_empty() {
                                            <small>{ &plugin.description }</small>
                                        }
                                    </div>
                                    <button
                                        class={classes!("switch", selected.then_some("on"))}
                                        disabled={!plugin.enabled}
                                        title={if plugin.enabled { "Toggle plugin" } else { "Plugin disabled" }}
                                        onclick={Callback::from(move |_| on_toggle.emit(target.clone()))}
                                    >
                                        <span class="knob"></span>
                                    </button>
                                </div>
                            }
                        }) }
                    }
                </div>
            }
        </div>
    }
}

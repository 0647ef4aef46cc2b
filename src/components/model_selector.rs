use yew::prelude::*;

use crate::components::dropdown::{chevron, space_around, use_outside_click, DROPDOWN_CSS};
use crate::models::Model;
use crate::state::widget::{menu_style, model_dropdown_direction, DropDirection, MODEL_MENU_MAX_PX};

#[derive(Properties, PartialEq)]
pub struct ModelSelectorProps {
    pub models: Vec<Model>,
    pub selected: Option<Model>,
    pub on_select: Callback<Model>,
}

#[function_component(ModelSelector)]
pub fn model_selector(props: &ModelSelectorProps) -> Html {
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
        use_effect_with((*is_open, props.models.len()), move |(open, count)| {
            if *open {
                if let Some((below, above)) = space_around(&button_ref) {
                    direction.set(model_dropdown_direction(below, above, *count));
                }
            }
        });
    }

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let selected_id = props.selected.as_ref().map(|m| m.id.clone());
    let label = props
        .selected
        .as_ref()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "Select Model".to_string());

    html! {
        <div class="dropdown" ref={container_ref}>
            <style>{ DROPDOWN_CSS }</style>
            <style>{ r#"
                .model-menu { left: 0; width: 240px; padding: 4px 0; }
                .model-option { width: 100%; display: flex; align-items: center; gap: 8px; padding: 8px 14px; background: transparent; border: none; color: #e5e7eb; text-align: left; cursor: pointer; }
                .model-option:hover, .model-option.active { background: #374151; }
                .model-option small { display: block; color: #9ca3af; font-size: 0.72rem; }
                .model-option .status { margin-left: 6px; font-style: normal; font-size: 0.65rem; padding: 0 6px; border-radius: 999px; }
                .model-option .status.active { background: rgba(16, 185, 129, 0.2); color: #6ee7b7; }
                .model-option .status.inactive { background: rgba(239, 68, 68, 0.2); color: #fca5a5; }
            "# }</style>

            <button class="dropdown-trigger" ref={button_ref} onclick={toggle} title="Select Model">
                <span class="dot-icon" style="background: #7c3aed;">{ "M" }</span>
                <span>{ label }</span>
                { chevron(*is_open) }
            </button>

            if *is_open {
                <div class={classes!("dropdown-menu", "model-menu", direction.css_class())} style={menu_style(MODEL_MENU_MAX_PX)}>
                    { for props.models.iter().map(|model| {
                        let on_select = props.on_select.clone();
                        let is_open = is_open.clone();
                        let picked = model.clone();
                        let active = selected_id.as_deref() == Some(model.id.as_str());
                        html! {
                            <button
                                key={model.id.clone()}
                                class={classes!("model-option", active.then_some("active"))}
                                onclick={Callback::from(move |_| {
                                    on_select.emit(picked.clone());
                                    is_open.set(false);
                                })}
                            >
                                <span class="dot-icon" style="background: #7c3aed;">{ "M" }</span>
                                <span>
                                    { &model.name }
                                    <em class={classes!("status", model.status.as_str())}>{ model.status.as_str() }</em>
                                    if !model.description.is_empty() {
                                        <small>{ &model.description }</small>
                                    }
                                </span>
                            </button>
                        }
                    }) }
                </div>
            }
        </div>
    }
}

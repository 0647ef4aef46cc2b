use yew::prelude::*;

use crate::components::form_field::{bind_field, checked_submit, field_error, input_class};
use crate::error::FormErrors;
use crate::forms::PluginDraft;
use crate::models::Plugin;

#[derive(Properties, PartialEq)]
pub struct PluginFormProps {
    #[prop_or_default]
    pub plugin: Option<Plugin>,
    pub on_submit: Callback<PluginDraft>,
    pub on_cancel: Callback<()>,
}

fn draft_for(plugin: &Option<Plugin>) -> PluginDraft {
    plugin.as_ref().map(PluginDraft::from_plugin).unwrap_or_default()
}

#[function_component(PluginForm)]
pub fn plugin_form(props: &PluginFormProps) -> Html {
    let draft = use_state(|| draft_for(&props.plugin));
    let errors = use_state(FormErrors::default);

    {
        let draft = draft.clone();
        let errors = errors.clone();
        use_effect_with(props.plugin.clone(), move |plugin| {
            draft.set(draft_for(plugin));
            errors.set(FormErrors::default());
        });
    }

    let on_submit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(valid) = checked_submit(&*draft, &errors) {
                on_submit.emit(valid);
            }
        })
    };

    let editing = props.plugin.is_some();

    html! {
        <div class="card form-card">
            <h2>{ if editing { "Edit Plugin" } else { "Add New Plugin" } }</h2>
            <form onsubmit={on_submit}>
                <div class="form-row">
                    <label for="name">{ "Name" }</label>
                    <input
                        type="text" id="name" name="name"
                        class={input_class(&errors, "name")}
                        value={draft.name.clone()}
                        oninput={bind_field::<_, InputEvent>(&draft, &errors, "name")}
                    />
                    { field_error(&errors, "name") }
                </div>

                <div class="form-row">
                    <label for="description">{ "Description" }</label>
                    <textarea
                        id="description" name="description" rows="3"
                        class={input_class(&errors, "description")}
                        value={draft.description.clone()}
                        oninput={bind_field::<_, InputEvent>(&draft, &errors, "description")}
                    />
                    { field_error(&errors, "description") }
                </div>

                <div class="form-row">
                    <label for="version">{ "Version" }</label>
                    <input
                        type="text" id="version" name="version" placeholder="e.g., 1.0.0"
                        class={input_class(&errors, "version")}
                        value={draft.version.clone()}
                        oninput={bind_field::<_, InputEvent>(&draft, &errors, "version")}
                    />
                    { field_error(&errors, "version") }
                </div>

                <div class="form-row inline">
                    <input
                        type="checkbox" id="enabled" name="enabled"
                        checked={draft.enabled}
                        onchange={bind_field::<_, Event>(&draft, &errors, "enabled")}
                    />
                    <label for="enabled">{ "Enabled" }</label>
                </div>

                <div class="form-actions">
                    <button type="button" class="btn" onclick={props.on_cancel.reform(|_| ())}>{ "Cancel" }</button>
                    <button type="submit" class="btn btn-primary">{ if editing { "Update" } else { "Create" } }</button>
                </div>
            </form>
        </div>
    }
}

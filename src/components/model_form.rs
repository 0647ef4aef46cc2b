use yew::prelude::*;

use crate::components::form_field::{bind_field, checked_submit, field_error, input_class};
use crate::error::FormErrors;
use crate::forms::ModelDraft;
use crate::models::{Model, ModelStatus};

#[derive(Properties, PartialEq)]
pub struct ModelFormProps {
    /// The model being edited, `None` when adding.
    #[prop_or_default]
    pub model: Option<Model>,
    pub on_submit: Callback<ModelDraft>,
    pub on_cancel: Callback<()>,
}

fn draft_for(model: &Option<Model>) -> ModelDraft {
    model.as_ref().map(ModelDraft::from_model).unwrap_or_default()
}

#[function_component(ModelForm)]
pub fn model_form(props: &ModelFormProps) -> Html {
    let draft = use_state(|| draft_for(&props.model));
    let errors = use_state(FormErrors::default);

    {
        let draft = draft.clone();
        let errors = errors.clone();
        use_effect_with(props.model.clone(), move |model| {
            draft.set(draft_for(model));
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

    let editing = props.model.is_some();

    html! {
        <div class="card form-card">
            <h2>{ if editing { "Edit Model" } else { "Add New Model" } }</h2>
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
                    <label for="apiEndpoint">{ "API Endpoint" }</label>
                    <input
                        type="text" id="apiEndpoint" name="apiEndpoint"
                        placeholder="https://api.example.com/v1/chat"
                        class={input_class(&errors, "apiEndpoint")}
                        value={draft.api_endpoint.clone()}
                        oninput={bind_field::<_, InputEvent>(&draft, &errors, "apiEndpoint")}
                    />
                    { field_error(&errors, "apiEndpoint") }
                </div>

                <div class="form-row">
                    <label for="status">{ "Status" }</label>
                    <select
                        id="status" name="status" class="form-input"
                        onchange={bind_field::<_, Event>(&draft, &errors, "status")}
                    >
                        { for [ModelStatus::Active, ModelStatus::Inactive].into_iter().map(|status| html! {
                            <option value={status.as_str()} selected={draft.status == status}>
                                { if status == ModelStatus::Active { "Active" } else { "Inactive" } }
                            </option>
                        }) }
                    </select>
                </div>

                <div class="form-actions">
                    <button type="button" class="btn" onclick={props.on_cancel.reform(|_| ())}>{ "Cancel" }</button>
                    <button type="submit" class="btn btn-primary">{ if editing { "Update" } else { "Create" } }</button>
                </div>
            </form>
        </div>
    }
}

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::model_form::ModelForm;
use crate::components::{report_failure, use_backend, use_toaster, Editor};
use crate::forms::ModelDraft;
use crate::models::{Model, ModelStatus};
use crate::state::records::{RecordAction, RecordList};
use crate::utils::confirm;

#[function_component(ModelsPage)]
pub fn models_page() -> Html {
    let api = use_backend().models;
    let toaster = use_toaster();
    let list = use_reducer(RecordList::<Model>::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let editor = use_state(|| Editor::<Model>::Closed);

    {
        let api = api.clone();
        let toaster = toaster.clone();
        let dispatcher = list.dispatcher();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.list().await {
                    Ok(models) => {
                        dispatcher.dispatch(RecordAction::Loaded(models));
                        error.set(None);
                    }
                    Err(err) => report_failure(&err, "Failed to fetch models", &error, &toaster),
                }
                loading.set(false);
            });
        });
    }

    let on_delete = {
        let api = api.clone();
        let toaster = toaster.clone();
        let dispatcher = list.dispatcher();
        let error = error.clone();
        Callback::from(move |id: String| {
            if !confirm("Are you sure you want to delete this model?") {
                return;
            }
            let api = api.clone();
            let toaster = toaster.clone();
            let dispatcher = dispatcher.clone();
            let error = error.clone();
            spawn_local(async move {
                match api.delete(&id).await {
                    Ok(_) => {
                        dispatcher.dispatch(RecordAction::Removed(id));
                        toaster.success("Model deleted successfully");
                    }
                    Err(err) => report_failure(&err, "Failed to delete model", &error, &toaster),
                }
            });
        })
    };

    let on_submit = {
        let api = api.clone();
        let toaster = toaster.clone();
        let dispatcher = list.dispatcher();
        let error = error.clone();
        let editor = editor.clone();
        Callback::from(move |draft: ModelDraft| {
            let target = editor.editing().map(|m| m.id.clone());
            let api = api.clone();
            let toaster = toaster.clone();
            let dispatcher = dispatcher.clone();
            let error = error.clone();
            let editor = editor.clone();
            spawn_local(async move {
                let (result, done) = match &target {
                    Some(id) => (
                        api.update(id, &draft).await.map(RecordAction::Replaced),
                        "Model updated successfully",
                    ),
                    None => (
                        api.create(&draft).await.map(RecordAction::Added),
                        "Model created successfully",
                    ),
                };
                match result {
                    Ok(action) => {
                        dispatcher.dispatch(action);
                        toaster.success(done);
                        editor.set(Editor::Closed);
                    }
                    Err(err) => report_failure(&err, "Failed to save model", &error, &toaster),
                }
            });
        })
    };

    let open_add = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| editor.set(Editor::Adding))
    };
    let on_cancel = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::Closed))
    };

    if *loading && list.items.is_empty() {
        return html! { <div class="page-status">{ "Loading models..." }</div> };
    }

    let table = html! {
        <div class="card">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{ "Name" }</th>
                        <th>{ "Description" }</th>
                        <th>{ "API Endpoint" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Actions" }</th>
                    </tr>
                </thead>
                <tbody>
                    if list.items.is_empty() {
                        <tr><td colspan="5" class="empty-row">{ "No models found. Add a new model to get started." }</td></tr>
                    } else {
                        { for list.items.iter().map(|model| {
                            let edit = {
                                let editor = editor.clone();
                                let model = model.clone();
                                Callback::from(move |_: MouseEvent| editor.set(Editor::Editing(model.clone())))
                            };
                            let delete = {
                                let id = model.id.clone();
                                on_delete.reform(move |_: MouseEvent| id.clone())
                            };
                            let badge = if model.status == ModelStatus::Active { "badge badge-on" } else { "badge badge-off" };
                            html! {
                                <tr key={model.id.clone()}>
                                    <td class="nowrap">{ &model.name }</td>
                                    <td>{ &model.description }</td>
                                    <td class="nowrap">{ &model.api_endpoint }</td>
                                    <td><span class={badge}>{ model.status.as_str() }</span></td>
                                    <td class="nowrap">
                                        <button class="link-btn" onclick={edit}>{ "Edit" }</button>
                                        <button class="link-btn danger" onclick={delete}>{ "Delete" }</button>
                                    </td>
                                </tr>
                            }
                        }) }
                    }
                </tbody>
            </table>
        </div>
    };

    html! {
        <div class="page">
            <div class="page-header">
                <h1>{ "Models" }</h1>
                <button class="btn btn-primary" onclick={open_add}>{ "Add Model" }</button>
            </div>

            if let Some(message) = (*error).clone() {
                <div class="error-banner">{ message }</div>
            }

            if *editor == Editor::Closed {
                { table }
            } else {
                <ModelForm model={editor.editing().cloned()} on_submit={on_submit} on_cancel={on_cancel} />
            }
        </div>
    }
}

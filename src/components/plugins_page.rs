use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::plugin_form::PluginForm;
use crate::components::{report_failure, use_backend, use_toaster, Editor};
use crate::forms::PluginDraft;
use crate::models::{Plugin, PluginPatch};
use crate::state::records::{RecordAction, RecordList};
use crate::utils::confirm;

#[function_component(PluginsPage)]
pub fn plugins_page() -> Html {
    let api = use_backend().plugins;
    let toaster = use_toaster();
    let list = use_reducer(RecordList::<Plugin>::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let editor = use_state(|| Editor::<Plugin>::Closed);

    {
        let api = api.clone();
        let toaster = toaster.clone();
        let dispatcher = list.dispatcher();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.list().await {
                    Ok(plugins) => {
                        dispatcher.dispatch(RecordAction::Loaded(plugins));
                        error.set(None);
                    }
                    Err(err) => report_failure(&err, "Failed to fetch plugins", &error, &toaster),
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
            if !confirm("Are you sure you want to delete this plugin?") {
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
                        toaster.success("Plugin deleted successfully");
                    }
                    Err(err) => report_failure(&err, "Failed to delete plugin", &error, &toaster),
                }
            });
        })
    };

    // Flips the server-side flag; the row shows whatever the server returns.
    let on_toggle = {
        let api = api.clone();
        let toaster = toaster.clone();
        let dispatcher = list.dispatcher();
        let error = error.clone();
        Callback::from(move |plugin: Plugin| {
            let api = api.clone();
            let toaster = toaster.clone();
            let dispatcher = dispatcher.clone();
            let error = error.clone();
            spawn_local(async move {
                match api.update(&plugin.id, &PluginPatch::enabled(!plugin.enabled)).await {
                    Ok(updated) => {
                        let state = if updated.enabled { "enabled" } else { "disabled" };
                        dispatcher.dispatch(RecordAction::Replaced(updated));
                        toaster.success(format!("Plugin {} successfully", state));
                    }
                    Err(err) => {
                        report_failure(&err, "Failed to update plugin status", &error, &toaster)
                    }
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
        Callback::from(move |draft: PluginDraft| {
            let target = editor.editing().map(|p| p.id.clone());
            let api = api.clone();
            let toaster = toaster.clone();
            let dispatcher = dispatcher.clone();
            let error = error.clone();
            let editor = editor.clone();
            spawn_local(async move {
                let (result, done) = match &target {
                    Some(id) => (
                        api.update(id, &draft).await.map(RecordAction::Replaced),
                        "Plugin updated successfully",
                    ),
                    None => (
                        api.create(&draft).await.map(RecordAction::Added),
                        "Plugin created successfully",
                    ),
                };
                match result {
                    Ok(action) => {
                        dispatcher.dispatch(action);
                        toaster.success(done);
                        editor.set(Editor::Closed);
                    }
                    Err(err) => report_failure(&err, "Failed to save plugin", &error, &toaster),
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
        return html! { <div class="page-status">{ "Loading plugins..." }</div> };
    }

    let rows = list.items.iter().map(|plugin| {
        let edit = {
            let editor = editor.clone();
            let plugin = plugin.clone();
            Callback::from(move |_: MouseEvent| editor.set(Editor::Editing(plugin.clone())))
        };
        let delete = {
            let id = plugin.id.clone();
            on_delete.reform(move |_: MouseEvent| id.clone())
        };
        let toggle = {
            let plugin = plugin.clone();
            on_toggle.reform(move |_: MouseEvent| plugin.clone())
        };
        let (badge, label) = if plugin.enabled {
            ("badge badge-on clickable", "Enabled")
        } else {
            ("badge badge-off clickable", "Disabled")
        };
        html! {
            <tr key={plugin.id.clone()}>
                <td class="nowrap">{ &plugin.name }</td>
                <td>{ &plugin.description }</td>
                <td class="nowrap">{ format!("v{}", plugin.version) }</td>
                <td><button class={badge} onclick={toggle}>{ label }</button></td>
                <td class="nowrap">
                    <button class="link-btn" onclick={edit}>{ "Edit" }</button>
                    <button class="link-btn danger" onclick={delete}>{ "Delete" }</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="page">
            <div class="page-header">
                <h1>{ "Plugins" }</h1>
                <button class="btn btn-primary" onclick={open_add}>{ "Add Plugin" }</button>
            </div>

            if let Some(message) = (*error).clone() {
                <div class="error-banner">{ message }</div>
            }

            if *editor == Editor::Closed {
                <div class="card">
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{ "Name" }</th>
                                <th>{ "Description" }</th>
                                <th>{ "Version" }</th>
                                <th>{ "Status" }</th>
                                <th>{ "Actions" }</th>
                            </tr>
                        </thead>
                        <tbody>
                            if list.items.is_empty() {
                                <tr><td colspan="5" class="empty-row">{ "No plugins found. Add a new plugin to get started." }</td></tr>
                            } else {
                                { for rows }
                            }
                        </tbody>
                    </table>
                </div>
            } else {
                <PluginForm plugin={editor.editing().cloned()} on_submit={on_submit} on_cancel={on_cancel} />
            }
        </div>
    }
}

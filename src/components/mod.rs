pub mod chat_area;
pub mod chat_widget;
pub mod dropdown;
pub mod form_field;
pub mod model_form;
pub mod model_selector;
pub mod models_page;
pub mod navigation;
pub mod plugin_form;
pub mod plugin_selector;
pub mod plugins_page;
pub mod toast;

use yew::prelude::*;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::services::http::ApiClient;
use crate::services::resources::Backend;
use crate::state::toast::Toaster;

/// The backend clients provided by `App`.
#[hook]
pub fn use_backend() -> Backend {
    use_context::<Backend>().unwrap_or_else(|| {
        tracing::warn!("no backend in context, using configured default");
        Backend::new(ApiClient::with_reqwest(&AppConfig::load().api_base_url))
    })
}

#[hook]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().unwrap_or_else(|| Toaster::new(Callback::noop()))
}

/// Which form an admin page is showing.
#[derive(Clone, PartialEq)]
pub enum Editor<T> {
    Closed,
    Adding,
    Editing(T),
}

impl<T> Editor<T> {
    pub fn editing(&self) -> Option<&T> {
        match self {
            Editor::Editing(record) => Some(record),
            _ => None,
        }
    }
}

/// Logs a failed admin operation and surfaces it as both banner and toast.
pub fn report_failure(
    err: &ApiError,
    message: &'static str,
    banner: &UseStateHandle<Option<String>>,
    toaster: &Toaster,
) {
    tracing::error!(error = %err, status = ?err.status(), "{}", message);
    banner.set(Some(message.to_string()));
    toaster.error(message);
}

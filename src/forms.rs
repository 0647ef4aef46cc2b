//! Admin form state and the client-side checks that run before any request.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::FormErrors;
use crate::models::{Model, ModelStatus, Plugin};

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("version pattern compiles"));

pub const VERSION_FORMAT_ERROR: &str = "Version must be in format x.y.z (e.g., 1.0.0)";

/// Editable form state keyed by input name.
pub trait Draft: Clone + PartialEq {
    /// Updates one field by its input name. Unknown names are ignored.
    fn set_field(&mut self, field: &str, value: String);

    fn validate(&self) -> Result<(), FormErrors>;
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ModelDraft {
    pub name: String,
    pub description: String,
    pub api_endpoint: String,
    pub status: ModelStatus,
}

impl Default for ModelDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            api_endpoint: String::new(),
            status: ModelStatus::Active,
        }
    }
}

impl ModelDraft {
    pub fn from_model(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
            api_endpoint: model.api_endpoint.clone(),
            status: model.status,
        }
    }
}

impl Draft for ModelDraft {
    fn set_field(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "description" => self.description = value,
            "apiEndpoint" => self.api_endpoint = value,
            "status" => {
                if let Some(status) = ModelStatus::parse(&value) {
                    self.status = status;
                }
            }
            _ => {}
        }
    }

    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        }
        if self.api_endpoint.trim().is_empty() {
            errors.insert("apiEndpoint", "API Endpoint is required");
        }
        errors.into_result()
    }
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct PluginDraft {
    pub name: String,
    pub description: String,
    pub version: String,
    pub enabled: bool,
}

impl Default for PluginDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: "1.0.0".to_string(),
            enabled: true,
        }
    }
}

impl PluginDraft {
    pub fn from_plugin(plugin: &Plugin) -> Self {
        Self {
            name: plugin.name.clone(),
            description: plugin.description.clone(),
            version: plugin.version.clone(),
            enabled: plugin.enabled,
        }
    }
}

impl Draft for PluginDraft {
    fn set_field(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "description" => self.description = value,
            "version" => self.version = value,
            "enabled" => self.enabled = value == "true",
            _ => {}
        }
    }

    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        }
        if self.version.trim().is_empty() {
            errors.insert("version", "Version is required");
        } else if !is_semver_triple(&self.version) {
            errors.insert("version", VERSION_FORMAT_ERROR);
        }
        errors.into_result()
    }
}

pub fn is_semver_triple(version: &str) -> bool {
    VERSION_RE.is_match(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin_draft(version: &str) -> PluginDraft {
        PluginDraft {
            name: "Search".into(),
            description: "Web search".into(),
            version: version.into(),
            enabled: true,
        }
    }

    #[test]
    fn version_without_patch_is_rejected() {
        let errors = plugin_draft("1.0").validate().unwrap_err();
        assert_eq!(errors.get("version"), Some(VERSION_FORMAT_ERROR));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn version_shapes() {
        assert!(is_semver_triple("1.0.0"));
        assert!(is_semver_triple("10.20.300"));
        assert!(!is_semver_triple("v1.0.0"));
        assert!(!is_semver_triple("1.0.0-beta"));
        assert!(!is_semver_triple("1..0"));
        assert!(!is_semver_triple("١.٠.٠"));
        assert!(plugin_draft("2.3.4").validate().is_ok());
    }

    #[test]
    fn blank_version_is_required_not_malformed() {
        let errors = plugin_draft("  ").validate().unwrap_err();
        assert_eq!(errors.get("version"), Some("Version is required"));
    }

    #[test]
    fn new_plugin_defaults() {
        let draft = PluginDraft::default();
        assert_eq!(draft.version, "1.0.0");
        assert!(draft.enabled);
        let errors = draft.validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("description").is_some());
        assert!(errors.get("version").is_none());
    }

    #[test]
    fn enabled_follows_checkbox_state() {
        let mut draft = PluginDraft::default();
        draft.set_field("enabled", "false".into());
        assert!(!draft.enabled);
        draft.set_field("enabled", "true".into());
        assert!(draft.enabled);
    }

    #[test]
    fn model_requires_trimmed_fields() {
        let mut draft = ModelDraft::default();
        draft.set_field("name", "   ".into());
        draft.set_field("description", "fast".into());
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("apiEndpoint"), Some("API Endpoint is required"));
        assert!(errors.get("description").is_none());
    }

    #[test]
    fn model_draft_serializes_backend_fields() {
        let mut draft = ModelDraft::default();
        draft.set_field("name", "GPT".into());
        draft.set_field("apiEndpoint", "http://llm".into());
        draft.set_field("status", "inactive".into());
        draft.set_field("status", "bogus".into());

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "name": "GPT", "description": "", "apiEndpoint": "http://llm", "status": "inactive" })
        );
    }
}

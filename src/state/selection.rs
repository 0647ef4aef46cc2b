use std::collections::BTreeSet;

use crate::models::{Model, Plugin};

/// The model shown when the chat first loads: the first one the backend lists.
pub fn default_model(models: &[Model]) -> Option<Model> {
    models.first().cloned()
}

/// Plugins attached to outgoing messages, unique by identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluginSelection {
    ids: BTreeSet<String>,
}

impl PluginSelection {
    /// Adds or removes the plugin. Disabled plugins are left untouched.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, plugin: &Plugin) -> bool {
        if !plugin.enabled {
            return false;
        }
        if !self.ids.remove(&plugin.id) {
            self.ids.insert(plugin.id.clone());
        }
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Selected plugins in catalogue order.
    pub fn selected<'a>(&self, plugins: &'a [Plugin]) -> Vec<&'a Plugin> {
        plugins.iter().filter(|p| self.contains(&p.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelStatus;

    fn plugin(id: &str, enabled: bool) -> Plugin {
        Plugin {
            id: id.into(),
            name: id.to_uppercase(),
            description: String::new(),
            version: "1.0.0".into(),
            enabled,
            created_at: None,
            updated_at: None,
        }
    }

    fn model(id: &str) -> Model {
        Model {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            api_endpoint: String::new(),
            status: ModelStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn double_toggle_restores_membership() {
        let search = plugin("search", true);
        let mut selection = PluginSelection::default();

        assert!(selection.toggle(&search));
        assert!(selection.contains("search"));
        assert!(selection.toggle(&search));
        assert_eq!(selection, PluginSelection::default());
    }

    #[test]
    fn disabled_plugin_never_changes_selection() {
        let mut selection = PluginSelection::default();
        selection.toggle(&plugin("calc", true));
        let before = selection.clone();

        assert!(!selection.toggle(&plugin("web", false)));
        assert!(!selection.toggle(&plugin("web", false)));
        assert_eq!(selection, before);
    }

    #[test]
    fn selected_follows_catalogue_order() {
        let catalogue = vec![plugin("a", true), plugin("b", true), plugin("c", true)];
        let mut selection = PluginSelection::default();
        selection.toggle(&catalogue[2]);
        selection.toggle(&catalogue[0]);

        let names: Vec<&str> = selection.selected(&catalogue).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn default_model_is_first_listed() {
        assert_eq!(default_model(&[]), None);
        assert_eq!(default_model(&[model("m1"), model("m2")]).unwrap().id, "m1");
    }
}
